use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {PaginationNav, nav, "mx-auto flex w-full justify-center"}
    clx! {PaginationList, ul, "flex flex-row flex-wrap items-center gap-1"}
    clx! {PaginationItem, li, "list-none"}
}

pub use components::*;
