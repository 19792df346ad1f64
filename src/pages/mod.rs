mod comments;
mod gallery;
mod home;

pub use comments::CommentsPage;
pub use gallery::GalleryPage;
pub use home::HomePage;

use crate::app::SitePage;
use leptos::prelude::*;
use leptos_router::hooks::use_location;
use strum::IntoEnumIterator;

#[component]
pub fn SiteLayout(children: Children) -> impl IntoView {
    let pathname = use_location().pathname;
    let current = move || pathname.with(|p| SitePage::from_segment(p));

    view! {
        <div class="min-h-screen bg-background">
            <header class="border-b">
                <div class="mx-auto flex w-full max-w-[960px] items-center justify-between px-4 py-3">
                    <a href="/" class="text-sm font-medium text-foreground">"Portfolio"</a>
                    <nav class="flex items-center gap-4 text-sm text-muted-foreground">
                        {SitePage::iter()
                            .map(|page| {
                                view! {
                                    <a
                                        class=move || {
                                            if current() == Some(page) {
                                                "text-foreground"
                                            } else {
                                                "hover:text-foreground"
                                            }
                                        }
                                        href=page.href()
                                    >
                                        {page.label()}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </nav>
                </div>
            </header>
            <main class="mx-auto w-full max-w-[960px] space-y-6 px-4 py-8">{children()}</main>
        </div>
    }
}
