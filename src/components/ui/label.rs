use leptos::prelude::*;
use tw_merge::*;

#[component]
pub fn Label(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] html_for: String,
    /// Appends a muted "(optional)" hint after the text.
    #[prop(optional)]
    optional: bool,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!(
        "flex items-center gap-1 text-sm leading-none font-medium select-none peer-disabled:cursor-not-allowed peer-disabled:opacity-50 group-disabled:opacity-50",
        class
    );

    view! {
        <label class=class r#for=html_for>
            {children()}
            {optional.then(|| view! { <span class="font-normal text-muted-foreground">"(optional)"</span> })}
        </label>
    }
}
