use crate::charts::{timeline_bars, timeline_categories, timeline_rows, YearMonth};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
};
use crate::pages::SiteLayout;
use crate::util::CalendarHour;
use crate::widgets::{random_fun_fact, random_quote, FunFact, SECTION_FUN_FACTS};
use leptos::logging::warn;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <SiteLayout>
            <div class="space-y-2">
                <h1 class="text-2xl font-semibold">"Hi, I'm Heidi"</h1>
                <p class="text-sm text-muted-foreground">
                    "Computer science student. This site collects a few things about me."
                </p>
            </div>

            <DropdownSection title="About me">
                <p class="text-sm">
                    "I grew up in Nanjing and moved to Baltimore for college. I like building small tools and reading long novels."
                </p>
            </DropdownSection>

            <DropdownSection title="A few things about me">
                <ul class="list-disc space-y-1 pl-5 text-sm">
                    {SECTION_FUN_FACTS
                        .into_iter()
                        .map(|(id, text)| view! { <li id=id>{text}</li> })
                        .collect_view()}
                </ul>
            </DropdownSection>

            <div class="grid gap-6 md:grid-cols-2">
                <QuoteWidget />
                <FunFactWidget />
            </div>

            <Timeline />
        </SiteLayout>
    }
}

/// Card whose body opens and closes when the header is clicked.
#[component]
fn DropdownSection(title: &'static str, children: ChildrenFn) -> impl IntoView {
    let open: RwSignal<bool> = RwSignal::new(false);
    let children = StoredValue::new(children);

    view! {
        <Card>
            <CardHeader>
                <button
                    class="flex w-full items-center justify-between text-left hover:cursor-pointer"
                    aria-expanded=move || open.get().to_string()
                    on:click=move |_| open.update(|o| *o = !*o)
                >
                    <CardTitle class="text-base">{title}</CardTitle>
                    <span class="text-xs text-muted-foreground">
                        {move || if open.get() { "Hide" } else { "Show" }}
                    </span>
                </button>
            </CardHeader>
            <Show when=move || open.get() fallback=|| ().into_view()>
                <CardContent>{move || children.with_value(|c| c())}</CardContent>
            </Show>
        </Card>
    }
}

#[component]
fn QuoteWidget() -> impl IntoView {
    let quote: RwSignal<Option<&'static str>> = RwSignal::new(None);

    let on_click = move |_: web_sys::MouseEvent| match random_quote() {
        Some(q) => quote.set(Some(q)),
        None => warn!("[home] no entropy for quote pick"),
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-base">"Favorite quotes"</CardTitle>
            </CardHeader>
            <CardContent class="space-y-3">
                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=on_click>
                    "Show me a quote"
                </Button>
                <p id="favorite-quote-container" class="whitespace-pre-line text-sm">
                    {move || quote.get()}
                </p>
            </CardContent>
        </Card>
    }
}

#[component]
fn FunFactWidget() -> impl IntoView {
    let fact: RwSignal<Option<FunFact>> = RwSignal::new(None);

    let on_click = move |_: web_sys::MouseEvent| match random_fun_fact() {
        Some(f) => fact.set(Some(f)),
        None => warn!("[home] no entropy for fun fact pick"),
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-base">"Fun facts"</CardTitle>
            </CardHeader>
            <CardContent class="space-y-3">
                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=on_click>
                    "Tell me something"
                </Button>
                <p id="fun-fact-container" class="text-sm">
                    {move || fact.get().map(|f| f.text())}
                </p>
                {move || match fact.get() {
                    Some(FunFact::Section { id, .. }) => Some(view! {
                        <a class="text-xs text-primary underline underline-offset-4" href=format!("#{id}")>
                            "More in \"A few things about me\""
                        </a>
                    }),
                    _ => None,
                }}
            </CardContent>
        </Card>
    }
}

#[component]
fn Timeline() -> impl IntoView {
    let now = CalendarHour::from_date(&js_sys::Date::new_0());
    let now = YearMonth::new(now.year, now.month);
    let rows = timeline_rows();
    let bars = timeline_bars(&rows, now);
    let categories = timeline_categories(&rows);

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-base">"Timeline"</CardTitle>
                <CardDescription class="text-xs">{format!("Through {}", now.label())}</CardDescription>
            </CardHeader>
            <CardContent class="space-y-4">
                {categories
                    .into_iter()
                    .map(|category| {
                        let rows = bars
                            .iter()
                            .filter(|b| b.category == category)
                            .cloned()
                            .map(|bar| {
                                view! {
                                    <div class="relative h-6 rounded bg-muted" title=bar.span.clone()>
                                        <div
                                            class="absolute inset-y-0 flex items-center overflow-hidden rounded bg-primary/80 px-2 text-xs text-primary-foreground"
                                            style=format!("left: {:.3}%; width: {:.3}%;", bar.left, bar.width)
                                        >
                                            {bar.label}
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view();
                        view! {
                            <div class="space-y-1">
                                <p class="text-xs font-medium text-muted-foreground">{category}</p>
                                {rows}
                            </div>
                        }
                    })
                    .collect_view()}
            </CardContent>
        </Card>
    }
}
