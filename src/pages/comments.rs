use crate::charts::{pie_slices, PIE_HEIGHT, PIE_WIDTH};
use crate::comments::{Language, MOODS, PER_PAGE_OPTIONS};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardItem,
    CardList, CardTitle, ErrorAlert, Input, Label, PaginationItem, PaginationList, PaginationNav,
    Spinner, Textarea,
};
use crate::models::{Author, Comment, MoodCounts};
use crate::pages::SiteLayout;
use crate::pagination::PageNav;
use crate::state::{AppContext, ReloadMode};
use crate::util::format_timestamp;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use strum::IntoEnumIterator;

#[component]
pub fn CommentsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    Effect::new(move |_| {
        app_state.load_login_status();
        app_state.load_comments(ReloadMode::Rebuild);
        app_state.load_upload_url();
    });

    view! {
        <SiteLayout>
            <LoginBanner />

            <div class="grid gap-6 md:grid-cols-2">
                <CommentForm />
                <NicknameForm />
            </div>

            <Card>
                <CardHeader>
                    <CardTitle>"Comments"</CardTitle>
                    <CardDescription>
                        {move || format!("{} total", app_state.board.with(|b| b.total()))}
                    </CardDescription>
                </CardHeader>
                <CardContent class="space-y-4">
                    <CommentControls />
                    <ErrorAlert error=app_state.comments_error />
                    <CommentList />
                    <PaginationBar />
                </CardContent>
            </Card>

            <MoodChart />
        </SiteLayout>
    }
}

#[component]
fn LoginBanner() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let welcome = move || match app_state.login_status.get() {
        None => "Checking sign-in status...".to_string(),
        Some(status) if status.is_logged_in => format!(
            "Welcome, {}",
            app_state.welcome_name.get().unwrap_or_default()
        ),
        Some(_) => "Welcome, please log in to post a comment.".to_string(),
    };

    let link = move || {
        app_state.login_status.get().and_then(|status| {
            let label = if status.is_logged_in { "Logout" } else { "Login" };
            status
                .toggle_url()
                .map(|href| (href.to_string(), label))
        })
    };

    view! {
        <div class="flex items-center justify-between gap-4">
            <p id="welcome-message" class="text-sm">{welcome}</p>
            {move || {
                link().map(|(href, label)| {
                    view! {
                        <a id="login-out" class="text-sm text-primary underline underline-offset-4" href=href>
                            {label}
                        </a>
                    }
                })
            }}
        </div>
        <ErrorAlert error=app_state.login_error />
    }
}

/// Multipart form posted by the browser straight to the blob-store upload URL.
#[component]
fn CommentForm() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let content: RwSignal<String> = RwSignal::new(String::new());

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-base">"Leave a comment"</CardTitle>
            </CardHeader>
            <CardContent>
                <Show
                    when=move || app_state.upload_url.get().is_some()
                    fallback=|| view! {
                        <div class="inline-flex items-center gap-2 text-xs text-muted-foreground">
                            <Spinner />
                            "Preparing form..."
                        </div>
                    }
                >
                    <form
                        id="input-form"
                        method="POST"
                        enctype="multipart/form-data"
                        action=move || app_state.upload_url.get().unwrap_or_default()
                    >
                        <fieldset
                            id="input-form-fieldset"
                            class="flex flex-col gap-3"
                            disabled=move || !app_state.is_logged_in()
                        >
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="mood" class="text-xs">"Mood"</Label>
                                <select id="mood" name="mood" class="h-8 rounded-md border bg-transparent px-2 text-sm">
                                    {MOODS
                                        .into_iter()
                                        .map(|mood| view! { <option value=mood>{mood}</option> })
                                        .collect_view()}
                                </select>
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="comment-content" class="text-xs">"Comment"</Label>
                                <Textarea
                                    id="comment-content"
                                    name="comment-content"
                                    placeholder="Say something nice"
                                    bind_value=content
                                    required=true
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="image" class="text-xs" optional=true>"Image"</Label>
                                <input id="image" name="image" type="file" accept="image/*" class="text-xs" />
                            </div>

                            <Button size=ButtonSize::Sm class="w-full">"Post"</Button>
                        </fieldset>
                    </form>
                </Show>
            </CardContent>
        </Card>
    }
}

#[component]
fn NicknameForm() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let nickname: RwSignal<String> = RwSignal::new(String::new());
    let action = move || app_state.api_client.with(|c| c.url("/nickname"));

    view! {
        <Show when=move || app_state.is_logged_in() fallback=|| ().into_view()>
            <Card>
                <CardHeader>
                    <CardTitle class="text-base">"Nickname"</CardTitle>
                    <CardDescription class="text-xs">"Shown next to your comments instead of your email."</CardDescription>
                </CardHeader>
                <CardContent>
                    <form id="set-nickname-form" method="POST" action=action class="flex items-end gap-2">
                        <div class="flex flex-1 flex-col gap-1.5">
                            <Label html_for="nickname-input" class="text-xs">"Nickname"</Label>
                            <Input
                                id="nickname-input"
                                name="nickname-input"
                                placeholder="yourname"
                                bind_value=nickname
                                required=true
                                class="h-8 text-sm"
                            />
                        </div>
                        <Button size=ButtonSize::Sm>"Set nickname"</Button>
                    </form>
                </CardContent>
            </Card>
        </Show>
    }
}

#[component]
fn CommentControls() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let on_language = move |ev: web_sys::Event| {
        let language = Language::from_code(&event_target_value(&ev));
        app_state.language.set(language);
        app_state.load_comments(ReloadMode::KeepControl);
    };

    let on_per_page = move |ev: web_sys::Event| {
        let Ok(per_page) = event_target_value(&ev).parse::<usize>() else {
            return;
        };
        app_state.board.update(|b| b.set_per_page(per_page));
        app_state.load_comments(ReloadMode::Rebuild);
    };

    let per_page = move || app_state.board.with(|b| b.page_state().per_page);

    view! {
        <div class="flex flex-wrap items-end gap-3">
            <div class="flex flex-col gap-1.5">
                <Label html_for="language" class="text-xs">"Language"</Label>
                <select id="language" class="h-8 rounded-md border bg-transparent px-2 text-sm" on:change=on_language>
                    {Language::iter()
                        .map(|lang| {
                            view! {
                                <option
                                    value=lang.code()
                                    selected=move || app_state.language.get() == lang
                                >
                                    {lang.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="flex flex-col gap-1.5">
                <Label html_for="num-comments-per-page" class="text-xs">"Per page"</Label>
                <select
                    id="num-comments-per-page"
                    class="h-8 rounded-md border bg-transparent px-2 text-sm"
                    on:change=on_per_page
                >
                    {move || {
                        let current = per_page();
                        let mut options = PER_PAGE_OPTIONS.to_vec();
                        if !options.contains(&current) {
                            options.push(current);
                            options.sort_unstable();
                        }
                        options
                            .into_iter()
                            .map(|n| view! { <option value=n.to_string() selected={n == current}>{n}</option> })
                            .collect_view()
                    }}
                </select>
            </div>

            <div class="ml-auto flex items-center gap-2">
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:disabled=move || app_state.comments_loading.get()
                    on:click=move |_| app_state.load_comments(ReloadMode::Rebuild)
                >
                    <span class="inline-flex items-center gap-2">
                        <Show when=move || app_state.comments_loading.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        "Refresh"
                    </span>
                </Button>
                <Button
                    variant=ButtonVariant::Destructive
                    size=ButtonSize::Sm
                    on:click=move |_| app_state.delete_all_comments()
                >
                    "Delete all"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn CommentList() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let empty_message = move || {
        if app_state.comments_loading.get() {
            "Loading comments..."
        } else if app_state.board.with(|b| b.total() == 0) {
            "No comments yet."
        } else {
            "No comments on this page."
        }
    };

    view! {
        <Show
            when=move || app_state.board.with(|b| !b.visible().is_empty())
            fallback=move || view! { <div class="text-xs text-muted-foreground">{empty_message}</div> }
        >
            <CardList attr:id="comments-list">
                <For
                    each=move || app_state.board.with(|b| b.visible().to_vec())
                    key=|c: &Comment| (c.id, c.content.clone())
                    children=move |comment: Comment| view! { <CommentItem comment=comment /> }
                />
            </CardList>
        </Show>
    }
}

#[component]
fn CommentItem(comment: Comment) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let display_name: RwSignal<Option<String>> = RwSignal::new(match &comment.author {
        Author::Named(name) => Some(name.clone()),
        Author::Anonymous => Some("Anonymous".to_string()),
        Author::UserId(_) => None,
    });

    // Names that need a lookup are filled in when `/nickname` answers. A row
    // that was unmounted in the meantime drops the answer.
    if let Author::UserId(user_id) = comment.author.clone() {
        let api_client = app_state.api_client.get_untracked();
        spawn_local(async move {
            match api_client.get_nickname(&user_id).await {
                Ok(name) => {
                    if display_name.try_set(Some(name)).is_some() {
                        log!("[comments] nickname for {user_id} arrived after its row was removed");
                    }
                }
                Err(e) => {
                    warn!("[comments] nickname lookup for {user_id}: {e}");
                    let _ = display_name.try_set(Some(user_id.clone()));
                }
            }
        });
    }

    let id = comment.id;
    let timestamp = format_timestamp(comment.timestamp_ms);
    let sentiment = comment.sentiment_label();
    let image_src = comment
        .image
        .as_ref()
        .map(|image| app_state.api_client.with_untracked(|c| c.image_src(image)));
    let content = comment.content.clone();
    let author_line = move || match display_name.get() {
        Some(name) => comment.author_line(&name),
        None => "...".to_string(),
    };

    view! {
        <CardItem class="comment">
            <div class="flex w-full items-start justify-between gap-2">
                <strong class="text-sm text-success">{author_line}</strong>
                <span class="text-xs text-muted-foreground">{timestamp}</span>
            </div>
            <p class="whitespace-pre-wrap text-sm">{content}</p>
            {image_src.map(|src| {
                let href = src.clone();
                view! {
                    <a href=href target="_blank" rel="noopener">
                        <img src=src class="max-h-48 rounded-md border" alt="Attached image" />
                    </a>
                }
            })}
            <div class="flex w-full items-center justify-between">
                <span class="sentiment text-xs text-muted-foreground">{sentiment}</span>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Xs
                    class="delete-btn"
                    on:click=move |_| app_state.delete_comment(id)
                >
                    "Delete"
                </Button>
            </div>
        </CardItem>
    }
}

#[component]
fn PaginationBar() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    let on_nav = move |nav: PageNav| {
        let changed = app_state
            .board
            .try_update(|b| b.navigate(nav))
            .unwrap_or(false);
        if changed {
            app_state.load_comments(ReloadMode::KeepControl);
        }
    };

    let position = move || {
        app_state.board.with(|b| {
            let control = b.control();
            format!("Page {} of {}", control.active_page(), control.page_count())
        })
    };

    view! {
        <p class="text-center text-xs text-muted-foreground">{position}</p>
        <PaginationNav attr:aria-label="Comment pages">
            <PaginationList attr:id="page-list">
                {move || {
                    app_state
                        .board
                        .with(|b| b.control().entries().to_vec())
                        .into_iter()
                        .map(|entry| {
                            let (variant, item_class) = if entry.active {
                                (ButtonVariant::Default, "page-item active")
                            } else {
                                (ButtonVariant::Outline, "page-item")
                            };
                            view! {
                                <PaginationItem class=item_class>
                                    <Button
                                        variant=variant
                                        size=ButtonSize::Sm
                                        class="page-link"
                                        on:click=move |_| on_nav(entry.nav)
                                    >
                                        {entry.nav.label()}
                                    </Button>
                                </PaginationItem>
                            }
                        })
                        .collect_view()
                }}
            </PaginationList>
        </PaginationNav>
    }
}

#[component]
fn MoodChart() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let counts: RwSignal<MoodCounts> = RwSignal::new(MoodCounts::new());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let chart_error: RwSignal<Option<String>> = RwSignal::new(None);

    Effect::new(move |_| {
        let api_client = app_state.api_client.get_untracked();
        loading.set(true);
        spawn_local(async move {
            match api_client.get_mood_counts().await {
                Ok(c) => {
                    let _ = counts.try_set(c);
                }
                Err(e) => {
                    error!("[mood-chart] {e}");
                    let _ = chart_error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    });

    let (cx, cy) = (PIE_WIDTH * 0.35, PIE_HEIGHT / 2.0);
    let r = PIE_HEIGHT * 0.4;

    view! {
        <Card>
            <CardHeader>
                <CardTitle class="text-base">"Comment moods"</CardTitle>
            </CardHeader>
            <CardContent>
                <ErrorAlert error=chart_error />
                {move || {
                    let slices = counts.with(pie_slices);
                    if slices.is_empty() {
                        let msg = if loading.get() { "Loading moods..." } else { "No moods to show yet." };
                        return view! { <div class="text-xs text-muted-foreground">{msg}</div> }.into_any();
                    }

                    view! {
                        <svg
                            id="mood-chart-container"
                            width=PIE_WIDTH
                            height=PIE_HEIGHT
                            viewBox=format!("0 0 {PIE_WIDTH} {PIE_HEIGHT}")
                            role="img"
                            aria-label="Comment moods"
                        >
                            {slices
                                .iter()
                                .map(|s| {
                                    if s.is_full_circle() {
                                        view! { <circle cx=cx cy=cy r=r fill=s.color /> }.into_any()
                                    } else {
                                        view! { <path d=s.path(cx, cy, r) fill=s.color stroke="white" /> }
                                            .into_any()
                                    }
                                })
                                .collect_view()}
                            {slices
                                .iter()
                                .enumerate()
                                .map(|(i, s)| {
                                    let y = 30.0 + i as f64 * 22.0;
                                    view! {
                                        <rect x=PIE_WIDTH * 0.72 y=y - 10.0 width=12 height=12 fill=s.color />
                                        <text x=PIE_WIDTH * 0.72 + 18.0 y=y font-size="12">
                                            {format!("{} ({}, {})", s.label, s.count, s.percent_label())}
                                        </text>
                                    }
                                })
                                .collect_view()}
                        </svg>
                    }
                    .into_any()
                }}
            </CardContent>
        </Card>
    }
}
