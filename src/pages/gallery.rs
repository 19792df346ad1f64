use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    ErrorAlert, Textarea,
};
use crate::map::{project, unproject, MapState, MAP_HEIGHT, MAP_WIDTH};
use crate::models::Marker;
use crate::pages::SiteLayout;
use crate::state::AppContext;
use leptos::ev;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use wasm_bindgen::JsCast;

const GRATICULE_STEP: f64 = 30.0;

/// Maps a click on the rendered SVG back into viewBox coordinates.
fn click_to_view_box(ev: &web_sys::MouseEvent) -> Option<(f64, f64)> {
    let el = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = el.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let x = (ev.client_x() as f64 - rect.left()) / rect.width() * MAP_WIDTH;
    let y = (ev.client_y() as f64 - rect.top()) / rect.height() * MAP_HEIGHT;
    Some((x, y))
}

#[component]
pub fn GalleryPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let map: RwSignal<MapState> = RwSignal::new(MapState::with_landmarks());
    let map_error: RwSignal<Option<String>> = RwSignal::new(None);

    Effect::new(move |_| {
        let api_client = app_state.api_client.get_untracked();
        spawn_local(async move {
            match api_client.get_markers().await {
                Ok(markers) => {
                    log!("[map] {} saved markers", markers.len());
                    let _ = map.try_update(|m| m.add_markers(markers));
                }
                Err(e) => {
                    error!("[map] {e}");
                    let _ = map_error.try_set(Some(e.to_string()));
                }
            }
        });
    });

    let on_map_click = move |ev: web_sys::MouseEvent| {
        let Some((x, y)) = click_to_view_box(&ev) else {
            return;
        };
        let (lat, lng) = unproject(x, y);
        map.update(|m| m.start_edit(lat, lng));
    };

    // Esc discards the editable marker, even while typing in it.
    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            let _ = map.try_update(|m| m.discard_edit());
        }
    });
    on_cleanup(move || key_handle.remove());

    view! {
        <SiteLayout>
            <Card>
                <CardHeader>
                    <CardTitle>"Places"</CardTitle>
                    <CardDescription>
                        "Click a marker to read about it, or click anywhere on the map to leave a note."
                    </CardDescription>
                </CardHeader>
                <CardContent class="space-y-4">
                    <ErrorAlert error=map_error />
                    <svg
                        id="map"
                        class="w-full rounded-md border bg-sky-50 hover:cursor-crosshair"
                        viewBox=format!("0 0 {MAP_WIDTH} {MAP_HEIGHT}")
                        on:click=on_map_click
                    >
                        <Graticule />
                        {move || {
                            map.with(|m| m.markers().to_vec())
                                .into_iter()
                                .enumerate()
                                .map(|(i, marker)| view! { <MarkerPin map=map index=i marker=marker /> })
                                .collect_view()
                        }}
                        {move || {
                            map.with(|m| m.editing()).map(|(lat, lng)| {
                                let (x, y) = project(lat, lng);
                                view! {
                                    <circle cx=x cy=y r=6 fill="#dc2626" stroke="white" stroke-width=2 />
                                }
                            })
                        }}
                    </svg>
                    <MarkerInfo map=map />
                    <MarkerEditor map=map map_error=map_error />
                </CardContent>
            </Card>
        </SiteLayout>
    }
}

#[component]
fn Graticule() -> impl IntoView {
    let meridians = (0..=(360.0 / GRATICULE_STEP) as usize).map(|i| {
        let (x, _) = project(0.0, -180.0 + i as f64 * GRATICULE_STEP);
        view! { <line x1=x y1=0 x2=x y2=MAP_HEIGHT stroke="#cbd5e1" stroke-width=0.5 /> }
    });
    let parallels = (0..=(180.0 / GRATICULE_STEP) as usize).map(|i| {
        let (_, y) = project(90.0 - i as f64 * GRATICULE_STEP, 0.0);
        view! { <line x1=0 y1=y x2=MAP_WIDTH y2=y stroke="#cbd5e1" stroke-width=0.5 /> }
    });

    view! {
        <g class="pointer-events-none">
            {meridians.collect_view()}
            {parallels.collect_view()}
        </g>
    }
}

#[component]
fn MarkerPin(map: RwSignal<MapState>, index: usize, marker: Marker) -> impl IntoView {
    let (x, y) = project(marker.lat, marker.lng);
    let selected = move || map.with(|m| m.selected_index() == Some(index));
    let on_click = move |ev: web_sys::MouseEvent| {
        // Keep the map underneath from placing an editable marker.
        ev.stop_propagation();
        map.update(|m| m.toggle_selected(index));
    };

    if marker.landmark {
        let flag = format!(
            "M {x} {y} L {x} {} L {} {} L {x} {} Z",
            y - 16.0,
            x + 10.0,
            y - 12.0,
            y - 8.0
        );
        view! {
            <g class="hover:cursor-pointer" on:click=on_click>
                <title>{marker.title.clone().unwrap_or_default()}</title>
                <path
                    d=flag
                    fill=move || if selected() { "#f59e0b" } else { "#2563eb" }
                    stroke="#1e3a8a"
                />
                <circle cx=x cy=y r=2 fill="#1e3a8a" />
            </g>
        }
        .into_any()
    } else {
        view! {
            <g class="hover:cursor-pointer" on:click=on_click>
                <title>{marker.content.clone()}</title>
                <circle
                    cx=x
                    cy=y
                    r=5
                    fill=move || if selected() { "#f59e0b" } else { "#16a34a" }
                    stroke="white"
                    stroke-width=1.5
                />
            </g>
        }
        .into_any()
    }
}

#[component]
fn MarkerInfo(map: RwSignal<MapState>) -> impl IntoView {
    view! {
        {move || {
            map.with(|m| m.selected().cloned()).map(|marker| {
                view! {
                    <div id="marker-info" class="flex items-start justify-between gap-4 rounded-md border px-4 py-3">
                        <div class="space-y-1">
                            {marker.title.clone().map(|t| view! { <p class="text-sm font-medium">{t}</p> })}
                            <p class="text-sm">{marker.content.clone()}</p>
                            <p class="text-xs text-muted-foreground">
                                {format!("{:.4}, {:.4}", marker.lat, marker.lng)}
                            </p>
                        </div>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Xs
                            on:click=move |_| map.update(|m| {
                                if let Some(i) = m.selected_index() {
                                    m.toggle_selected(i);
                                }
                            })
                        >
                            "Close"
                        </Button>
                    </div>
                }
            })
        }}
    }
}

/// Text box for the editable marker. Submitting saves it through `/markers`.
#[component]
fn MarkerEditor(map: RwSignal<MapState>, map_error: RwSignal<Option<String>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let content: RwSignal<String> = RwSignal::new(String::new());
    let saving: RwSignal<bool> = RwSignal::new(false);

    let on_submit = move |_: web_sys::MouseEvent| {
        if saving.get_untracked() {
            return;
        }

        let text = content.get_untracked();
        let Some(marker) = map.try_update(|m| m.commit_edit(&text)).flatten() else {
            return;
        };
        content.set(String::new());
        map_error.set(None);
        saving.set(true);

        let api_client = app_state.api_client.get_untracked();
        spawn_local(async move {
            match api_client.post_marker(&marker).await {
                Ok(()) => log!("[map] saved marker at {:.4}, {:.4}", marker.lat, marker.lng),
                Err(e) => {
                    error!("[map] save marker: {e}");
                    let _ = map_error.try_set(Some(e.to_string()));
                }
            }
            let _ = saving.try_set(false);
        });
    };

    let on_cancel = move |_: web_sys::MouseEvent| {
        map.update(|m| m.discard_edit());
        content.set(String::new());
    };

    view! {
        <Show when=move || map.with(|m| m.editing().is_some()) fallback=|| ().into_view()>
            <div id="marker-editor" class="flex flex-col gap-2 rounded-md border px-4 py-3">
                <p class="text-xs text-muted-foreground">
                    {move || {
                        map.with(|m| m.editing())
                            .map(|(lat, lng)| format!("New marker at {lat:.4}, {lng:.4}"))
                    }}
                </p>
                <Textarea id="marker-content" placeholder="What happened here?" bind_value=content />
                <div class="flex items-center gap-2">
                    <Button size=ButtonSize::Sm attr:disabled=move || saving.get() on:click=on_submit>
                        "Submit"
                    </Button>
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=on_cancel>
                        "Cancel"
                    </Button>
                </div>
            </div>
        </Show>
    }
}
