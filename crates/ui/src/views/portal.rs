use dioxus::prelude::*;
use dioxus_router::use_navigator;
use portal_core::model::LearningTrack;
use services::CatalogError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::toaster::use_toaster;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{TrackCardVm, map_track_cards};

/// Landing page after sign-in: joined learning tracks and the join-by-code form.
#[component]
pub fn PortalView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toaster = use_toaster();
    let mut join_code = use_signal(String::new);
    let mut joining = use_signal(|| false);

    let catalog = ctx.catalog();
    let media = ctx.media_domain().clone();
    let mut resource = use_resource(move || {
        let catalog = catalog.clone();
        let media = media.clone();
        async move {
            match catalog.learning_tracks().await {
                Ok(tracks) => Ok(map_track_cards(&tracks, &media)),
                Err(CatalogError::NotSignedIn) => Err(ViewError::NotSignedIn),
                Err(err) => {
                    toaster.error(err.to_string());
                    Err(ViewError::Unknown)
                }
            }
        }
    });
    let state = view_state_from_resource(resource);

    let on_join = {
        let catalog = ctx.catalog();
        use_callback(move |()| {
            if joining() {
                return;
            }
            let catalog = catalog.clone();
            let code = join_code();
            spawn(async move {
                joining.set(true);
                let result = catalog.join_track(&code).await;
                joining.set(false);
                match result {
                    Ok(message) => {
                        toaster.success(message);
                        join_code.set(String::new());
                        resource.restart();
                    }
                    Err(err) => {
                        toaster.error(err.to_string());
                    }
                }
            });
        })
    };

    let on_open = {
        let catalog = ctx.catalog();
        use_callback(move |track: LearningTrack| {
            let catalog = catalog.clone();
            spawn(async move {
                match catalog.open_track(&track).await {
                    Ok(destination) => {
                        navigator.push(Route::from(destination));
                    }
                    Err(err) => {
                        toaster.error(err.to_string());
                    }
                }
            });
        })
    };

    rsx! {
        div { class: "page portal-page",
            h2 { "Learning Tracks" }
            form {
                class: "join-track",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_join.call(());
                },
                input {
                    id: "join-track-code",
                    placeholder: "Enter a course code",
                    value: "{join_code}",
                    oninput: move |evt| join_code.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: joining(),
                    "Join"
                }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { class: "empty-state", "You have not joined any learning track yet." }
                    }
                    ul { class: "track-grid",
                        for card in cards {
                            TrackCard { key: "{card.track.code}", card, on_open }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn TrackCard(card: TrackCardVm, on_open: Callback<LearningTrack>) -> Element {
    let track = card.track.clone();
    rsx! {
        li { class: "track-card",
            button {
                class: "track-card__button",
                r#type: "button",
                onclick: move |_| on_open.call(track.clone()),
                if let Some(logo) = card.logo.as_ref() {
                    img { class: "track-card__logo", src: "{logo}", alt: "" }
                }
                span { class: "track-card__name", "{card.track.name}" }
                span { class: "track-card__code", "{card.track.code}" }
            }
        }
    }
}
