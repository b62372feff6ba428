use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use portal_core::model::{Book, Chapter, resolve_media};
use services::{CatalogError, TrackDashboard};

use crate::context::AppContext;
use crate::routes::Route;
use crate::toaster::use_toaster;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    QuestCardVm, map_quest_cards, map_test_cards, parse_track_code, summary_tiles,
};

const LOCKED_NOTE: &str = "Complete every module in this track to unlock its certification tests.";

#[component]
pub fn DashboardView(tc: String) -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let selected_quest = use_signal(|| None::<QuestCardVm>);

    let catalog = ctx.catalog();
    let code = parse_track_code(&tc);
    let mut resource = use_resource(move || {
        let catalog = catalog.clone();
        let code = code.clone();
        async move {
            let Some(code) = code else {
                toaster.error(ViewError::InvalidCourse.message());
                return Err(ViewError::InvalidCourse);
            };
            match catalog.track_dashboard(&code).await {
                Ok(dashboard) => {
                    toaster.notify_all(dashboard.notices.clone());
                    Ok(dashboard)
                }
                Err(CatalogError::NotSignedIn) => Err(ViewError::NotSignedIn),
                Err(err) => {
                    toaster.error(err.to_string());
                    Err(ViewError::Unknown)
                }
            }
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page dashboard-page",
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
                ViewState::Ready(dashboard) => rsx! {
                    DashboardBody { dashboard, selected_quest }
                },
            }
            if let Some(quest) = selected_quest() {
                QuestDetails { quest, selected_quest }
            }
        }
    }
}

#[component]
fn DashboardBody(dashboard: TrackDashboard, selected_quest: Signal<Option<QuestCardVm>>) -> Element {
    let ctx = use_context::<AppContext>();
    let mut selected_quest = selected_quest;
    let media = ctx.media_domain();
    let title = dashboard
        .track
        .as_ref()
        .map_or_else(|| dashboard.code.to_string(), |track| track.name.clone());
    let tiles = summary_tiles(&dashboard.summary);
    let quests = map_quest_cards(&dashboard.quests, media);
    let tests = map_test_cards(&dashboard.tests, media);
    let tc = dashboard.code.to_string();

    rsx! {
        header { class: "dashboard-header",
            h2 { "{title}" }
            Link {
                class: "btn btn-secondary",
                to: Route::CertificationTests { tc: tc.clone() },
                "Certification Tests"
            }
        }
        section { class: "summary-tiles",
            for tile in tiles {
                div { class: "summary-tile",
                    span { class: "summary-tile__value", "{tile.value}" }
                    span { class: "summary-tile__label", "{tile.label}" }
                }
            }
        }
        section { class: "dashboard-section",
            h3 { "Modules" }
            if quests.is_empty() {
                p { class: "empty-state", "No modules in this track yet." }
            }
            ul { class: "quest-list",
                for quest in quests {
                    li { key: "{quest.id}", class: "quest-card",
                        if let Some(cover) = quest.cover.as_ref() {
                            img { class: "quest-card__cover", src: "{cover}", alt: "" }
                        }
                        div { class: "quest-card__body",
                            h4 { "{quest.title}" }
                            div { class: "progress",
                                div { class: "progress__bar", style: "width: {quest.progress}%" }
                            }
                            p { class: "quest-card__meta", "{quest.progress_label} · {quest.progress}%" }
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: {
                                let quest = quest.clone();
                                move |_| selected_quest.set(Some(quest.clone()))
                            },
                            "Details"
                        }
                    }
                }
            }
        }
        section { class: "dashboard-section",
            h3 { "Books" }
            if dashboard.books.is_empty() {
                p { class: "empty-state", "No books in this track yet." }
            }
            ul { class: "book-list",
                for book in dashboard.books.iter().cloned() {
                    BookItem { key: "{book.id}", book }
                }
            }
        }
        section { class: "dashboard-section",
            h3 { "Certification Tests" }
            if dashboard.tests_locked {
                p { class: "notice notice--locked", "{LOCKED_NOTE}" }
            }
            ul { class: "test-list",
                for test in tests {
                    li { key: "{test.id}", class: "test-card test-card--compact",
                        span { class: "test-card__title", "{test.title}" }
                        span { class: "test-card__details", "{test.details}" }
                        span { class: "badge", "{test.action.label()}" }
                    }
                }
            }
        }
    }
}

#[component]
fn QuestDetails(quest: QuestCardVm, selected_quest: Signal<Option<QuestCardVm>>) -> Element {
    let navigator = use_navigator();
    let mut selected_quest = selected_quest;
    let route = Route::PracticeQuest {
        id: quest.id.to_string(),
        time: quest.seconds_per_question.to_string(),
    };
    rsx! {
        div { class: "modal-overlay",
            div {
                class: "modal",
                role: "dialog",
                aria_modal: "true",
                h3 { class: "modal__title", "{quest.title}" }
                if !quest.about.is_empty() {
                    h4 { "About" }
                    p { "{quest.about}" }
                }
                if !quest.instructions.is_empty() {
                    h4 { "Instructions" }
                    p { "{quest.instructions}" }
                }
                p { class: "quest-card__meta", "{quest.progress_label}" }
                div { class: "modal__actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| selected_quest.set(None),
                        "Close"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            selected_quest.set(None);
                            navigator.push(route.clone());
                        },
                        "Start"
                    }
                }
            }
        }
    }
}

#[component]
fn BookItem(book: Book) -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let mut expanded = use_signal(|| false);
    let mut chapters = use_signal(|| None::<Vec<Chapter>>);
    let cover = book
        .cover
        .as_deref()
        .and_then(|path| resolve_media(ctx.media_domain(), path));
    let book_id = book.id;

    let on_toggle = {
        let catalog = ctx.catalog();
        use_callback(move |()| {
            let open = !expanded();
            expanded.set(open);
            if !open || chapters.read().is_some() {
                return;
            }
            let catalog = catalog.clone();
            spawn(async move {
                match catalog.book_chapters(book_id).await {
                    Ok(loaded) => chapters.set(Some(loaded)),
                    Err(err) => {
                        expanded.set(false);
                        toaster.error(err.to_string());
                    }
                }
            });
        })
    };

    let chapter_list = chapters();

    rsx! {
        li { class: "book-card",
            if let Some(cover) = cover.as_ref() {
                img { class: "book-card__cover", src: "{cover}", alt: "" }
            }
            div { class: "book-card__body",
                h4 { "{book.title}" }
                p { class: "book-card__author", "{book.author}" }
                if let Some(summary) = book.summary.as_ref() {
                    p { class: "book-card__summary", "{summary}" }
                }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_toggle.call(()),
                    if expanded() { "Hide chapters" } else { "Chapters" }
                }
                if expanded() {
                    match chapter_list {
                        None => rsx! { p { "Loading..." } },
                        Some(list) if list.is_empty() => rsx! { p { class: "empty-state", "No chapters yet." } },
                        Some(list) => rsx! {
                            ol { class: "chapter-list",
                                for chapter in list {
                                    li { "{chapter.title}" }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}
