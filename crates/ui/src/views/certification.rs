use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use portal_core::model::{AttemptStatus, TestAction, TestAttempt, TestId};
use services::api::ApiFailure;
use services::{CatalogError, Certificate};

use crate::context::AppContext;
use crate::routes::Route;
use crate::toaster::use_toaster;
use crate::views::certificate::{CertificateDocument, export_certificate};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{TestCardVm, format_timestamp, map_test_cards, parse_track_code};

const REATTEMPT_WARNING: &str = "You cannot reattempt the test after completion unless authorized by your administrator, handler, or manager.";
const INTERRUPTION_WARNING: &str = "If your test session is interrupted, your progress won't be saved. This may result in you having to restart the test or being prevented from making further attempts.";
const VOIDED_NOTE: &str = "This test attempt has been voided and the score is not valid.";

#[component]
pub fn CertificationTestsView(tc: String) -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let mut confirm_start = use_signal(|| None::<TestCardVm>);
    let mut show_attempt = use_signal(|| None::<TestId>);

    let catalog = ctx.catalog();
    let media = ctx.media_domain().clone();
    let code = parse_track_code(&tc);
    let back = code
        .as_ref()
        .map_or(Route::Portal {}, |code| Route::Dashboard {
            tc: code.to_string(),
        });
    let mut resource = use_resource(move || {
        let catalog = catalog.clone();
        let media = media.clone();
        let code = code.clone();
        async move {
            let Some(code) = code else {
                toaster.error(ViewError::InvalidCourse.message());
                return Err(ViewError::InvalidCourse);
            };
            match catalog.certification_tests(&code).await {
                Ok(tests) => Ok(map_test_cards(&tests, &media)),
                Err(CatalogError::NotSignedIn) => Err(ViewError::NotSignedIn),
                Err(err) => {
                    toaster.error(err.to_string());
                    Err(ViewError::Unknown)
                }
            }
        }
    });
    let state = view_state_from_resource(resource);

    let on_card = use_callback(move |card: TestCardVm| match card.action {
        TestAction::Locked => {}
        TestAction::StartTest => confirm_start.set(Some(card)),
        TestAction::ShowResults => show_attempt.set(Some(card.id)),
    });

    rsx! {
        div { class: "page certification-page",
            header { class: "dashboard-header",
                h2 { "Certification Tests" }
                Link { class: "btn btn-secondary", to: back, "Back" }
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
                        p { class: "empty-state", "No certification tests in this track yet." }
                    }
                    ul { class: "test-grid",
                        for card in cards {
                            TestCard { key: "{card.id}", card, on_card }
                        }
                    }
                },
            }
            if let Some(card) = confirm_start() {
                ConfirmStartTest { card, confirm_start }
            }
            if let Some(test_id) = show_attempt() {
                AttemptPanel { test_id, show_attempt }
            }
        }
    }
}

#[component]
fn TestCard(card: TestCardVm, on_card: Callback<TestCardVm>) -> Element {
    let class = if card.interactive {
        "test-card"
    } else {
        "test-card test-card--locked"
    };
    let label = card.action.label();
    let interactive = card.interactive;
    let title = card.title.clone();
    let details = card.details.clone();
    let cover = card.cover.clone();
    rsx! {
        li { class: "{class}",
            if let Some(cover) = cover.as_ref() {
                img { class: "test-card__cover", src: "{cover}", alt: "" }
            }
            h4 { class: "test-card__title", "{title}" }
            p { class: "test-card__details", "{details}" }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !interactive,
                onclick: move |_| on_card.call(card.clone()),
                "{label}"
            }
        }
    }
}

#[component]
fn ConfirmStartTest(card: TestCardVm, confirm_start: Signal<Option<TestCardVm>>) -> Element {
    let navigator = use_navigator();
    let mut confirm_start = confirm_start;
    let route = Route::TakeTest {
        id: card.id.to_string(),
        time: card.time.to_string(),
    };
    rsx! {
        div { class: "modal-overlay",
            div {
                class: "modal confirm-start",
                role: "dialog",
                aria_modal: "true",
                h3 { class: "modal__title modal__title--warning", "Important Info!" }
                p { "{REATTEMPT_WARNING}" }
                p { "{INTERRUPTION_WARNING}" }
                div { class: "modal__actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| confirm_start.set(None),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| {
                            confirm_start.set(None);
                            navigator.push(route.clone());
                        },
                        "Start Test"
                    }
                }
            }
        }
    }
}

fn attempt_failure_message(err: &CatalogError) -> String {
    match err {
        CatalogError::Api(ApiFailure::Rejected { .. }) => "Failed to retrieve score data.".to_owned(),
        CatalogError::Api(_) => "Failed to load test score due to network or API issue.".to_owned(),
        other => other.to_string(),
    }
}

fn status_class(status: AttemptStatus) -> &'static str {
    match status {
        AttemptStatus::Passed => "badge badge--success",
        AttemptStatus::Voided | AttemptStatus::Failed => "badge badge--danger",
    }
}

#[component]
fn AttemptPanel(test_id: TestId, show_attempt: Signal<Option<TestId>>) -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let mut show_attempt = show_attempt;

    let catalog = ctx.catalog();
    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            catalog.test_attempt(test_id).await.map_err(|err| {
                tracing::warn!(error = %err, %test_id, "attempt not loaded");
                toaster.error(attempt_failure_message(&err));
                ViewError::Unknown
            })
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "modal-overlay",
            div {
                class: "modal attempt",
                role: "dialog",
                aria_modal: "true",
                div { class: "modal__header",
                    h3 { class: "modal__title", "Test Results" }
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| show_attempt.set(None),
                        "Close"
                    }
                }
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(_) => rsx! {
                        p { class: "empty-state", "No score data available." }
                    },
                    ViewState::Ready(attempt) => rsx! {
                        AttemptDetails { attempt }
                    },
                }
            }
        }
    }
}

#[component]
fn AttemptDetails(attempt: TestAttempt) -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_toaster();
    let status = attempt.status();
    let certificate = Certificate::from_attempt(&attempt).ok();
    let attempted = if attempt.is_attempted {
        "Attempted"
    } else {
        "Not Attempted"
    };
    let attempt_time = format_timestamp(&attempt.attempt_time);
    let expires = attempt
        .test
        .expires
        .as_deref()
        .map(format_timestamp)
        .unwrap_or_default();
    let holder = attempt.holder.full_name();
    let certificate_dir = ctx.certificate_dir().to_path_buf();

    let on_export = use_callback(move |certificate: Certificate| {
        match export_certificate(&certificate, &certificate_dir) {
            Ok(path) => {
                toaster.success(format!("Certificate saved to {}", path.display()));
            }
            Err(err) => {
                toaster.error(err.to_string());
            }
        }
    });

    rsx! {
        if let Some(certificate) = certificate {
            div { class: "certificate-preview",
                CertificateDocument { certificate: certificate.clone() }
                button {
                    class: "btn btn-primary",
                    id: "download-btn",
                    r#type: "button",
                    onclick: move |_| on_export.call(certificate.clone()),
                    "Download Certificate"
                }
            }
        }
        div { class: "attempt-grid",
            div { class: "attempt-card",
                h4 { "User Details" }
                p { strong { "Name: " } "{holder}" }
                p { strong { "Email: " } "{attempt.holder.email}" }
            }
            div { class: "attempt-card",
                h4 { "Test Details" }
                p { strong { "Test Title: " } "{attempt.test.title}" }
                p { strong { "Pass Mark: " } "{attempt.test.pass_mark}%" }
                p { strong { "Expires: " } "{expires}" }
            }
            div { class: "attempt-card",
                div { class: "attempt-card__header",
                    h4 { "Score & Attempt" }
                    span { class: status_class(status), "{status.label()}" }
                }
                p { strong { "Attempt Time: " } "{attempt_time}" }
                p { strong { "Attempt Status: " } "{attempted}" }
            }
        }
        if status == AttemptStatus::Voided {
            div { class: "notice notice--danger", "{VOIDED_NOTE}" }
        }
    }
}
