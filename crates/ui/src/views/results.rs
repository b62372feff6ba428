use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::{PracticeResults, ResultsError};

use crate::context::AppContext;
use crate::routes::Route;
use crate::toaster::use_toaster;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn PracticeResultsView(id: String, passed: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toaster = use_toaster();
    let mut saving = use_signal(|| false);

    let results_service = ctx.results();
    let resource = use_resource(move || {
        let results_service = results_service.clone();
        let id = id.clone();
        let passed = passed.clone();
        async move {
            match results_service.load(Some(&id), Some(&passed)).await {
                Ok(results) => Ok(results),
                Err(ResultsError::InvalidCourse) => {
                    toaster.error(ViewError::InvalidCourse.message());
                    navigator.replace(Route::Portal {});
                    Err(ViewError::InvalidCourse)
                }
                Err(err) => {
                    toaster.error(err.to_string());
                    Err(ViewError::Unknown)
                }
            }
        }
    });
    let state = view_state_from_resource(resource);

    let on_continue = {
        let results_service = ctx.results();
        use_callback(move |results: PracticeResults| {
            if saving() {
                return;
            }
            let results_service = results_service.clone();
            spawn(async move {
                saving.set(true);
                let report = results_service.save_performance(&results).await;
                saving.set(false);
                match report {
                    Ok(report) => {
                        toaster.notify_all(report.notices);
                        if let Some(destination) = report.destination {
                            navigator.push(Route::from(destination));
                        }
                    }
                    Err(err) => {
                        toaster.error(err.to_string());
                    }
                }
            });
        })
    };

    rsx! {
        div { class: "page results-page",
            h2 { "Practice Results" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(results) => rsx! {
                    ResultsBody { results, saving: saving(), on_continue }
                },
            }
        }
    }
}

#[component]
fn ResultsBody(results: PracticeResults, saving: bool, on_continue: Callback<PracticeResults>) -> Element {
    let score = results.score_percent();
    let passed = results.passed;
    let wrong = results.wrong();
    let answered = results.answered();
    let corrections = results.corrections.clone();

    rsx! {
        section { class: "results-score",
            div { class: "results-score__value", "{score}%" }
            p { "{passed} correct · {wrong} wrong · {answered} answered" }
        }
        section { class: "corrections",
            h3 { "Corrections" }
            if corrections.is_empty() {
                p { class: "empty-state", "No corrections. Every answer was right." }
            }
            ol { class: "corrections__list",
                for (index, question) in corrections.iter().enumerate() {
                    li { key: "{index}", class: "correction",
                        p { class: "correction__prompt", "{question.prompt()}" }
                        p { class: "correction__answer",
                            strong { "Answer: " }
                            "{question.answer()}"
                        }
                        if let Some(explanation) = question.explanation() {
                            p { class: "correction__explanation", "{explanation}" }
                        }
                    }
                }
            }
        }
        div { class: "results-actions",
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: saving,
                onclick: move |_| on_continue.call(results.clone()),
                if saving { "Saving..." } else { "Continue" }
            }
        }
    }
}
