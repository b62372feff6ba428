use std::sync::Arc;
use std::time::Duration;

use dioxus::core::Task;
use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::{Navigator, use_navigator};
use portal_core::quiz::QuizMode;
use services::QuizLoopService;
use services::smartlink::{search_url, snippet};
use tokio::time::Instant;

use crate::context::AppContext;
use crate::routes::Route;
use crate::toaster::{Toaster, use_toaster};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizEffect, QuizIntent, QuizVm, start_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const TICK: Duration = Duration::from_secs(1);
const SELECTION_SCRIPT: &str = "return window.getSelection ? window.getSelection().toString() : '';";
const LOOKUP_SNIPPET_CHARS: usize = 40;

#[component]
pub fn PracticeQuestView(id: String, time: String) -> Element {
    rsx! {
        QuizView { mode: QuizMode::Practice, id, time }
    }
}

#[component]
pub fn TakeTestView(id: String, time: String) -> Element {
    rsx! {
        QuizView { mode: QuizMode::Certification, id, time }
    }
}

/// Everything the delayed steps of a quiz need once the triggering event is gone.
#[derive(Clone)]
struct QuizRunner {
    vm: Signal<Option<QuizVm>>,
    submitting: Signal<bool>,
    ticker: Signal<Option<Task>>,
    quiz_loop: Arc<QuizLoopService>,
    toaster: Toaster,
    navigator: Navigator,
}

impl QuizRunner {
    fn apply(&self, intent: QuizIntent) -> QuizEffect {
        let mut vm = self.vm;
        let (effect, advanced) = {
            let mut guard = vm.write();
            let Some(vm) = guard.as_mut() else {
                return QuizEffect::None;
            };
            let before = vm.session().index();
            let effect = vm.apply(intent);
            (effect, vm.session().index() != before && !vm.is_finished())
        };
        if advanced {
            self.restart_ticker();
        }
        effect
    }

    /// Starts a fresh one-second countdown for the question on screen,
    /// cancelling the previous one. This is the only periodic task of the
    /// screen and it stops with the view.
    fn restart_ticker(&self) {
        let mut ticker = self.ticker;
        if let Some(task) = ticker.write().take() {
            task.cancel();
        }
        let runner = self.clone();
        let task = spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + TICK, TICK);
            loop {
                interval.tick().await;
                runner.dispatch(QuizIntent::Tick);
            }
        });
        ticker.set(Some(task));
    }

    fn dispatch(&self, intent: QuizIntent) {
        let effect = self.apply(intent);
        if effect != QuizEffect::None {
            spawn(self.clone().settle(effect));
        }
    }

    async fn settle(self, mut effect: QuizEffect) {
        loop {
            match effect {
                QuizEffect::None => return,
                QuizEffect::ResolveAfter(delay) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    effect = self.apply(QuizIntent::Resolve);
                }
                QuizEffect::SubmitAfter(delay) => {
                    tokio::time::sleep(delay).await;
                    self.submit().await;
                    return;
                }
            }
        }
    }

    async fn submit(&self) {
        let mut submitting = self.submitting;
        if submitting() {
            return;
        }
        let finished = self
            .vm
            .read()
            .as_ref()
            .map(|vm| (vm.test_id(), vm.session().clone()));
        let Some((test_id, session)) = finished else {
            return;
        };
        submitting.set(true);
        match self.quiz_loop.submit(test_id, &session).await {
            Ok(report) => {
                self.toaster.notify_all(report.notices);
                if let Some(destination) = report.destination {
                    self.navigator.push(Route::from(destination));
                }
            }
            Err(err) => {
                self.toaster.error(err.to_string());
            }
        }
        submitting.set(false);
    }
}

#[component]
fn QuizView(mode: QuizMode, id: String, time: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toaster = use_toaster();
    let vm = use_signal(|| None::<QuizVm>);
    let submitting = use_signal(|| false);
    let ticker = use_signal(|| None::<Task>);
    let mut lookup = use_signal(|| None::<(String, String)>);

    let quiz_loop = ctx.quiz_loop();
    let runner = QuizRunner {
        vm,
        submitting,
        ticker,
        quiz_loop: quiz_loop.clone(),
        toaster,
        navigator,
    };

    let starter = runner.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        let id = id.clone();
        let time = time.clone();
        let runner = starter.clone();
        let mut vm = vm;
        async move {
            match start_quiz(&quiz_loop, mode, &id, &time).await {
                Ok(started) => {
                    vm.set(Some(started));
                    runner.restart_ticker();
                    Ok(())
                }
                Err(err) => {
                    match err {
                        ViewError::EmptyQuiz => toaster.info(err.message()),
                        _ => toaster.error(err.message()),
                    };
                    Err(err)
                }
            }
        }
    });
    let state = view_state_from_resource(resource);

    let dispatch = {
        let runner = runner.clone();
        use_callback(move |intent: QuizIntent| runner.dispatch(intent))
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let on_lookup = use_callback(move |()| {
        spawn(async move {
            let selected = eval(SELECTION_SCRIPT).join::<String>().await.unwrap_or_default();
            lookup.set(search_url(&selected).map(|url| {
                (snippet(selected.trim(), LOOKUP_SNIPPET_CHARS), url.to_string())
            }));
        });
    });

    let vm_guard = vm.read();
    let title = vm_guard.as_ref().map_or(
        match mode {
            QuizMode::Practice => "Practice Quest",
            QuizMode::Certification => "Certification Test",
        },
        QuizVm::title,
    );
    let question_label = vm_guard.as_ref().map(QuizVm::question_label);
    let prompt = vm_guard.as_ref().and_then(QuizVm::prompt).map(str::to_owned);
    let comprehension = vm_guard
        .as_ref()
        .and_then(QuizVm::comprehension)
        .map(str::to_owned);
    let diagram = vm_guard
        .as_ref()
        .and_then(|vm| vm.diagram_url(ctx.media_domain()));
    let options = vm_guard.as_ref().map(QuizVm::options).unwrap_or_default();
    let progress = vm_guard.as_ref().map_or(0, QuizVm::progress_percent);
    let countdown = vm_guard
        .as_ref()
        .filter(|vm| vm.is_timed())
        .map(QuizVm::countdown_label);
    let explanation = vm_guard
        .as_ref()
        .and_then(QuizVm::explanation)
        .map(str::to_owned);
    let finished = vm_guard.as_ref().is_some_and(QuizVm::is_finished);
    drop(vm_guard);
    let lookup_link = lookup();

    rsx! {
        div { class: "page quiz-page",
            header { class: "quiz-header",
                h2 { class: "quiz-header__title", "{title}" }
                if let Some(label) = question_label.as_ref() {
                    span { class: "quiz-header__count", "{label}" }
                }
                if let Some(countdown) = countdown.as_ref() {
                    span { class: "quiz-header__timer", id: "quiz-timer", "{countdown}" }
                }
            }
            div { class: "progress quiz-progress",
                div { class: "progress__bar", style: "width: {progress}%" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { class: "quiz-loading", "Loading questions..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            navigator.push(Route::Portal {});
                        },
                        "Back to portal"
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if finished {
                        div { class: "quiz-finished",
                            h3 { "All done" }
                            p {
                                if submitting() { "Saving your answers..." } else { "Wrapping up..." }
                            }
                        }
                    } else {
                        if let Some(passage) = comprehension.as_ref() {
                            blockquote { class: "quiz-comprehension", "{passage}" }
                        }
                        if let Some(prompt) = prompt.as_ref() {
                            p { class: "quiz-prompt", "{prompt}" }
                        }
                        if let Some(diagram) = diagram.as_ref() {
                            img { class: "quiz-diagram", src: "{diagram}", alt: "Question diagram" }
                        }
                        ul { class: "quiz-options",
                            for option in options {
                                li { key: "{option.position}",
                                    button {
                                        class: "{option.class}",
                                        r#type: "button",
                                        onclick: move |_| dispatch.call(QuizIntent::Tap(option.position)),
                                        span { class: "quiz-option__label", "{option.label}" }
                                        span { class: "quiz-option__text", "{option.text}" }
                                    }
                                }
                            }
                        }
                        p { class: "quiz-hint", "Tap an option to select it, tap it again to confirm." }
                    }
                },
            }
            if let Some(text) = explanation.as_ref() {
                div { class: "modal-overlay",
                    div {
                        class: "modal explanation",
                        role: "dialog",
                        aria_modal: "true",
                        h3 { class: "modal__title", "Explanation" }
                        p { class: "explanation__text", "{text}" }
                        div { class: "smartlink",
                            button {
                                class: "btn btn-link",
                                r#type: "button",
                                onclick: move |_| on_lookup.call(()),
                                "SmartLink: look up selected text"
                            }
                            if let Some((label, href)) = lookup_link.as_ref() {
                                a {
                                    class: "smartlink__result",
                                    href: "{href}",
                                    target: "_blank",
                                    "Search \"{label}\""
                                }
                            }
                        }
                        div { class: "modal__actions",
                            button {
                                class: "btn btn-primary",
                                id: "explanation-continue",
                                r#type: "button",
                                onclick: move |_| {
                                    lookup.set(None);
                                    dispatch.call(QuizIntent::DismissExplanation);
                                },
                                "Continue"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self, intent: QuizIntent) {
        if let Some(dispatch) = *self.dispatch.borrow() {
            dispatch.call(intent);
        }
    }

    pub(crate) fn question_count(&self) -> Option<usize> {
        let vm = (*self.vm.borrow())?;
        let guard = vm.read();
        guard.as_ref().map(|vm| vm.session().len())
    }
}
