use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use portal_core::time::fixed_clock;
use serde_json::{Value, json};
use services::api::{Endpoints, ScriptedTransport};
use services::{
    AccountService, AppServices, CatalogService, Clock, ProfileService, QuizLoopService,
    ResultsService,
};
use url::Url;

use crate::context::{UiApp, build_app_context};
use crate::toaster::{Toaster, use_toaster_provider};
use crate::views::quiz::QuizTestHandles;
use crate::views::{
    CertificationTestsView, DashboardView, PortalView, PracticeQuestView, PracticeResultsView,
    TakeTestView, ToastHost,
};

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn media_domain(&self) -> Url {
        self.services.api().endpoints().domain().clone()
    }

    fn certificate_dir(&self) -> PathBuf {
        std::env::temp_dir().join("portal-ui-certificates")
    }

    fn account(&self) -> Arc<AccountService> {
        self.services.account()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn results(&self) -> Arc<ResultsService> {
        self.services.results()
    }

    fn profile(&self) -> Arc<ProfileService> {
        self.services.profile()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    /// Only the toast host, for driving the toaster directly.
    Blank,
    Portal,
    Dashboard(String),
    PracticeQuest { id: String, time: String },
    PracticeResults { id: String, passed: String },
    TakeTest { id: String, time: String },
    CertificationTests(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
    toaster: Rc<Cell<Option<Toaster>>>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    let toaster = use_toaster_provider(ctx.clock());
    use_hook(|| props.toaster.set(Some(toaster)));
    use_context_provider(|| props.view.clone());
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! {
        Router::<TestRoute> {}
        ToastHost {}
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Blank => rsx! {},
        ViewKind::Portal => rsx! { PortalView {} },
        ViewKind::Dashboard(tc) => rsx! { DashboardView { tc } },
        ViewKind::PracticeQuest { id, time } => rsx! { PracticeQuestView { id, time } },
        ViewKind::PracticeResults { id, passed } => rsx! { PracticeResultsView { id, passed } },
        ViewKind::TakeTest { id, time } => rsx! { TakeTestView { id, time } },
        ViewKind::CertificationTests(tc) => rsx! { CertificationTestsView { tc } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub transport: Arc<ScriptedTransport>,
    pub quiz_handles: Option<QuizTestHandles>,
    toaster: Rc<Cell<Option<Toaster>>>,
}

impl ViewHarness {
    /// Toast handle of the mounted tree. Call after `rebuild`.
    pub fn toaster(&self) -> Toaster {
        self.toaster.get().expect("toaster is provided on first render")
    }

    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let resources settle over a few rounds of async work.
    pub async fn settle(&mut self) {
        for _ in 0..6 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn user_json() -> Value {
    json!({
        "username": "ada",
        "email": "ada@example.com",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "lastLogin": "14-11-2023"
    })
}

/// Build a signed-in view. `script` queues the backend replies the view needs.
pub async fn setup_view_harness(
    view: ViewKind,
    script: impl FnOnce(&ScriptedTransport),
) -> ViewHarness {
    let transport = Arc::new(ScriptedTransport::new());
    let endpoints = Endpoints::parse("https://api.example.test").expect("endpoints");
    let services = AppServices::in_memory(transport.clone(), endpoints, fixed_clock());
    let quiz_loop =
        QuizLoopService::new(services.api().clone(), services.session()).with_canonical_order();
    let services = services.with_quiz_loop(quiz_loop);

    transport.respond_json(
        "professional-login",
        json!({"success": true, "message": "Welcome back", "data": {"user": user_json()}}),
    );
    services
        .account()
        .login("ada@example.com", "secret")
        .await
        .expect("login");
    script(&transport);

    let quiz_handles = match view {
        ViewKind::PracticeQuest { .. } | ViewKind::TakeTest { .. } => {
            Some(QuizTestHandles::default())
        }
        _ => None,
    };
    let toaster = Rc::new(Cell::new(None));
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { services }),
            view,
            quiz_handles: quiz_handles.clone(),
            toaster: toaster.clone(),
        },
    );

    ViewHarness {
        dom,
        transport,
        quiz_handles,
        toaster,
    }
}
