use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use services::Destination;

use crate::context::AppContext;
use crate::toaster::use_toaster;
use crate::views::{
    CertificationTestsView, CompleteProfileView, DashboardView, LoginView, PortalView,
    PracticeQuestView, PracticeResultsView, SignupView, TakeTestView,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", LoginView)] Login {},
    #[route("/signup", SignupView)] Signup {},
    #[layout(PortalLayout)]
        #[route("/portal", PortalView)] Portal {},
        #[route("/portal/dashboard?:tc", DashboardView)] Dashboard { tc: String },
        #[route("/portal/practice-quest?:id&:time", PracticeQuestView)] PracticeQuest { id: String, time: String },
        #[route("/portal/practice-quest/results?:id&:passed", PracticeResultsView)] PracticeResults { id: String, passed: String },
        #[route("/certification-tests?:tc", CertificationTestsView)] CertificationTests { tc: String },
        #[route("/certification-tests/take-test?:id&:time", TakeTestView)] TakeTest { id: String, time: String },
        #[route("/complete-profile", CompleteProfileView)] CompleteProfile {},
}

impl From<Destination> for Route {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Login => Route::Login {},
            Destination::Portal => Route::Portal {},
            Destination::TrackDashboard { code } => Route::Dashboard {
                tc: code.as_str().to_owned(),
            },
            Destination::PracticeResults { test_id, passed } => Route::PracticeResults {
                id: test_id.to_string(),
                passed: passed.to_string(),
            },
            Destination::CertificationTests { code } => Route::CertificationTests {
                tc: code.as_str().to_owned(),
            },
        }
    }
}

/// Frame for every signed-in screen. A missing or stale session goes back to login.
#[component]
fn PortalLayout() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toaster = use_toaster();
    let account = ctx.account();

    let user = use_resource(move || {
        let account = account.clone();
        async move {
            match account.enforce_session().await {
                Ok(Some(user)) => Some(user),
                Ok(None) => {
                    navigator.replace(Route::Login {});
                    None
                }
                Err(err) => {
                    tracing::warn!(error = %err, "session check failed");
                    navigator.replace(Route::Login {});
                    None
                }
            }
        }
    });
    let display_name = user
        .value()
        .read()
        .as_ref()
        .and_then(Option::as_ref)
        .map(|user| user.display_name())
        .unwrap_or_default();

    let on_logout = {
        let account = ctx.account();
        use_callback(move |()| {
            let account = account.clone();
            spawn(async move {
                if let Err(err) = account.logout().await {
                    toaster.error(err.to_string());
                    return;
                }
                navigator.replace(Route::Login {});
            });
        })
    };

    rsx! {
        div { class: "portal",
            header { class: "portal-header",
                h1 { class: "portal-header__brand", "LearningPost Pro" }
                nav { class: "portal-header__nav",
                    Link { to: Route::Portal {}, "Learning Tracks" }
                    Link { to: Route::CompleteProfile {}, "Profile" }
                }
                div { class: "portal-header__user",
                    span { class: "portal-header__name", "{display_name}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_logout.call(()),
                        "Log out"
                    }
                }
            }
            main { class: "portal-content",
                Outlet::<Route> {}
            }
        }
    }
}
