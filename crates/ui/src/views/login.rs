use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::toaster::use_toaster;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toaster = use_toaster();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    // A user who already signed in today skips the form.
    let account = ctx.account();
    use_future(move || {
        let account = account.clone();
        async move {
            if matches!(account.has_active_session().await, Ok(true)) {
                navigator.replace(Route::Portal {});
            }
        }
    });

    let on_submit = {
        let account = ctx.account();
        use_callback(move |()| {
            if submitting() {
                return;
            }
            let account = account.clone();
            let (email, password) = (email(), password());
            spawn(async move {
                submitting.set(true);
                let result = account.login(&email, &password).await;
                submitting.set(false);
                match result {
                    Ok(outcome) => {
                        toaster.success(outcome.message);
                        navigator.push(Route::Portal {});
                    }
                    Err(err) => {
                        toaster.error(err.to_string());
                    }
                }
            });
        })
    };

    rsx! {
        div { class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                h2 { class: "auth-card__title", "Sign in" }
                label { r#for: "login-email", "Email" }
                input {
                    id: "login-email",
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                label { r#for: "login-password", "Password" }
                input {
                    id: "login-password",
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
                p { class: "auth-card__switch",
                    "New here? "
                    Link { to: Route::Signup {}, "Create an account" }
                }
            }
        }
    }
}
