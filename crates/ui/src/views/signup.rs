use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::api::SignupForm;

use crate::context::AppContext;
use crate::routes::Route;
use crate::toaster::use_toaster;

#[component]
pub fn SignupView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let toaster = use_toaster();
    let mut form = use_signal(SignupForm::default);
    let mut confirm = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let on_submit = {
        let account = ctx.account();
        use_callback(move |()| {
            if submitting() {
                return;
            }
            let account = account.clone();
            let (form, confirm) = (form(), confirm());
            spawn(async move {
                submitting.set(true);
                let result = account.signup(&form, &confirm).await;
                submitting.set(false);
                match result {
                    Ok(message) => {
                        toaster.success(message);
                        navigator.push(Route::Login {});
                    }
                    Err(err) => {
                        toaster.error(err.to_string());
                    }
                }
            });
        })
    };

    let current = form();
    rsx! {
        div { class: "auth-page",
            form {
                class: "auth-card",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_submit.call(());
                },
                h2 { class: "auth-card__title", "Create your account" }
                div { class: "auth-card__row",
                    input {
                        id: "signup-first-name",
                        placeholder: "First name",
                        value: "{current.first_name}",
                        oninput: move |evt| form.write().first_name = evt.value(),
                    }
                    input {
                        id: "signup-last-name",
                        placeholder: "Last name",
                        value: "{current.last_name}",
                        oninput: move |evt| form.write().last_name = evt.value(),
                    }
                }
                input {
                    id: "signup-email",
                    r#type: "email",
                    placeholder: "Email",
                    value: "{current.email}",
                    oninput: move |evt| form.write().email = evt.value(),
                }
                input {
                    id: "signup-password",
                    r#type: "password",
                    placeholder: "Password",
                    value: "{current.password}",
                    oninput: move |evt| form.write().password = evt.value(),
                }
                input {
                    id: "signup-confirm",
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: "{confirm}",
                    oninput: move |evt| confirm.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    "Sign up"
                }
                p { class: "auth-card__switch",
                    "Already registered? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
