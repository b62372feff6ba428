use std::time::Duration;

use dioxus::prelude::*;
use services::Toast;

use crate::toaster::use_toaster;

#[component]
pub fn ToastHost() -> Element {
    let toaster = use_toaster();
    let toasts = toaster.snapshot();
    let auto_hide = toaster.auto_hide();

    rsx! {
        div { class: "toast-stack", aria_live: "polite",
            for toast in toasts {
                ToastItem { key: "{toast.id}", toast, auto_hide }
            }
        }
    }
}

#[component]
fn ToastItem(toast: Toast, auto_hide: Duration) -> Element {
    let toaster = use_toaster();
    let id = toast.id;
    // One expiry task per toast; it dies with the item if closed by hand.
    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(auto_hide).await;
            toaster.dismiss(id);
        })
    });

    rsx! {
        div { class: "toast {toast.severity.css_class()}", role: "status",
            span { class: "toast__text", "{toast.text}" }
            button {
                class: "toast__close",
                r#type: "button",
                aria_label: "Close",
                onclick: move |_| {
                    toaster.dismiss(id);
                },
                "×"
            }
        }
    }
}
