use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::AppContext;
use crate::routes::Route;
use crate::toaster::use_toaster_provider;
use crate::views::ToastHost;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    use_toaster_provider(ctx.clock());

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Screens render their own headings.
        document::Title { "LearningPost Pro" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
            // Outside the router so toasts outlive navigation.
            ToastHost {}
        }
    }
}
