use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "IELTS Prep" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| {
                    log::error!("render failed: {errors:?}");
                    rsx! {
                        div { class: "fatal",
                            h1 { "The practice screen stopped unexpectedly" }
                            p { "Restart the app to continue. Submitted sessions are kept in your history." }
                            pre { "{errors:?}" }
                        }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
