use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use prep_core::model::PracticeModule;

use crate::context::AppContext;
use crate::views::{HistoryView, LoginView, PracticeHubView, PracticeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login", LoginView)] Login {},
    #[layout(Layout)]
        #[route("/", PracticeHubView)] Hub {},
        #[route("/practice/:module", PracticeView)] Practice { module: PracticeModule },
        #[route("/history/:module", HistoryView)] History { module: PracticeModule },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let auth_service = ctx.auth_service();

    rsx! {
        nav { class: "sidebar",
            h1 { "IELTS Prep" }
            ul {
                li { Link { to: Route::Hub {}, "Practice" } }
                for module in PracticeModule::ALL {
                    li { Link { to: Route::Practice { module }, "{module.label()}" } }
                }
                for module in PracticeModule::ALL {
                    li { Link { to: Route::History { module }, "{module.label()} history" } }
                }
            }
            button {
                class: "sign-out",
                onclick: move |_| {
                    auth_service.logout();
                    nav.replace(Route::Login {});
                },
                "Sign out"
            }
        }
    }
}
