use dioxus::prelude::*;
use dioxus_router::Link;
use prep_core::model::PracticeModule;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::map_mode_cards;

#[component]
pub fn PracticeHubView() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        div { class: "page hub",
            h2 { "Practice" }
            if !ctx.is_signed_in() {
                p { class: "banner-error",
                    "You are signed out. "
                    Link { to: Route::Login {}, "Sign in" }
                    " to start practising."
                }
            }
            div { class: "module-grid",
                for module in PracticeModule::ALL {
                    ModuleCard { module }
                }
            }
        }
    }
}

#[component]
fn ModuleCard(module: PracticeModule) -> Element {
    let modes = map_mode_cards(module);

    rsx! {
        div { class: "module-card",
            h3 { "{module.label()}" }
            ul {
                for mode in modes {
                    li { "{mode.title}: {mode.duration_label}" }
                }
            }
            Link { class: "primary", to: Route::Practice { module }, "Start {module.label()}" }
            Link { to: Route::History { module }, "History" }
        }
    }
}
