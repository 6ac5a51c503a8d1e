use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use prep_core::model::PracticeModule;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryRowVm, HistoryVm, map_history};

#[component]
pub fn HistoryView(module: PracticeModule) -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let history = ctx.history();

    let resource = use_resource(use_reactive!(|module| {
        let history = history.clone();
        async move {
            let report = history.load(module).await.map_err(ViewError::from)?;
            Ok::<HistoryVm, ViewError>(map_history(&report))
        }
    }));

    // The token is already cleared by the client; send the user to sign in.
    use_effect(move || {
        if matches!(
            view_state_from_resource(&resource),
            ViewState::Error(ViewError::Unauthorized)
        ) {
            nav.replace(Route::Login {});
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page history",
            h2 { "{module.label()} History" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    div { class: "history-stats",
                        div { span { "Sessions" } strong { "{vm.sessions_label}" } }
                        div { span { "Average band" } strong { "{vm.average_band_label}" } }
                        div { span { "Highest band" } strong { "{vm.highest_band_label}" } }
                        div { span { "Recent" } strong { "{vm.recent_label}" } }
                    }
                    if vm.rows.is_empty() {
                        p { "No sessions yet. "
                            Link { to: Route::Practice { module }, "Start practising" }
                        }
                    } else {
                        ul { class: "history-list",
                            for row in vm.rows {
                                HistoryRow { row }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn HistoryRow(row: HistoryRowVm) -> Element {
    let tone = row.tone.class();

    rsx! {
        li { class: "history-row",
            span { class: "history-title", "{row.title}" }
            span { class: "band {tone}", "Band {row.band_label}" }
            if let Some(score) = row.score_label {
                span { "{score}" }
            }
            if let Some(time) = row.time_label {
                span { "{time}" }
            }
            if let Some(date) = row.date_label {
                span { class: "history-date", "{date}" }
            }
        }
    }
}
