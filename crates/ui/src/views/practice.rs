use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use futures::StreamExt;
use prep_core::model::{
    AnswerMap, AnswerValue, PracticeModule, PracticeUnit, Question, SessionContent, UnitId,
};
use prep_core::session::SessionState;
use services::{AudioStatus, SessionIntent, SessionSnapshot};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::results::ResultsPanel;
use crate::vm::{
    format_timer, map_mode_cards, map_results, map_unit_cards, progress_label, timer_tone,
};

#[component]
pub fn PracticeView(module: PracticeModule) -> Element {
    // Keyed so that switching modules tears down the running session.
    rsx! {
        PracticeSession { key: "{module}", module }
    }
}

/// Owns the session driver for one screen.
///
/// The driver lives inside the coroutine. Intents, countdown callbacks and backend
/// replies are handled one at a time, and the snapshot is published after each step so
/// loading and submitting states reach the screen. Dropping the coroutine on unmount
/// drops the driver, which stops its countdown and audio.
#[component]
fn PracticeSession(module: PracticeModule) -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let mut snapshot = use_signal(|| SessionSnapshot::idle(module));

    let session = use_coroutine(move |mut intents: UnboundedReceiver<SessionIntent>| {
        let practice = ctx.practice();
        async move {
            let mut driver = practice.start(module);
            driver.mount();
            loop {
                let next = driver.snapshot();
                if next.requires_login {
                    nav.replace(Route::Login {});
                }
                snapshot.set(next);

                tokio::select! {
                    intent = intents.next() => match intent {
                        Some(intent) => driver.handle(intent),
                        None => break,
                    },
                    Some(event) = driver.next_event() => driver.on_event(event),
                }
            }
            driver.unmount();
        }
    });

    rsx! {
        SessionScreen {
            snapshot: snapshot(),
            on_intent: move |intent| session.send(intent),
        }
    }
}

/// Stateless rendering of a practice session snapshot.
#[component]
pub fn SessionScreen(snapshot: SessionSnapshot, on_intent: EventHandler<SessionIntent>) -> Element {
    let module = snapshot.module;

    rsx! {
        div { class: "page practice",
            h2 { "{module.label()} Practice" }
            if let Some(message) = snapshot.error.clone() {
                div { class: "banner-error",
                    span { "{message}" }
                    button {
                        class: "dismiss",
                        onclick: move |_| on_intent.call(SessionIntent::DismissError),
                        "Dismiss"
                    }
                }
            }
            match snapshot.state.clone() {
                SessionState::Idle => rsx! {
                    if snapshot.requires_login {
                        p {
                            "Please "
                            Link { to: Route::Login {}, "sign in" }
                            " to practise."
                        }
                    } else {
                        p { "Loading..." }
                    }
                },
                SessionState::ModeSelect => rsx! {
                    ModeSelectPanel { module, on_intent }
                },
                SessionState::ContentSelect { loading, .. } => rsx! {
                    UnitSelectPanel { snapshot: snapshot.clone(), loading, on_intent }
                },
                SessionState::Collecting { content, remaining_secs, part_index } => rsx! {
                    CollectingPanel {
                        module,
                        content,
                        remaining_secs,
                        part_index,
                        answers: snapshot.answers.clone(),
                        audio: snapshot.audio,
                        on_intent,
                    }
                },
                SessionState::Submitting { remaining_secs, .. } => rsx! {
                    div { class: "submitting",
                        TimerBadge { remaining_secs }
                        p { "Submitting your answers..." }
                    }
                },
                SessionState::Results(result) => rsx! {
                    ResultsPanel { vm: map_results(&result) }
                    div { class: "results-actions",
                        button {
                            class: "primary",
                            onclick: move |_| on_intent.call(SessionIntent::PracticeAgain),
                            "Practice Again"
                        }
                        Link { to: Route::History { module }, "View History" }
                    }
                },
            }
        }
    }
}

#[component]
fn ModeSelectPanel(module: PracticeModule, on_intent: EventHandler<SessionIntent>) -> Element {
    let cards = map_mode_cards(module);

    rsx! {
        div { class: "mode-select",
            for card in cards {
                button {
                    class: "mode-card",
                    onclick: move |_| on_intent.call(SessionIntent::ChooseMode(card.mode)),
                    h3 { "{card.title}" }
                    p { "{card.duration_label}" }
                }
            }
        }
    }
}

#[component]
fn UnitSelectPanel(
    snapshot: SessionSnapshot,
    loading: bool,
    on_intent: EventHandler<SessionIntent>,
) -> Element {
    let noun = snapshot.module.unit_noun();
    let cards = map_unit_cards(&snapshot.units);

    rsx! {
        div { class: "unit-select",
            button {
                class: "back",
                onclick: move |_| on_intent.call(SessionIntent::Exit),
                "Back"
            }
            if loading {
                p { "Loading..." }
            } else if cards.is_empty() {
                p { "No {noun}s available yet." }
            }
            ul { class: "unit-list",
                for card in cards {
                    li { key: "{card.id}",
                        button {
                            class: "unit-card",
                            disabled: loading,
                            onclick: {
                                let id = card.id.clone();
                                move |_| on_intent.call(SessionIntent::ChooseUnit(id.clone()))
                            },
                            h3 { "{card.title}" }
                            if let Some(meta) = card.meta {
                                p { class: "unit-meta", "{meta}" }
                            }
                            if let Some(description) = card.description {
                                p { "{description}" }
                            }
                            for part in card.parts {
                                p { class: "unit-part", "{part}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CollectingPanel(
    module: PracticeModule,
    content: SessionContent,
    remaining_secs: u32,
    part_index: usize,
    answers: AnswerMap,
    audio: AudioStatus,
    on_intent: EventHandler<SessionIntent>,
) -> Element {
    let total = content.total_questions();
    let part_count = content.parts().len();
    let part = content.part(part_index).cloned();
    let progress = progress_label(answers.count(), total);

    rsx! {
        div { class: "collecting",
            header { class: "session-header",
                h3 { "{content.title()}" }
                TimerBadge { remaining_secs }
                span { class: "progress", "{progress}" }
            }
            if part_count > 1 {
                nav { class: "part-tabs",
                    for index in 0..part_count {
                        PartTab { index, active: index == part_index, on_intent }
                    }
                }
            }
            if let Some(part) = part {
                PartBody { module, part, answers, audio, on_intent }
            }
            div { class: "session-actions",
                button {
                    class: "back",
                    onclick: move |_| on_intent.call(SessionIntent::Exit),
                    "Quit"
                }
                button {
                    class: "primary",
                    onclick: move |_| on_intent.call(SessionIntent::Submit),
                    "Submit Answers"
                }
            }
        }
    }
}

#[component]
fn TimerBadge(remaining_secs: u32) -> Element {
    let tone = timer_tone(remaining_secs);
    let label = format_timer(remaining_secs);

    rsx! {
        span { class: "timer {tone}", "{label}" }
    }
}

#[component]
fn PartTab(index: usize, active: bool, on_intent: EventHandler<SessionIntent>) -> Element {
    let class = if active { "part-tab active" } else { "part-tab" };
    let number = index + 1;

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| on_intent.call(SessionIntent::SelectPart(index)),
            "Part {number}"
        }
    }
}

#[component]
fn PartBody(
    module: PracticeModule,
    part: PracticeUnit,
    answers: AnswerMap,
    audio: AudioStatus,
    on_intent: EventHandler<SessionIntent>,
) -> Element {
    let paragraphs: Vec<String> = part.paragraphs().into_iter().map(str::to_owned).collect();

    rsx! {
        section { class: "part",
            h4 { "{part.title}" }
            if module.has_audio() {
                AudioControls { audio, on_intent }
            } else {
                article { class: "passage",
                    for paragraph in paragraphs {
                        p { "{paragraph}" }
                    }
                }
            }
            ol { class: "questions",
                for question in part.questions.clone() {
                    QuestionCard {
                        key: "{question.id}",
                        answer: answers.get(&part.id, &question.id).cloned(),
                        unit: part.id.clone(),
                        question: question.clone(),
                        on_intent,
                    }
                }
            }
        }
    }
}

#[component]
fn AudioControls(audio: AudioStatus, on_intent: EventHandler<SessionIntent>) -> Element {
    rsx! {
        div { class: "audio-player",
            match audio {
                AudioStatus::Playing => rsx! {
                    span { "Playing audio..." }
                    button {
                        onclick: move |_| on_intent.call(SessionIntent::StopAudio),
                        "Stop"
                    }
                },
                AudioStatus::Idle | AudioStatus::Played => rsx! {
                    button {
                        class: "play",
                        onclick: move |_| on_intent.call(SessionIntent::PlayAudio),
                        if audio == AudioStatus::Played { "Replay Audio" } else { "Play Audio" }
                    }
                },
            }
            p { class: "audio-note", "In the real test you hear the recording only once." }
        }
    }
}

#[component]
fn QuestionCard(
    unit: UnitId,
    question: Question,
    answer: Option<AnswerValue>,
    on_intent: EventHandler<SessionIntent>,
) -> Element {
    let choices: Vec<String> = question.choices().into_iter().map(str::to_owned).collect();
    let selected = answer.as_ref().and_then(AnswerValue::as_choice);
    let text = answer
        .as_ref()
        .and_then(AnswerValue::as_text)
        .unwrap_or_default()
        .to_string();
    let group = format!("{unit}-{}", question.id);

    rsx! {
        li { class: "question",
            p { class: "prompt", "{question.prompt}" }
            if choices.is_empty() {
                input {
                    r#type: "text",
                    placeholder: "Type your answer",
                    value: "{text}",
                    oninput: {
                        let unit = unit.clone();
                        let id = question.id.clone();
                        move |evt: FormEvent| on_intent.call(SessionIntent::Answer {
                            unit: unit.clone(),
                            question: id.clone(),
                            value: AnswerValue::Text(evt.value()),
                        })
                    },
                }
            } else {
                for (index, choice) in choices.into_iter().enumerate() {
                    label { class: "choice",
                        input {
                            r#type: "radio",
                            name: "{group}",
                            checked: selected == u32::try_from(index).ok(),
                            onchange: {
                                let unit = unit.clone();
                                let id = question.id.clone();
                                move |_| {
                                    if let Ok(index) = u32::try_from(index) {
                                        on_intent.call(SessionIntent::Answer {
                                            unit: unit.clone(),
                                            question: id.clone(),
                                            value: AnswerValue::Choice(index),
                                        });
                                    }
                                }
                            },
                        }
                        span { "{choice}" }
                    }
                }
            }
        }
    }
}
