use dioxus::prelude::*;

use crate::vm::ResultsVm;

fn review_class(is_correct: bool) -> &'static str {
    if is_correct { "correct" } else { "incorrect" }
}

#[component]
pub fn ResultsPanel(vm: ResultsVm) -> Element {
    let tone = vm.tone.class();

    rsx! {
        section { class: "results",
            h3 { "Your Results" }
            div { class: "score-circle {tone}",
                span { class: "band-value", "{vm.band_label}" }
                span { class: "band-label", "Band" }
            }
            dl { class: "score-details",
                dt { "Correct Answers" }
                dd { "{vm.score_label}" }
                dt { "Percentage" }
                dd { "{vm.percentage_label}" }
                if let Some(time) = vm.time_spent_label.clone() {
                    dt { "Time Spent" }
                    dd { "{time}" }
                }
            }
            if !vm.parts.is_empty() {
                div { class: "part-results",
                    h4 { "Results by Part" }
                    for part in vm.parts.clone() {
                        div { class: "part-result",
                            span { "{part.label}" }
                            span { "{part.score_label}" }
                        }
                    }
                }
            }
            if !vm.reviews.is_empty() {
                div { class: "answer-review",
                    h4 { "Answer Review" }
                    for review in vm.reviews.clone() {
                        div { class: "review {review_class(review.is_correct)}",
                            span { class: "review-number", "{review.number_label}" }
                            span { class: "review-verdict", "{review.verdict}" }
                            if let Some(prompt) = review.prompt {
                                p { "{prompt}" }
                            }
                            p { "Your answer: {review.user_answer}" }
                            if let Some(correct) = review.correct_answer {
                                p { "Correct answer: {correct}" }
                            }
                            if let Some(explanation) = review.explanation {
                                p { class: "explanation", "{explanation}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
