use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::ServiceError;

use crate::context::AppContext;
use crate::routes::Route;

fn login_error_message(err: &ServiceError) -> String {
    match err {
        ServiceError::Unauthorized => "Invalid email or password.".into(),
        ServiceError::InvalidInput(message) => message.clone(),
        other => format!("Sign in failed: {other}"),
    }
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut signing_up = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        if busy() {
            return;
        }
        let auth = ctx.auth_service();
        busy.set(true);
        error.set(None);
        spawn(async move {
            let outcome = if signing_up() {
                auth.signup(&email(), &password(), &name()).await
            } else {
                auth.login(&email(), &password()).await
            };
            busy.set(false);
            match outcome {
                Ok(_) => {
                    nav.replace(Route::Hub {});
                }
                Err(err) => error.set(Some(login_error_message(&err))),
            }
        });
    };

    let title = if signing_up() { "Create account" } else { "Sign in" };
    let toggle_label = if signing_up() {
        "Already have an account? Sign in"
    } else {
        "New here? Create an account"
    };

    rsx! {
        div { class: "page login",
            h2 { "{title}" }
            if let Some(message) = error() {
                p { class: "banner-error", "{message}" }
            }
            if signing_up() {
                label { "Name"
                    input {
                        r#type: "text",
                        value: "{name}",
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
            }
            label { "Email"
                input {
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
            }
            label { "Password"
                input {
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
            }
            button {
                class: "primary",
                disabled: busy(),
                onclick: submit,
                if busy() { "Please wait..." } else { "{title}" }
            }
            button {
                class: "link",
                onclick: move |_| signing_up.toggle(),
                "{toggle_label}"
            }
        }
    }
}
