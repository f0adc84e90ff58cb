use std::time::Duration;

use dioxus::prelude::*;

use canteen_common::phone::format_phone;
use canteen_common::user::{RegistrationForm, CLASSES, MIN_PASSWORD_LEN};

use super::api_actions::{sleep, use_api_action, ApiAction};
use super::api_client::ApiClient;
use super::app::Route;
use super::shared_state::use_shared_state;
use super::user_state::use_user_state;

#[component]
pub fn RegisterView() -> Element {
    let mut user_state = use_user_state();
    let shared_state = use_shared_state();
    let api = use_api_action();
    let nav = use_navigator();

    let mut form = use_signal(RegistrationForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut success = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = match form.read().to_request() {
            Ok(r) => r,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let client = ApiClient::new(shared_state.read().config.clone());
        error.set(None);
        submitting.set(true);
        spawn(async move {
            match client.register(&request).await {
                Ok((user, message)) => {
                    tracing::info!("Registered {}", user.email);
                    success.set(Some(if message.is_empty() {
                        "Account created!".to_string()
                    } else {
                        message
                    }));
                    sleep(Duration::from_secs(1)).await;
                    let is_admin = user.is_admin();
                    user_state.write().set_user(user);
                    api.send(ApiAction::RefreshOrders);
                    nav.replace(Route::dashboard(is_admin));
                }
                Err(e) => {
                    tracing::warn!("Registration failed: {e}");
                    error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    let current = form.read().clone();

    rsx! {
        div { class: "canteen-app",
            div { class: "auth-card",
                h1 { "Create account" }
                form { onsubmit: submit,
                    div { class: "form-group",
                        label { "Full name" }
                        input {
                            r#type: "text",
                            value: "{current.name}",
                            oninput: move |evt| form.write().name = evt.value(),
                        }
                    }
                    div { class: "form-group",
                        label { "Registration number" }
                        input {
                            r#type: "text",
                            value: "{current.registration}",
                            oninput: move |evt| form.write().registration = evt.value(),
                        }
                    }
                    div { class: "form-group",
                        label { "Class" }
                        select {
                            value: "{current.class_name}",
                            onchange: move |evt| form.write().class_name = evt.value(),
                            option { value: "", "Select your class" }
                            for class in CLASSES.iter() {
                                option { value: "{class}", "{class}" }
                            }
                        }
                    }
                    div { class: "form-group",
                        label { "Email" }
                        input {
                            r#type: "email",
                            value: "{current.email}",
                            oninput: move |evt| form.write().email = evt.value(),
                        }
                    }
                    div { class: "form-group",
                        label { "Phone" }
                        input {
                            r#type: "tel",
                            placeholder: "(11) 98765-4321",
                            value: "{current.phone}",
                            oninput: move |evt| form.write().phone = format_phone(&evt.value()),
                        }
                    }
                    div { class: "form-group",
                        label { "Password (at least {MIN_PASSWORD_LEN} characters)" }
                        input {
                            r#type: "password",
                            value: "{current.password}",
                            oninput: move |evt| form.write().password = evt.value(),
                        }
                    }
                    div { class: "form-group",
                        label { "Confirm password" }
                        input {
                            r#type: "password",
                            value: "{current.confirm_password}",
                            oninput: move |evt| form.write().confirm_password = evt.value(),
                        }
                    }
                    if let Some(err) = error.read().as_ref() {
                        p { class: "field-error", "{err}" }
                    }
                    if let Some(msg) = success.read().as_ref() {
                        p { class: "form-success", "{msg}" }
                    }
                    button {
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Creating account..." } else { "Register" }
                    }
                }
                p { class: "auth-switch",
                    "Already registered? "
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
