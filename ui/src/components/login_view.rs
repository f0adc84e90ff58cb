use std::time::Duration;

use dioxus::prelude::*;

use canteen_common::user::Credentials;

use super::api_actions::{sleep, use_api_action, ApiAction};
use super::api_client::ApiClient;
use super::app::Route;
use super::shared_state::use_shared_state;
use super::user_state::use_user_state;

/// Pause between the success message and entering the dashboard.
const WELCOME_DELAY: Duration = Duration::from_secs(1);

#[component]
pub fn LoginView() -> Element {
    let mut user_state = use_user_state();
    let shared_state = use_shared_state();
    let api = use_api_action();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut success = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    // Already logged in (restored session): go straight to the dashboard.
    if let Some(is_admin) = user_state.read().user.as_ref().map(|u| u.is_admin()) {
        nav.replace(Route::dashboard(is_admin));
        return rsx! {};
    }

    let can_submit =
        !email.read().trim().is_empty() && !password.read().is_empty() && !submitting();

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let credentials = Credentials {
            email: email.read().trim().to_string(),
            password: password.read().clone(),
        };
        let client = ApiClient::new(shared_state.read().config.clone());
        error.set(None);
        success.set(None);
        submitting.set(true);
        spawn(async move {
            match client.login(&credentials).await {
                Ok((user, message)) => {
                    tracing::info!("Logged in as {}", user.email);
                    let greeting = if message.is_empty() {
                        "Login successful!".to_string()
                    } else {
                        message
                    };
                    success.set(Some(greeting));
                    sleep(WELCOME_DELAY).await;
                    let is_admin = user.is_admin();
                    user_state.write().set_user(user);
                    api.send(ApiAction::RefreshOrders);
                    nav.replace(Route::dashboard(is_admin));
                }
                Err(e) => {
                    tracing::warn!("Login failed: {e}");
                    error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "canteen-app",
            div { class: "auth-card",
                h1 { "Canteen" }
                p { "Order ahead and pick up at the counter" }
                form { onsubmit: submit,
                    div { class: "form-group",
                        label { "Email" }
                        input {
                            r#type: "email",
                            placeholder: "you@school.edu",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }
                    div { class: "form-group",
                        label { "Password" }
                        input {
                            r#type: "password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
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
                        disabled: !can_submit,
                        if submitting() { "Signing in..." } else { "Sign in" }
                    }
                }
                p { class: "auth-switch",
                    "No account yet? "
                    Link { to: Route::Register {}, "Register" }
                }
            }
        }
    }
}
