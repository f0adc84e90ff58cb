use dioxus::prelude::*;

use canteen_common::order::PaymentMethod;
use canteen_common::wallet::{TopUpForm, QUICK_AMOUNTS};

use super::api_client::ApiClient;
use super::shared_state::use_shared_state;
use super::user_state::use_user_state;

#[component]
pub fn BalanceView() -> Element {
    let mut user_state = use_user_state();
    let mut shared_state = use_shared_state();
    let mut form = use_signal(TopUpForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let balance = user_state
        .read()
        .user
        .as_ref()
        .map(|u| u.balance)
        .unwrap_or_default();
    let current = form.read().clone();

    let submit = move |_| {
        let Some(user_id) = user_state.read().user_id().cloned() else {
            return;
        };
        let request = match form.read().validate() {
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
            match client.top_up(&user_id, &request).await {
                Ok(user) => {
                    tracing::info!("Added {} to balance of {}", request.amount, user.email);
                    let new_balance = user.balance;
                    user_state.write().set_user(user);
                    shared_state.write().notice =
                        Some(format!("Balance added! New balance: {new_balance}"));
                    form.set(TopUpForm::default());
                }
                Err(e) => {
                    tracing::error!("Top-up failed: {e}");
                    error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "wallet-view",
            h2 { "Add Balance" }
            div { class: "balance-display",
                h3 { class: "wallet-balance", "Current balance: {balance}" }
            }
            div { class: "quick-amounts",
                for amount in QUICK_AMOUNTS {
                    button {
                        onclick: move |_| form.write().pick(amount),
                        "{amount}"
                    }
                }
            }
            div { class: "form-group",
                label { "Amount (R$)" }
                input {
                    r#type: "text",
                    inputmode: "decimal",
                    placeholder: "e.g. 25.00",
                    value: "{current.amount}",
                    oninput: move |evt| form.write().amount = evt.value(),
                }
            }
            div { class: "payment-methods",
                for pm in [PaymentMethod::Pix, PaymentMethod::Card] {
                    label {
                        input {
                            r#type: "radio",
                            name: "topup-method",
                            checked: current.method == Some(pm),
                            onchange: move |_| form.write().method = Some(pm),
                        }
                        " {pm.label()}"
                    }
                }
            }
            if let Some(err) = error.read().as_ref() {
                p { class: "field-error", "{err}" }
            }
            button {
                disabled: submitting(),
                onclick: submit,
                if submitting() { "Processing..." } else { "Add balance" }
            }
        }
    }
}
