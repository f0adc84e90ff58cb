use dioxus::prelude::*;

use canteen_common::product::ProductCategory;
use canteen_common::stock::ProductForm;

use super::api_actions::load_products;
use super::api_client::ApiClient;
use super::app::Route;
use super::shared_state::use_shared_state;

#[component]
pub fn AddProductView() -> Element {
    let mut shared_state = use_shared_state();
    let nav = use_navigator();
    let mut form = use_signal(ProductForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let current = form.read().clone();
    let selected = current
        .category
        .as_ref()
        .map(|c| c.wire_name().to_string())
        .unwrap_or_default();

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let product = match form.read().validate() {
            Ok(p) => p,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let client = ApiClient::new(shared_state.read().config.clone());
        error.set(None);
        submitting.set(true);
        spawn(async move {
            match client.create_product(&product).await {
                Ok(()) => {
                    tracing::info!("Created product {}", product.name);
                    // The backend assigns the id; reload to pick it up.
                    load_products(&client, shared_state).await;
                    shared_state.write().notice = Some(format!("{} added", product.name));
                    nav.push(Route::Stock {});
                }
                Err(e) => {
                    tracing::error!("Creating product failed: {e}");
                    error.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "add-product",
            h2 { "Add product" }
            form { onsubmit: submit,
                div { class: "form-group",
                    label { "Name" }
                    input {
                        value: "{current.name}",
                        oninput: move |evt| form.write().name = evt.value(),
                    }
                }
                div { class: "form-group",
                    label { "Description" }
                    textarea {
                        value: "{current.description}",
                        oninput: move |evt| form.write().description = evt.value(),
                    }
                }
                div { class: "form-group",
                    label { "Price (R$)" }
                    input {
                        r#type: "text",
                        inputmode: "decimal",
                        placeholder: "e.g. 4.50",
                        value: "{current.price}",
                        oninput: move |evt| form.write().price = evt.value(),
                    }
                }
                div { class: "form-group",
                    label { "Category" }
                    select {
                        value: "{selected}",
                        onchange: move |evt| {
                            let value = evt.value();
                            form.write().category =
                                (!value.is_empty()).then(|| ProductCategory::from_wire(&value));
                        },
                        option { value: "", "Choose a category" }
                        for c in ProductCategory::all() {
                            option { value: "{c.wire_name()}", "{c.label()}" }
                        }
                    }
                }
                div { class: "form-group",
                    label { "Initial stock" }
                    input {
                        r#type: "number",
                        min: "0",
                        value: "{current.stock}",
                        oninput: move |evt| form.write().stock = evt.value(),
                    }
                }
                div { class: "form-group",
                    label { "Image URL" }
                    input {
                        r#type: "url",
                        value: "{current.image}",
                        oninput: move |evt| form.write().image = evt.value(),
                    }
                }
                div { class: "form-group",
                    label {
                        input {
                            r#type: "checkbox",
                            checked: current.available,
                            onchange: move |evt| form.write().available = evt.checked(),
                        }
                        " Available for ordering"
                    }
                }
                if let Some(err) = error.read().as_ref() {
                    p { class: "field-error", "{err}" }
                }
                div { class: "form-actions",
                    button {
                        r#type: "submit",
                        class: "primary",
                        disabled: submitting(),
                        if submitting() { "Saving..." } else { "Save product" }
                    }
                    button {
                        r#type: "button",
                        onclick: move |_| { nav.push(Route::Stock {}); },
                        "Cancel"
                    }
                }
            }
        }
    }
}
