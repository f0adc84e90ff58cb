use dioxus::prelude::*;

use canteen_common::support::{SupportMessage, TicketStatus, SUPPORT_CATEGORIES};

use super::faq_view::FaqView;
use super::shared_state::use_shared_state;
use super::user_state::use_user_state;

#[component]
pub fn SupportView() -> Element {
    let user_state = use_user_state();
    let mut shared_state = use_shared_state();
    let mut category = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let Some(user) = user_state.read().user.clone() else {
        return rsx! {};
    };
    let mine: Vec<SupportMessage> = shared_state
        .read()
        .support
        .for_user(&user.id)
        .into_iter()
        .rev()
        .cloned()
        .collect();

    let send = move |evt: FormEvent| {
        evt.prevent_default();
        match SupportMessage::open(&user, &category.read(), &message.read(), chrono::Utc::now()) {
            Ok(msg) => {
                tracing::info!("Support ticket {} opened", msg.id);
                shared_state.write().update_support(|thread| thread.send(msg));
                shared_state.write().notice = Some("Message sent! We'll get back to you soon.".into());
                category.set(String::new());
                message.set(String::new());
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        div { class: "support-view",
            h2 { "Support" }
            div { class: "contact-info",
                h3 { "Contact" }
                p { "Canteen counter: open weekdays 7:00 - 17:00" }
                p { "Email: cantina@school.edu" }
                p { "Phone: (11) 3333-4444" }
            }
            form { class: "support-form", onsubmit: send,
                h3 { "Send a message" }
                div { class: "form-group",
                    label { "Category" }
                    select {
                        value: "{category}",
                        onchange: move |evt| category.set(evt.value()),
                        option { value: "", "Choose a category" }
                        for c in SUPPORT_CATEGORIES.iter() {
                            option { value: "{c}", "{c}" }
                        }
                    }
                }
                div { class: "form-group",
                    label { "Message" }
                    textarea {
                        rows: "4",
                        value: "{message}",
                        oninput: move |evt| message.set(evt.value()),
                    }
                }
                if let Some(err) = error.read().as_ref() {
                    p { class: "field-error", "{err}" }
                }
                button { r#type: "submit", "Send" }
            }
            div { class: "my-tickets",
                h3 { "My messages" }
                if mine.is_empty() {
                    p { class: "empty-state", "You have not sent any messages." }
                }
                for ticket in mine {
                    {
                        let when = ticket.created_at.format("%d/%m/%Y %H:%M").to_string();
                        rsx! {
                            div { class: "ticket", key: "{ticket.id}",
                                div { class: "ticket-header",
                                    span { class: "ticket-date", "{when}" }
                                    if ticket.status == TicketStatus::Resolved {
                                        span { class: "badge badge-resolved", "Resolved" }
                                    } else {
                                        span { class: "badge badge-open", "Open" }
                                    }
                                }
                                p { "{ticket.message}" }
                                if let Some(resp) = ticket.response.as_ref() {
                                    div { class: "ticket-response",
                                        strong { "Canteen: " }
                                        "{resp}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
            h3 { "Frequently asked questions" }
            FaqView {}
        }
    }
}
