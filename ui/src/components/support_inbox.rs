use dioxus::prelude::*;

use canteen_common::support::{SupportMessage, TicketFilter, TicketStatus};

use super::shared_state::use_shared_state;

#[component]
pub fn SupportInboxView() -> Element {
    let shared_state = use_shared_state();
    let mut filter = use_signal(TicketFilter::default);

    let shared = shared_state.read();
    let stats = shared.support.stats();
    let tickets: Vec<SupportMessage> = shared.support.inbox(filter()).into_iter().cloned().collect();
    drop(shared);

    let tabs = [
        (TicketFilter::All, format!("All ({})", stats.total)),
        (TicketFilter::Open, format!("Open ({})", stats.open)),
        (TicketFilter::Resolved, format!("Resolved ({})", stats.resolved)),
    ];

    rsx! {
        div { class: "support-inbox",
            h2 { "Support inbox" }
            div { class: "category-tabs",
                for (tab, label) in tabs {
                    button {
                        class: if filter() == tab { "tab active" } else { "tab" },
                        onclick: move |_| filter.set(tab),
                        "{label}"
                    }
                }
            }
            if tickets.is_empty() {
                p { class: "empty-state", "No messages." }
            }
            for ticket in tickets {
                TicketCard { key: "{ticket.id}", ticket }
            }
        }
    }
}

#[component]
fn TicketCard(ticket: SupportMessage) -> Element {
    let mut shared_state = use_shared_state();
    let mut response = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let when = ticket.created_at.format("%d/%m/%Y %H:%M").to_string();
    let answered = ticket
        .responded_at
        .map(|at| at.format("%d/%m/%Y %H:%M").to_string());
    let class_name = ticket.user_class.clone().unwrap_or_default();
    let id = ticket.id.clone();

    let resolve = move |_| {
        let mut result = Ok(false);
        shared_state.write().update_support(|thread| {
            result = thread.resolve(&id, &response.read(), chrono::Utc::now());
        });
        match result {
            Ok(_) => {
                tracing::info!("Support ticket {id} resolved");
                response.set(String::new());
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        div { class: "ticket",
            div { class: "ticket-header",
                strong { "{ticket.user_name}" }
                span { " {ticket.user_email}" }
                if !class_name.is_empty() {
                    span { " - {class_name}" }
                }
                span { class: "ticket-date", " {when}" }
                if ticket.status == TicketStatus::Resolved {
                    span { class: "badge badge-resolved", "Resolved" }
                } else {
                    span { class: "badge badge-open", "Open" }
                }
            }
            p { "{ticket.message}" }
            if let Some(resp) = ticket.response.as_ref() {
                div { class: "ticket-response",
                    strong { "Response: " }
                    "{resp}"
                    if let Some(at) = answered.as_ref() {
                        span { class: "ticket-date", " ({at})" }
                    }
                }
            } else {
                div { class: "ticket-reply",
                    textarea {
                        placeholder: "Write a response...",
                        value: "{response}",
                        oninput: move |evt| response.set(evt.value()),
                    }
                    if let Some(err) = error.read().as_ref() {
                        p { class: "field-error", "{err}" }
                    }
                    button { class: "primary", onclick: resolve, "Resolve" }
                }
            }
        }
    }
}
