use dioxus::prelude::*;
use pulldown_cmark::{html, Options, Parser};

/// One collapsible question with its answer rendered to HTML.
#[derive(Clone, PartialEq)]
struct Entry {
    question: String,
    answer_html: String,
}

fn render(markdown: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    let mut out = String::new();
    html::push_html(&mut out, Parser::new_ext(markdown, opts));
    out
}

/// Split a markdown document on `## ` headings. Text before the first
/// heading becomes the intro.
fn parse_entries(source: &str) -> (String, Vec<Entry>) {
    let mut intro = String::new();
    let mut entries = Vec::new();
    let mut current: Option<(String, String)> = None;

    for line in source.lines() {
        if let Some(question) = line.strip_prefix("## ") {
            if let Some((q, body)) = current.take() {
                entries.push(Entry { question: q, answer_html: render(&body) });
            }
            current = Some((question.trim().to_string(), String::new()));
        } else {
            let target = match current.as_mut() {
                Some((_, body)) => body,
                None => &mut intro,
            };
            target.push_str(line);
            target.push('\n');
        }
    }
    if let Some((q, body)) = current {
        entries.push(Entry { question: q, answer_html: render(&body) });
    }

    (render(&intro), entries)
}

/// Markdown rendered as a list of questions that open one at a time.
#[component]
pub fn AccordionMarkdown(source: &'static str) -> Element {
    let parsed = use_hook(|| parse_entries(source));
    let mut open = use_signal::<Option<usize>>(|| None);

    let (intro_html, entries) = &parsed;

    rsx! {
        div { class: "faq",
            if !intro_html.is_empty() {
                div { class: "faq-intro", dangerous_inner_html: "{intro_html}" }
            }
            for (i, entry) in entries.iter().enumerate() {
                div { class: "accordion-section",
                    div {
                        class: "accordion-header",
                        onclick: move |_| open.set(if open() == Some(i) { None } else { Some(i) }),
                        span { class: "accordion-chevron",
                            if open() == Some(i) { "▾" } else { "▸" }
                        }
                        "{entry.question}"
                    }
                    if open() == Some(i) {
                        div {
                            class: "accordion-body",
                            dangerous_inner_html: "{entry.answer_html}"
                        }
                    }
                }
            }
        }
    }
}
