use dioxus::prelude::*;

// Reusable Loading Component (BEM: c-loading)
#[component]
pub fn LoadingText(message: String) -> Element {
    rsx! {
        div { class: "c-loading",
            div { class: "c-loading__spinner" }
            p { class: "c-loading__text", "{message}" }
        }
    }
}

// Reusable Error Message Component (BEM: c-error)
#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        div { class: "c-error",
            span { class: "c-error__icon", "❌" }
            p { class: "c-error__text", "{message}" }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast-style feedback after an admin action
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    /// "X updated successfully" or "Failed to update X"
    pub fn for_update<T, E>(result: &Result<T, E>, what: &str) -> Self {
        match result {
            Ok(_) => Self::success(format!("{} updated successfully", capitalize(what))),
            Err(_) => Self::error(format!("Failed to update {}", what)),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[component]
pub fn NoticeBanner(notice: Signal<Option<Notice>>) -> Element {
    let mut notice = notice;
    let current = notice.read().clone();
    let Some(current) = current else {
        return rsx! {};
    };

    let modifier = match current.kind {
        NoticeKind::Success => "c-notice--success",
        NoticeKind::Error => "c-notice--error",
    };

    rsx! {
        div { class: "c-notice {modifier}", role: "status",
            span { class: "c-notice__text", "{current.text}" }
            button {
                class: "c-notice__close",
                onclick: move |_| notice.set(None),
                "×"
            }
        }
    }
}

/// One entry per non-empty line
pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_lines(items: &[String]) -> String {
    items.join("\n")
}

/// Comma-separated tags
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// `None` for blank input
pub fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
