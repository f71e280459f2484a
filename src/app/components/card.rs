use dioxus::prelude::*;

#[component]
pub fn Card(
    title: Option<String>,
    featured: Option<bool>,
    /// Small label above the title (category, status)
    eyebrow: Option<String>,
    children: Element,
) -> Element {
    let featured = featured.unwrap_or(false);
    let featured_class = if featured { "c-card--featured" } else { "" };

    rsx! {
        div {
            class: "c-card {featured_class}",
            if title.is_some() || eyebrow.is_some() {
                div {
                    class: "c-card__header",
                    if let Some(eyebrow) = eyebrow {
                        span { class: "c-card__eyebrow", "{eyebrow}" }
                    }
                    if let Some(title) = title {
                        h3 { class: "c-card__title", "{title}" }
                    }
                }
            }
            div {
                class: "c-card__body",
                {children}
            }
        }
    }
}

/// Count tile for the admin dashboard
#[component]
pub fn StatCard(label: String, value: usize, hint: Option<String>) -> Element {
    rsx! {
        div { class: "c-stat",
            span { class: "c-stat__value", "{value}" }
            span { class: "c-stat__label", "{label}" }
            if let Some(hint) = hint {
                span { class: "c-stat__hint", "{hint}" }
            }
        }
    }
}
