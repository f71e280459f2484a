use dioxus::prelude::*;

use crate::app::components::{Card, EditableText};
use crate::app::pages::Route;
use crate::domain::models::{PartnerItem, PortfolioItem, ServiceItem};
use crate::shared::hooks::use_content;

/// Emoji stand-in for the symbolic icon names stored on services
pub fn service_icon(name: &str) -> &'static str {
    match name {
        "Code" => "💻",
        "Smartphone" => "📱",
        "Cloud" => "☁️",
        "Shield" => "🛡️",
        "Target" => "🎯",
        "Database" => "🗄️",
        "Palette" => "🎨",
        "Globe" => "🌐",
        "Users" => "👥",
        _ => "✨",
    }
}

#[component]
pub fn Home() -> Element {
    let content = use_content();
    let snapshot = content.snapshot();
    let featured: Vec<PortfolioItem> = snapshot.featured_portfolio().cloned().collect();

    rsx! {
        section { class: "c-hero",
            h1 { class: "c-hero__title",
                EditableText {
                    content_key: "hero.title",
                    default_value: "Transforming Challenges into Digital Opportunities",
                }
            }
            p { class: "c-hero__subtitle",
                EditableText {
                    content_key: "hero.subtitle",
                    default_value: "Your partner for innovative, scalable, and secure IT solutions in Nepal and beyond.",
                    multiline: true,
                }
            }
            div { class: "c-hero__actions",
                Link { to: Route::Contact {}, class: "c-btn c-btn--primary", "Start a project" }
                a { href: "#services", class: "c-btn c-btn--ghost", "Our services" }
            }
        }

        section { class: "c-section c-section--about",
            h2 { class: "c-section__title",
                EditableText { content_key: "about.title", default_value: "Our Core Philosophy" }
            }
            p { class: "c-section__lead",
                EditableText {
                    content_key: "about.description",
                    default_value: "We believe in creating digital solutions that not only solve problems but also drive innovation and growth.",
                    multiline: true,
                }
            }
        }

        section { id: "services", class: "c-section",
            h2 { class: "c-section__title", "Services" }
            div { class: "c-grid",
                for service in snapshot.services.iter().cloned() {
                    ServiceCard { key: "{service.id}", service: service }
                }
            }
        }

        if !featured.is_empty() {
            section { id: "portfolio", class: "c-section",
                h2 { class: "c-section__title", "Featured work" }
                div { class: "c-grid",
                    for item in featured {
                        PortfolioCard { key: "{item.id}", item: item }
                    }
                }
            }
        }

        if !snapshot.partners.is_empty() {
            section { id: "partners", class: "c-section",
                h2 { class: "c-section__title", "Partners" }
                div { class: "c-partners",
                    for partner in snapshot.partners.iter().cloned() {
                        PartnerBadge { key: "{partner.id}", partner: partner }
                    }
                }
            }
        }
    }
}

#[component]
fn ServiceCard(service: ServiceItem) -> Element {
    let icon = service_icon(&service.icon);
    rsx! {
        Card { title: service.title.clone(), eyebrow: service.category.clone(),
            span { class: "c-card__icon", "{icon}" }
            p { "{service.description}" }
            if !service.features.is_empty() {
                ul { class: "c-card__list",
                    for feature in service.features.iter() {
                        li { "{feature}" }
                    }
                }
            }
        }
    }
}

#[component]
fn PortfolioCard(item: PortfolioItem) -> Element {
    rsx! {
        Card { title: item.title.clone(), eyebrow: item.category.clone(), featured: item.featured,
            if let Some(image) = item.image_url.clone() {
                img { class: "c-card__image", src: "{image}", alt: "{item.title}" }
            }
            if let Some(description) = item.description.clone() {
                p { "{description}" }
            }
            if !item.tags.is_empty() {
                div { class: "c-tags",
                    for tag in item.tags.iter() {
                        span { class: "c-tags__tag", "{tag}" }
                    }
                }
            }
            if let Some(link) = item.link.clone() {
                a { class: "c-card__link", href: "{link}", target: "_blank", "View project →" }
            }
        }
    }
}

#[component]
fn PartnerBadge(partner: PartnerItem) -> Element {
    let body = rsx! {
        if let Some(logo) = partner.logo.clone() {
            img { class: "c-partner__logo", src: "{logo}", alt: "{partner.name}" }
        }
        span { class: "c-partner__name", "{partner.name}" }
    };

    rsx! {
        div { class: "c-partner", title: partner.description.clone().unwrap_or_default(),
            {match partner.website.clone() {
                Some(website) => rsx! { a { href: "{website}", target: "_blank", {body} } },
                None => body,
            }}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::defaults::default_services;

    #[test]
    fn test_every_seeded_service_has_an_icon() {
        for service in default_services() {
            assert_ne!(service_icon(&service.icon), "✨", "{}", service.icon);
        }
    }
}
