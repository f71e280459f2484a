//! Built-in seed content
//!
//! Used to seed empty stores and as the last-resort answer when no store can be
//! read. Ids and timestamps are fixed so the seed is deterministic.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::models::{ContactInfo, ContentSnippet, PartnerItem, PortfolioItem, ServiceItem};

const PARTNER_LOGO: &str = "/assets/partners/placeholder.png";
const PORTFOLIO_IMAGE: &str = "/api/placeholder/400/300";

fn seeded_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn snippet(id: &str, key: &str, value: &str) -> ContentSnippet {
    ContentSnippet {
        id: id.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        kind: "text".to_string(),
        created_at: seeded_at(),
        updated_at: seeded_at(),
    }
}

pub fn default_snippets() -> Vec<ContentSnippet> {
    vec![
        snippet("default-content-1", "hero.title", "Transforming Challenges into Digital Opportunities"),
        snippet(
            "default-content-2",
            "hero.subtitle",
            "Your partner for innovative, scalable, and secure IT solutions in Nepal and beyond.",
        ),
        snippet("default-content-3", "about.title", "Our Core Philosophy"),
        snippet(
            "default-content-4",
            "about.description",
            "We believe in creating digital solutions that not only solve problems but also drive innovation and growth.",
        ),
    ]
}

fn service(
    id: &str,
    icon: &str,
    title: &str,
    description: &str,
    features: &[&str],
    category: &str,
    display_order: i32,
) -> ServiceItem {
    ServiceItem {
        id: id.to_string(),
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        features: strings(features),
        category: Some(category.to_string()),
        display_order,
        created_at: seeded_at(),
        updated_at: seeded_at(),
    }
}

pub fn default_services() -> Vec<ServiceItem> {
    vec![
        service(
            "default-service-1",
            "Code",
            "Software Development",
            "Custom web and mobile applications built with modern technologies",
            &["Web Applications", "Mobile Apps", "API Development", "Cloud Solutions"],
            "Development",
            1,
        ),
        service(
            "default-service-2",
            "Shield",
            "IT Security",
            "Comprehensive cybersecurity solutions to protect your business",
            &["Security Audits", "Threat Assessment", "Implementation", "Monitoring"],
            "Security",
            2,
        ),
        service(
            "default-service-3",
            "Target",
            "Digital Marketing",
            "Strategic digital marketing to grow your online presence",
            &["SEO Optimization", "Social Media", "Content Strategy", "Lead Generation"],
            "Marketing",
            3,
        ),
        service(
            "default-service-4",
            "Users",
            "UI/UX Design",
            "Beautiful and intuitive user experiences that engage customers",
            &["User Research", "Interface Design", "Brand Identity", "Prototyping"],
            "Design",
            4,
        ),
    ]
}

pub fn default_portfolio() -> Vec<PortfolioItem> {
    vec![
        PortfolioItem {
            id: "default-portfolio-1".to_string(),
            title: "E-commerce Platform".to_string(),
            category: Some("Web Development".to_string()),
            description: Some("Modern e-commerce solution with payment integration".to_string()),
            image_url: Some(PORTFOLIO_IMAGE.to_string()),
            tags: strings(&["React", "Node.js", "MongoDB"]),
            link: None,
            featured: true,
            display_order: 1,
            created_at: seeded_at(),
            updated_at: seeded_at(),
        },
        PortfolioItem {
            id: "default-portfolio-2".to_string(),
            title: "Mobile Banking App".to_string(),
            category: Some("Mobile Development".to_string()),
            description: Some(
                "Secure mobile banking application with biometric authentication".to_string(),
            ),
            image_url: Some(PORTFOLIO_IMAGE.to_string()),
            tags: strings(&["React Native", "Security", "Fintech"]),
            link: None,
            featured: false,
            display_order: 2,
            created_at: seeded_at(),
            updated_at: seeded_at(),
        },
    ]
}

fn partner(id: &str, name: &str, description: &str, website: &str, category: &str, display_order: i32) -> PartnerItem {
    PartnerItem {
        id: id.to_string(),
        name: name.to_string(),
        logo: Some(PARTNER_LOGO.to_string()),
        description: Some(description.to_string()),
        website: Some(website.to_string()),
        category: Some(category.to_string()),
        display_order,
        created_at: seeded_at(),
        updated_at: seeded_at(),
    }
}

pub fn default_partners() -> Vec<PartnerItem> {
    vec![
        partner(
            "default-partner-1",
            "Microsoft Nepal",
            "Strategic technology partnership for cloud solutions and enterprise software development",
            "https://microsoft.com",
            "Technology",
            1,
        ),
        partner(
            "default-partner-2",
            "Google Cloud Partner",
            "Certified Google Cloud partner providing scalable cloud infrastructure solutions",
            "https://cloud.google.com",
            "Cloud Services",
            2,
        ),
        partner(
            "default-partner-3",
            "AWS Solutions Partner",
            "Amazon Web Services partner specializing in cloud migration and DevOps solutions",
            "https://aws.amazon.com",
            "Cloud Infrastructure",
            3,
        ),
    ]
}

pub fn default_contact() -> ContactInfo {
    let social_links: BTreeMap<String, String> = [
        ("facebook", "https://facebook.com/nayacode"),
        ("twitter", "https://twitter.com/nayacode"),
        ("linkedin", "https://linkedin.com/company/nayacode"),
        ("instagram", "https://instagram.com/nayacode"),
    ]
    .into_iter()
    .map(|(network, url)| (network.to_string(), url.to_string()))
    .collect();

    ContactInfo {
        id: "default-contact".to_string(),
        address: "Dillibazar-30, Kathmandu, Nepal".to_string(),
        phone: strings(&["+977 14548052", "+977 970511455"]),
        email: strings(&["info@nayacode.com.np"]),
        business_hours: strings(&[
            "Monday - Friday: 9:00 AM - 6:00 PM",
            "Saturday: 10:00 AM - 4:00 PM",
        ]),
        social_links,
        created_at: seeded_at(),
        updated_at: seeded_at(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_services_are_the_four_seed_items() {
        let titles: Vec<_> = default_services().into_iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec!["Software Development", "IT Security", "Digital Marketing", "UI/UX Design"]
        );
    }

    #[test]
    fn test_defaults_are_deterministic() {
        assert_eq!(default_services(), default_services());
        assert_eq!(default_contact(), default_contact());
    }
}
