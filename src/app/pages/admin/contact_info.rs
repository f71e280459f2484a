use std::collections::BTreeMap;

use dioxus::prelude::*;

use crate::app::components::{join_lines, parse_lines, FormField, Notice, NoticeBanner};
use crate::domain::models::ContactInfoPatch;
use crate::server_fns::save_contact_info;
use crate::shared::hooks::{use_auth, use_content};

/// `network = url` per line
fn parse_social_links(text: &str) -> BTreeMap<String, String> {
    parse_lines(text)
        .into_iter()
        .filter_map(|line| {
            let (network, url) = line.split_once('=')?;
            let (network, url) = (network.trim(), url.trim());
            (!network.is_empty() && !url.is_empty()).then(|| (network.to_string(), url.to_string()))
        })
        .collect()
}

fn format_social_links(links: &BTreeMap<String, String>) -> String {
    links
        .iter()
        .map(|(network, url)| format!("{} = {}", network, url))
        .collect::<Vec<_>>()
        .join("\n")
}

#[component]
pub fn AdminContactInfo() -> Element {
    let content = use_content();
    let contact = content.snapshot().contact;

    rsx! {
        div { class: "c-admin-page",
            header { class: "c-admin-page__header",
                h1 { "Contact information" }
                p { "Shown on the contact page." }
            }
            // Re-mount the form whenever the stored record changes
            ContactInfoForm {
                key: "{contact.updated_at.timestamp_millis()}",
                address: contact.address.clone(),
                phone: join_lines(&contact.phone),
                email: join_lines(&contact.email),
                hours: join_lines(&contact.business_hours),
                social: format_social_links(&contact.social_links),
            }
        }
    }
}

#[component]
fn ContactInfoForm(address: String, phone: String, email: String, hours: String, social: String) -> Element {
    let auth = use_auth();
    let content = use_content();
    let mut address = use_signal(move || address);
    let mut phone = use_signal(move || phone);
    let mut email = use_signal(move || email);
    let mut hours = use_signal(move || hours);
    let mut social = use_signal(move || social);
    let mut notice = use_signal(|| None::<Notice>);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let patch = ContactInfoPatch {
            address: Some(address.read().trim().to_string()),
            phone: Some(parse_lines(&phone.read())),
            email: Some(parse_lines(&email.read())),
            business_hours: Some(parse_lines(&hours.read())),
            social_links: Some(parse_social_links(&social.read())),
        };
        saving.set(true);
        spawn(async move {
            let result = save_contact_info(auth.token(), patch).await;
            if result.is_ok() {
                content.refresh().await;
            }
            notice.set(Some(Notice::for_update(&result, "contact information")));
            saving.set(false);
        });
    };

    let busy = *saving.read();

    rsx! {
        NoticeBanner { notice: notice }
        form { class: "c-form c-admin-form", onsubmit: submit,
            FormField { label: "Address", error: None,
                textarea { class: "c-form__input", rows: "2", value: "{address}", oninput: move |evt| address.set(evt.value()) }
            }
            FormField { label: "Phone numbers (one per line)", error: None,
                textarea { class: "c-form__input", rows: "2", value: "{phone}", oninput: move |evt| phone.set(evt.value()) }
            }
            FormField { label: "Email addresses (one per line)", error: None,
                textarea { class: "c-form__input", rows: "2", value: "{email}", oninput: move |evt| email.set(evt.value()) }
            }
            FormField { label: "Business hours (one per line)", error: None,
                textarea { class: "c-form__input", rows: "3", value: "{hours}", oninput: move |evt| hours.set(evt.value()) }
            }
            FormField { label: "Social links (network = url)", error: None,
                textarea { class: "c-form__input", rows: "4", value: "{social}", oninput: move |evt| social.set(evt.value()) }
            }
            button {
                class: "c-btn c-btn--primary",
                r#type: "submit",
                disabled: busy,
                if busy { "Saving..." } else { "Save contact information" }
            }
        }
    }
}
