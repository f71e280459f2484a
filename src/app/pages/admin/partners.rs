use chrono::Utc;
use dioxus::prelude::*;

use crate::app::components::{optional, DeleteButton, FormField, Notice, NoticeBanner};
use crate::domain::models::PartnerItem;
use crate::domain::services::{is_valid_url, next_display_order, upsert_item};
use crate::server_fns::{delete_partner, save_partners};
use crate::shared::errors::ValidationErrors;
use crate::shared::hooks::{use_auth, use_content};

fn validate_partner(partner: &PartnerItem) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if partner.name.trim().is_empty() {
        errors.add("name", "Name is required");
    }
    if let Some(website) = partner.website.as_deref() {
        if !is_valid_url(website) {
            errors.add("website", "Please enter a valid URL");
        }
    }
    errors
}

#[component]
pub fn AdminPartners() -> Element {
    let auth = use_auth();
    let content = use_content();
    let mut editing = use_signal(|| None::<PartnerItem>);
    let mut notice = use_signal(|| None::<Notice>);
    let mut deleting = use_signal(|| None::<String>);

    let partners = content.snapshot().partners;

    let on_save = move |partner: PartnerItem| {
        let list = upsert_item(&content.snapshot().partners, partner);
        spawn(async move {
            let result = save_partners(auth.token(), list).await;
            if result.is_ok() {
                editing.set(None);
                content.refresh().await;
            }
            notice.set(Some(Notice::for_update(&result, "partners")));
        });
    };

    let list_for_new = partners.clone();
    rsx! {
        div { class: "c-admin-page",
            header { class: "c-admin-page__header",
                h1 { "Partners" }
                button {
                    class: "c-btn c-btn--primary",
                    onclick: move |_| {
                        editing.set(Some(PartnerItem::new("", next_display_order(&list_for_new))));
                    },
                    "+ Add partner"
                }
            }
            NoticeBanner { notice: notice }

            if let Some(partner) = editing.read().clone() {
                PartnerForm {
                    key: "{partner.id}",
                    initial: partner,
                    on_save: on_save,
                    on_cancel: move |_| editing.set(None),
                }
            }

            div { class: "c-grid",
                for partner in partners {
                    div { key: "{partner.id}", class: "c-card",
                        div { class: "c-card__header",
                            if let Some(logo) = partner.logo.clone() {
                                img { class: "c-partner__logo", src: "{logo}", alt: "{partner.name}" }
                            }
                            h3 { class: "c-card__title", "{partner.name}" }
                        }
                        div { class: "c-card__body",
                            if let Some(description) = partner.description.clone() {
                                p { "{description}" }
                            }
                            if let Some(website) = partner.website.clone() {
                                a { href: "{website}", target: "_blank", "{website}" }
                            }
                        }
                        div { class: "c-card__footer",
                            button {
                                class: "c-btn c-btn--ghost c-btn--sm",
                                onclick: {
                                    let partner = partner.clone();
                                    move |_| editing.set(Some(partner.clone()))
                                },
                                "Edit"
                            }
                            DeleteButton {
                                item_label: partner.name.clone(),
                                is_loading: deleting.read().as_deref() == Some(partner.id.as_str()),
                                on_confirm: {
                                    let id = partner.id.clone();
                                    move |_| {
                                        let id = id.clone();
                                        deleting.set(Some(id.clone()));
                                        spawn(async move {
                                            let result = delete_partner(auth.token(), id).await;
                                            if result.is_ok() {
                                                content.refresh().await;
                                            }
                                            notice.set(Some(Notice::for_update(&result, "partners")));
                                            deleting.set(None);
                                        });
                                    }
                                },
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PartnerForm(
    initial: PartnerItem,
    on_save: EventHandler<PartnerItem>,
    on_cancel: EventHandler<()>,
) -> Element {
    let base = initial.clone();
    let mut name = use_signal(|| initial.name.clone());
    let mut logo = use_signal(|| initial.logo.clone().unwrap_or_default());
    let mut description = use_signal(|| initial.description.clone().unwrap_or_default());
    let mut website = use_signal(|| initial.website.clone().unwrap_or_default());
    let mut category = use_signal(|| initial.category.clone().unwrap_or_default());
    let mut order = use_signal(|| initial.display_order.to_string());
    let mut errors = use_signal(ValidationErrors::new);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let partner = PartnerItem {
            name: name.read().trim().to_string(),
            logo: optional(&logo.read()),
            description: optional(&description.read()),
            website: optional(&website.read()),
            category: optional(&category.read()),
            display_order: order.read().trim().parse().unwrap_or(0),
            updated_at: Utc::now(),
            ..base.clone()
        };
        let field_errors = validate_partner(&partner);
        if field_errors.is_empty() {
            on_save.call(partner);
        }
        errors.set(field_errors);
    };

    let field_errors = errors.read().clone();

    rsx! {
        form { class: "c-form c-admin-form", onsubmit: submit,
            FormField { label: "Name", error: field_errors.get("name").map(str::to_string),
                input { class: "c-form__input", value: "{name}", oninput: move |evt| name.set(evt.value()) }
            }
            FormField { label: "Logo URL", error: None,
                input { class: "c-form__input", value: "{logo}", oninput: move |evt| logo.set(evt.value()) }
            }
            FormField { label: "Description", error: None,
                textarea {
                    class: "c-form__input",
                    rows: "2",
                    value: "{description}",
                    oninput: move |evt| description.set(evt.value()),
                }
            }
            FormField { label: "Website", error: field_errors.get("website").map(str::to_string),
                input { class: "c-form__input", value: "{website}", oninput: move |evt| website.set(evt.value()) }
            }
            FormField { label: "Category", error: None,
                input { class: "c-form__input", value: "{category}", oninput: move |evt| category.set(evt.value()) }
            }
            FormField { label: "Display order", error: None,
                input {
                    class: "c-form__input",
                    r#type: "number",
                    value: "{order}",
                    oninput: move |evt| order.set(evt.value()),
                }
            }
            div { class: "c-admin-form__actions",
                button { class: "c-btn c-btn--primary", r#type: "submit", "Save partner" }
                button {
                    class: "c-btn c-btn--ghost",
                    r#type: "button",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_needs_name_and_valid_site() {
        let mut partner = PartnerItem::new("", 1);
        partner.website = Some("not a url".to_string());
        let errors = validate_partner(&partner);
        assert!(errors.get("name").is_some());
        assert!(errors.get("website").is_some());

        partner.name = "AWS".to_string();
        partner.website = Some("https://aws.amazon.com".to_string());
        assert!(validate_partner(&partner).is_empty());
    }
}
