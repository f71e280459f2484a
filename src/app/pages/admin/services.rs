use chrono::Utc;
use dioxus::prelude::*;

use crate::app::components::{
    join_lines, optional, parse_lines, DeleteButton, FormField, Notice, NoticeBanner,
};
use crate::app::pages::home::service_icon;
use crate::domain::models::ServiceItem;
use crate::domain::services::{next_display_order, upsert_item, validate_service};
use crate::server_fns::{delete_service, save_services};
use crate::shared::errors::ValidationErrors;
use crate::shared::hooks::{use_auth, use_content};

const ICONS: [&str; 9] = [
    "Code", "Smartphone", "Cloud", "Shield", "Target", "Database", "Palette", "Globe", "Users",
];

#[component]
pub fn AdminServices() -> Element {
    let auth = use_auth();
    let content = use_content();
    let mut editing = use_signal(|| None::<ServiceItem>);
    let mut notice = use_signal(|| None::<Notice>);
    let mut deleting = use_signal(|| None::<String>);

    let services = content.snapshot().services;

    let on_save = move |item: ServiceItem| {
        let list = upsert_item(&content.snapshot().services, item);
        spawn(async move {
            let result = save_services(auth.token(), list).await;
            if result.is_ok() {
                editing.set(None);
                content.refresh().await;
            }
            notice.set(Some(Notice::for_update(&result, "services")));
        });
    };

    let list_for_new = services.clone();
    rsx! {
        div { class: "c-admin-page",
            header { class: "c-admin-page__header",
                h1 { "Services" }
                button {
                    class: "c-btn c-btn--primary",
                    onclick: move |_| {
                        editing.set(Some(ServiceItem::new("", next_display_order(&list_for_new))));
                    },
                    "+ Add service"
                }
            }
            NoticeBanner { notice: notice }

            if let Some(item) = editing.read().clone() {
                ServiceForm {
                    key: "{item.id}",
                    initial: item,
                    on_save: on_save,
                    on_cancel: move |_| editing.set(None),
                }
            }

            table { class: "c-table",
                thead {
                    tr {
                        th { "#" }
                        th { "Service" }
                        th { "Category" }
                        th { "" }
                    }
                }
                tbody {
                    for service in services {
                        tr { key: "{service.id}",
                            td { "{service.display_order}" }
                            td { "{service_icon(&service.icon)} {service.title}" }
                            td { "{service.category.clone().unwrap_or_default()}" }
                            td { class: "c-table__actions",
                                button {
                                    class: "c-btn c-btn--ghost c-btn--sm",
                                    onclick: {
                                        let service = service.clone();
                                        move |_| editing.set(Some(service.clone()))
                                    },
                                    "Edit"
                                }
                                DeleteButton {
                                    item_label: service.title.clone(),
                                    is_loading: deleting.read().as_deref() == Some(service.id.as_str()),
                                    on_confirm: {
                                        let id = service.id.clone();
                                        move |_| {
                                            let id = id.clone();
                                            deleting.set(Some(id.clone()));
                                            spawn(async move {
                                                let result = delete_service(auth.token(), id).await;
                                                if result.is_ok() {
                                                    content.refresh().await;
                                                }
                                                notice.set(Some(Notice::for_update(&result, "services")));
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
}

#[component]
fn ServiceForm(
    initial: ServiceItem,
    on_save: EventHandler<ServiceItem>,
    on_cancel: EventHandler<()>,
) -> Element {
    let base = initial.clone();
    let mut title = use_signal(|| initial.title.clone());
    let mut icon = use_signal(|| initial.icon.clone());
    let mut description = use_signal(|| initial.description.clone());
    let mut features = use_signal(|| join_lines(&initial.features));
    let mut category = use_signal(|| initial.category.clone().unwrap_or_default());
    let mut order = use_signal(|| initial.display_order.to_string());
    let mut errors = use_signal(ValidationErrors::new);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let item = ServiceItem {
            title: title.read().trim().to_string(),
            icon: icon.read().clone(),
            description: description.read().trim().to_string(),
            features: parse_lines(&features.read()),
            category: optional(&category.read()),
            display_order: order.read().trim().parse().unwrap_or(0),
            updated_at: Utc::now(),
            ..base.clone()
        };
        let field_errors = validate_service(&item);
        if field_errors.is_empty() {
            on_save.call(item);
        }
        errors.set(field_errors);
    };

    let field_errors = errors.read().clone();
    let current_icon = icon.read().clone();

    rsx! {
        form { class: "c-form c-admin-form", onsubmit: submit,
            FormField { label: "Title", error: field_errors.get("title").map(str::to_string),
                input {
                    class: "c-form__input",
                    value: "{title}",
                    oninput: move |evt| title.set(evt.value()),
                }
            }
            FormField { label: "Icon", error: None,
                select {
                    class: "c-form__input",
                    value: "{current_icon}",
                    onchange: move |evt| icon.set(evt.value()),
                    for name in ICONS {
                        option { value: name, selected: name == current_icon, "{service_icon(name)} {name}" }
                    }
                }
            }
            FormField { label: "Description", error: field_errors.get("description").map(str::to_string),
                textarea {
                    class: "c-form__input",
                    rows: "3",
                    value: "{description}",
                    oninput: move |evt| description.set(evt.value()),
                }
            }
            FormField { label: "Features (one per line)", error: None,
                textarea {
                    class: "c-form__input",
                    rows: "4",
                    value: "{features}",
                    oninput: move |evt| features.set(evt.value()),
                }
            }
            FormField { label: "Category", error: None,
                input {
                    class: "c-form__input",
                    value: "{category}",
                    oninput: move |evt| category.set(evt.value()),
                }
            }
            FormField { label: "Display order", error: field_errors.get("display_order").map(str::to_string),
                input {
                    class: "c-form__input",
                    r#type: "number",
                    min: "1",
                    value: "{order}",
                    oninput: move |evt| order.set(evt.value()),
                }
            }
            div { class: "c-admin-form__actions",
                button { class: "c-btn c-btn--primary", r#type: "submit", "Save service" }
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
