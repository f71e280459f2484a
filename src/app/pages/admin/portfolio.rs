use chrono::Utc;
use dioxus::prelude::*;

use crate::app::components::{optional, parse_tags, DeleteButton, FormField, Notice, NoticeBanner};
use crate::domain::models::PortfolioItem;
use crate::domain::services::{next_display_order, upsert_item, validate_portfolio_item};
use crate::server_fns::{delete_portfolio_item, save_portfolio};
use crate::shared::errors::ValidationErrors;
use crate::shared::hooks::{use_auth, use_content};

#[component]
pub fn AdminPortfolio() -> Element {
    let auth = use_auth();
    let content = use_content();
    let mut editing = use_signal(|| None::<PortfolioItem>);
    let mut notice = use_signal(|| None::<Notice>);
    let mut deleting = use_signal(|| None::<String>);

    let items = content.snapshot().portfolio;

    let on_save = move |item: PortfolioItem| {
        let list = upsert_item(&content.snapshot().portfolio, item);
        spawn(async move {
            let result = save_portfolio(auth.token(), list).await;
            if result.is_ok() {
                editing.set(None);
                content.refresh().await;
            }
            notice.set(Some(Notice::for_update(&result, "portfolio")));
        });
    };

    // Flip the featured flag without opening the form
    let toggle_featured = move |mut item: PortfolioItem| {
        item.featured = !item.featured;
        item.updated_at = Utc::now();
        let list = upsert_item(&content.snapshot().portfolio, item);
        spawn(async move {
            let result = save_portfolio(auth.token(), list).await;
            if result.is_ok() {
                content.refresh().await;
            }
            notice.set(Some(Notice::for_update(&result, "portfolio")));
        });
    };

    let list_for_new = items.clone();
    rsx! {
        div { class: "c-admin-page",
            header { class: "c-admin-page__header",
                h1 { "Portfolio" }
                button {
                    class: "c-btn c-btn--primary",
                    onclick: move |_| {
                        editing.set(Some(PortfolioItem::new("", next_display_order(&list_for_new))));
                    },
                    "+ Add project"
                }
            }
            NoticeBanner { notice: notice }

            if let Some(item) = editing.read().clone() {
                PortfolioForm {
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
                        th { "Project" }
                        th { "Tags" }
                        th { "Featured" }
                        th { "" }
                    }
                }
                tbody {
                    for item in items {
                        tr { key: "{item.id}",
                            td { "{item.display_order}" }
                            td {
                                strong { "{item.title}" }
                                if let Some(category) = item.category.clone() {
                                    span { class: "c-table__muted", " · {category}" }
                                }
                            }
                            td {
                                for tag in item.tags.iter() {
                                    span { class: "c-tags__tag", "{tag}" }
                                }
                            }
                            td {
                                input {
                                    r#type: "checkbox",
                                    checked: item.featured,
                                    onchange: {
                                        let item = item.clone();
                                        move |_| toggle_featured(item.clone())
                                    },
                                }
                            }
                            td { class: "c-table__actions",
                                button {
                                    class: "c-btn c-btn--ghost c-btn--sm",
                                    onclick: {
                                        let item = item.clone();
                                        move |_| editing.set(Some(item.clone()))
                                    },
                                    "Edit"
                                }
                                DeleteButton {
                                    item_label: item.title.clone(),
                                    is_loading: deleting.read().as_deref() == Some(item.id.as_str()),
                                    on_confirm: {
                                        let id = item.id.clone();
                                        move |_| {
                                            let id = id.clone();
                                            deleting.set(Some(id.clone()));
                                            spawn(async move {
                                                let result = delete_portfolio_item(auth.token(), id).await;
                                                if result.is_ok() {
                                                    content.refresh().await;
                                                }
                                                notice.set(Some(Notice::for_update(&result, "portfolio")));
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
fn PortfolioForm(
    initial: PortfolioItem,
    on_save: EventHandler<PortfolioItem>,
    on_cancel: EventHandler<()>,
) -> Element {
    let base = initial.clone();
    let mut title = use_signal(|| initial.title.clone());
    let mut category = use_signal(|| initial.category.clone().unwrap_or_default());
    let mut description = use_signal(|| initial.description.clone().unwrap_or_default());
    let mut image_url = use_signal(|| initial.image_url.clone().unwrap_or_default());
    let mut tags = use_signal(|| initial.tags.join(", "));
    let mut link = use_signal(|| initial.link.clone().unwrap_or_default());
    let mut featured = use_signal(|| initial.featured);
    let mut order = use_signal(|| initial.display_order.to_string());
    let mut errors = use_signal(ValidationErrors::new);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let item = PortfolioItem {
            title: title.read().trim().to_string(),
            category: optional(&category.read()),
            description: optional(&description.read()),
            image_url: optional(&image_url.read()),
            tags: parse_tags(&tags.read()),
            link: optional(&link.read()),
            featured: *featured.read(),
            display_order: order.read().trim().parse().unwrap_or(0),
            updated_at: Utc::now(),
            ..base.clone()
        };
        let field_errors = validate_portfolio_item(&item);
        if field_errors.is_empty() {
            on_save.call(item);
        }
        errors.set(field_errors);
    };

    let field_errors = errors.read().clone();

    rsx! {
        form { class: "c-form c-admin-form", onsubmit: submit,
            FormField { label: "Title", error: field_errors.get("title").map(str::to_string),
                input { class: "c-form__input", value: "{title}", oninput: move |evt| title.set(evt.value()) }
            }
            FormField { label: "Category", error: None,
                input { class: "c-form__input", value: "{category}", oninput: move |evt| category.set(evt.value()) }
            }
            FormField { label: "Description", error: None,
                textarea {
                    class: "c-form__input",
                    rows: "3",
                    value: "{description}",
                    oninput: move |evt| description.set(evt.value()),
                }
            }
            FormField { label: "Image URL", error: field_errors.get("image_url").map(str::to_string),
                input { class: "c-form__input", value: "{image_url}", oninput: move |evt| image_url.set(evt.value()) }
            }
            FormField { label: "Tags (comma separated)", error: None,
                input { class: "c-form__input", value: "{tags}", oninput: move |evt| tags.set(evt.value()) }
            }
            FormField { label: "Project link", error: field_errors.get("link").map(str::to_string),
                input { class: "c-form__input", value: "{link}", oninput: move |evt| link.set(evt.value()) }
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
            label { class: "c-form__check",
                input {
                    r#type: "checkbox",
                    checked: *featured.read(),
                    onchange: move |evt| featured.set(evt.checked()),
                }
                "Featured on the home page"
            }
            div { class: "c-admin-form__actions",
                button { class: "c-btn c-btn--primary", r#type: "submit", "Save project" }
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
