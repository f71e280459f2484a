use dioxus::prelude::*;

use crate::app::components::{Notice, NoticeBanner};
use crate::domain::defaults::default_snippets;
use crate::domain::models::ContentSnapshot;
use crate::server_fns::save_snippet;
use crate::shared::hooks::{use_auth, use_content};

/// Snippet keys to list: stored ones plus the built-in keys, sorted
fn snippet_rows(snapshot: &ContentSnapshot) -> Vec<(String, String)> {
    let mut rows: Vec<(String, String)> = snapshot
        .snippets
        .iter()
        .map(|s| (s.key.clone(), s.value.clone()))
        .collect();
    for default in default_snippets() {
        if snapshot.snippet(&default.key).is_none() {
            rows.push((default.key, default.value));
        }
    }
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

#[component]
pub fn AdminContent() -> Element {
    let auth = use_auth();
    let content = use_content();
    let notice = use_signal(|| None::<Notice>);
    let mut new_key = use_signal(String::new);
    let mut new_value = use_signal(String::new);

    let rows = snippet_rows(&content.snapshot());

    let add = move |evt: FormEvent| {
        evt.prevent_default();
        let key = new_key.read().trim().to_string();
        let value = new_value.read().clone();
        let mut notice = notice;
        if key.is_empty() {
            notice.set(Some(Notice::error("A key is required")));
            return;
        }
        spawn(async move {
            let result = save_snippet(auth.token(), key, value).await;
            if result.is_ok() {
                new_key.set(String::new());
                new_value.set(String::new());
                content.refresh().await;
            }
            notice.set(Some(Notice::for_update(&result, "content")));
        });
    };

    rsx! {
        div { class: "c-admin-page",
            header { class: "c-admin-page__header",
                h1 { "Page text" }
                p { "Dotted keys address text on the public pages, e.g. hero.title." }
            }
            NoticeBanner { notice: notice }

            div { class: "c-snippets",
                for (key, value) in rows {
                    SnippetRow { key: "{key}", content_key: key.clone(), value: value, notice: notice }
                }
            }

            section { class: "c-admin-page__section",
                h2 { "Add text" }
                form { class: "c-form c-form--inline", onsubmit: add,
                    input {
                        class: "c-form__input",
                        placeholder: "section.key",
                        value: "{new_key}",
                        oninput: move |evt| new_key.set(evt.value()),
                    }
                    input {
                        class: "c-form__input",
                        placeholder: "Text",
                        value: "{new_value}",
                        oninput: move |evt| new_value.set(evt.value()),
                    }
                    button { class: "c-btn c-btn--primary", r#type: "submit", "Add" }
                }
            }
        }
    }
}

#[component]
fn SnippetRow(content_key: String, value: String, notice: Signal<Option<Notice>>) -> Element {
    let auth = use_auth();
    let content = use_content();
    let initial = value.clone();
    let mut draft = use_signal(move || initial);
    let mut saving = use_signal(|| false);
    let mut notice = notice;

    let dirty = *draft.read() != value;
    let key = content_key.clone();
    let save = move |_| {
        let key = key.clone();
        let value = draft.read().clone();
        saving.set(true);
        spawn(async move {
            let result = save_snippet(auth.token(), key, value).await;
            if result.is_ok() {
                content.refresh().await;
            }
            notice.set(Some(Notice::for_update(&result, "content")));
            saving.set(false);
        });
    };

    rsx! {
        div { class: "c-snippets__row",
            label { class: "c-snippets__key", "{content_key}" }
            textarea {
                class: "c-form__input",
                rows: "2",
                value: "{draft}",
                oninput: move |evt| draft.set(evt.value()),
            }
            button {
                class: "c-btn c-btn--primary c-btn--sm",
                disabled: !dirty || *saving.read(),
                onclick: save,
                if *saving.read() { "Saving..." } else { "Save" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ContentSnippet;

    #[test]
    fn test_rows_merge_stored_and_builtin_keys() {
        let mut snapshot = ContentSnapshot::default();
        snapshot.snippets.push(ContentSnippet::new("hero.title", "Custom"));
        snapshot.snippets.push(ContentSnippet::new("zzz.extra", "Extra"));

        let rows = snippet_rows(&snapshot);

        let hero: Vec<_> = rows.iter().filter(|(k, _)| k == "hero.title").collect();
        assert_eq!(hero.len(), 1);
        assert_eq!(hero[0].1, "Custom");
        assert!(rows.iter().any(|(k, _)| k == "about.title"));
        assert_eq!(rows.last().map(|(k, _)| k.as_str()), Some("zzz.extra"));
    }
}
