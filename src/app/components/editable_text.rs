use dioxus::prelude::*;

use crate::server_fns::save_snippet;
use crate::shared::hooks::{use_auth, use_content};
use crate::shared::state::EditableField;

/// Page copy bound to a content snippet.
///
/// Shows `snippet(key)` or `default_value`. In edit mode an editor can open an
/// inline draft; saving writes the snippet and refreshes the content cache.
#[component]
pub fn EditableText(
    content_key: String,
    default_value: String,
    #[props(default = false)]
    multiline: bool,
    #[props(default = "".to_string())]
    class: String,
) -> Element {
    let content = use_content();
    let auth = use_auth();
    let key = content_key.clone();
    let mut field = use_signal(move || EditableField::new(key));

    // Leaving edit mode throws away an open draft
    use_effect(move || {
        let edit_mode = content.is_edit_mode();
        field.write().on_edit_mode_changed(edit_mode);
    });

    let resolved = content.resolve_text(&content_key, &default_value);
    let state = field.read().clone();
    let can_open = content.is_edit_mode() && auth.can_edit();

    let save = move |_| {
        let Some(commit) = field.write().begin_save() else {
            return;
        };
        spawn(async move {
            let result = save_snippet(auth.token(), commit.key, commit.value)
                .await
                .map_err(|e| format!("Failed to update content: {}", e));
            if result.is_ok() {
                content.refresh().await;
            }
            field.write().finish_save(result);
        });
    };

    if state.is_editing() || state.is_saving() {
        let saving = state.is_saving();
        let draft = state.draft().to_string();
        let error = state.error().map(str::to_string);
        return rsx! {
            div { class: "c-editable c-editable--open",
                if multiline {
                    textarea {
                        class: "c-editable__input c-editable__input--multiline",
                        value: "{draft}",
                        disabled: saving,
                        oninput: move |evt| field.write().update_draft(evt.value()),
                    }
                } else {
                    input {
                        class: "c-editable__input",
                        r#type: "text",
                        value: "{draft}",
                        disabled: saving,
                        oninput: move |evt| field.write().update_draft(evt.value()),
                    }
                }
                div { class: "c-editable__actions",
                    button {
                        class: "c-btn c-btn--primary c-btn--sm",
                        disabled: saving,
                        onclick: save,
                        if saving { "Saving..." } else { "Save" }
                    }
                    button {
                        class: "c-btn c-btn--ghost c-btn--sm",
                        disabled: saving,
                        onclick: move |_| field.write().cancel(),
                        "Cancel"
                    }
                }
                if let Some(error) = error {
                    p { class: "c-editable__error", "{error}" }
                }
            }
        };
    }

    let seed = resolved.clone();
    rsx! {
        span { class: "c-editable {class}",
            "{resolved}"
            if can_open {
                button {
                    class: "c-editable__trigger",
                    title: "Edit",
                    onclick: move |_| field.write().begin_edit(&seed),
                    "✏️"
                }
            }
        }
    }
}
