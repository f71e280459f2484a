use dioxus::prelude::*;

/// Delete button with a confirmation overlay
/// Uses CSS classes: c-delete-btn, c-delete-btn__confirm-overlay, etc.
#[component]
pub fn DeleteButton(
    /// Called when deletion is confirmed
    on_confirm: EventHandler<()>,
    #[props(default = false)]
    is_loading: bool,
    /// Name shown in the confirmation prompt
    #[props(default = "this item".to_string())]
    item_label: String,
) -> Element {
    let mut show_confirm = use_signal(|| false);

    rsx! {
        div { class: "c-delete-btn__wrapper",
            button {
                class: "c-delete-btn",
                title: "Delete",
                onclick: move |evt| {
                    evt.stop_propagation();
                    show_confirm.set(true);
                },
                span { class: "c-delete-btn__icon", "🗑️" }
            }

            if *show_confirm.read() {
                div { class: "c-delete-btn__confirm-overlay",
                    span { class: "c-delete-btn__confirm-text", "Delete {item_label}?" }
                    div { class: "c-delete-btn__confirm-actions",
                        button {
                            class: "c-delete-btn__confirm-btn c-delete-btn__confirm-btn--danger",
                            disabled: is_loading,
                            onclick: move |evt| {
                                evt.stop_propagation();
                                show_confirm.set(false);
                                on_confirm.call(());
                            },
                            if is_loading { "..." } else { "Delete" }
                        }
                        button {
                            class: "c-delete-btn__confirm-btn c-delete-btn__confirm-btn--cancel",
                            onclick: move |evt| {
                                evt.stop_propagation();
                                show_confirm.set(false);
                            },
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}
