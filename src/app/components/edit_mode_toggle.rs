use dioxus::prelude::*;

use crate::app::pages::Route;
use crate::shared::hooks::{use_auth, use_content};

/// Floating edit-mode switch, only rendered for editors and admins
#[component]
pub fn EditModeToggle() -> Element {
    let auth = use_auth();
    let content = use_content();

    if !auth.can_edit() {
        return rsx! {};
    }

    let on = content.is_edit_mode();
    let label = if on { "Exit edit mode" } else { "Edit page" };
    let active_class = if on { "c-edit-toggle__btn--active" } else { "" };

    rsx! {
        div { class: "c-edit-toggle",
            button {
                class: "c-edit-toggle__btn {active_class}",
                onclick: move |_| content.set_edit_mode(!on),
                "✏️ {label}"
            }
            Link {
                to: Route::AdminDashboard {},
                class: "c-edit-toggle__link",
                "Admin"
            }
        }
    }
}
