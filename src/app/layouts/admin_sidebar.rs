use dioxus::prelude::*;

use crate::app::pages::Route;
use crate::shared::hooks::{use_auth, use_content};

#[component]
pub fn AdminSidebar() -> Element {
    let auth = use_auth();
    let content = use_content();
    let nav = navigator();
    let unread = content.cache.read().dashboard().unread_submissions;

    rsx! {
        aside { class: "c-sidebar",
            div { class: "c-sidebar__header",
                h2 { "Content Manager" }
                if let Some(user) = auth.user() {
                    p { class: "c-sidebar__user", "{user.email} ({user.role.as_str()})" }
                }
            }
            nav { class: "c-sidebar__nav",
                ul {
                    li { Link { to: Route::AdminDashboard {}, "📊 Dashboard" } }
                    li { Link { to: Route::AdminContent {}, "📝 Page text" } }
                    li { Link { to: Route::AdminServices {}, "🛠️ Services" } }
                    li { Link { to: Route::AdminPortfolio {}, "🗂️ Portfolio" } }
                    li { Link { to: Route::AdminPartners {}, "🤝 Partners" } }
                    li { Link { to: Route::AdminContactInfo {}, "📍 Contact info" } }
                    li {
                        Link { to: Route::AdminSubmissions {},
                            "📬 Submissions"
                            if unread > 0 {
                                span { class: "c-sidebar__badge", "{unread}" }
                            }
                        }
                    }
                    if auth.is_admin() {
                        li { Link { to: Route::AdminUsers {}, "👥 Users" } }
                    }
                }
            }
            div { class: "c-sidebar__footer",
                Link { to: Route::Home {}, "← View site" }
                button {
                    class: "c-btn c-btn--ghost c-btn--sm",
                    onclick: move |_| {
                        spawn(async move {
                            auth.sign_out().await;
                            content.set_edit_mode(false);
                            content.refresh().await;
                            nav.push(Route::Home {});
                        });
                    },
                    "Sign out"
                }
            }
        }
    }
}
