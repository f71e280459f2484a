use dioxus::prelude::*;

use crate::app::pages::Route;
use crate::shared::hooks::use_auth;

#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let user = auth.user();

    rsx! {
        nav { class: "c-navbar",
            Link {
                to: Route::Home {},
                class: "c-navbar__logo",
                "Naya Code"
            }

            div { class: "c-navbar__links",
                Link { to: Route::Home {}, class: "c-navbar__link", "Home" }
                a { href: "/#services", class: "c-navbar__link", "Services" }
                a { href: "/#portfolio", class: "c-navbar__link", "Portfolio" }
                a { href: "/#partners", class: "c-navbar__link", "Partners" }
                Link { to: Route::Contact {}, class: "c-navbar__link", "Contact" }
            }

            div { class: "c-navbar__actions",
                {match user {
                    Some(user) => rsx! {
                        span { class: "c-navbar__user", "{user.display_name()}" }
                        if auth.can_edit() {
                            Link { to: Route::AdminDashboard {}, class: "c-btn c-btn--ghost c-btn--sm", "Dashboard" }
                        }
                    },
                    None => rsx! {
                        Link { to: Route::Login { reset: String::new() }, class: "c-btn c-btn--ghost c-btn--sm", "Sign in" }
                    },
                }}
            }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer { class: "c-footer",
            p { class: "c-footer__brand", "Naya Code" }
            p { class: "c-footer__copy", "Innovative, scalable and secure IT solutions in Nepal and beyond." }
        }
    }
}
