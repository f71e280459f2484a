use dioxus::document;
use dioxus::prelude::*;

use crate::app::components::{EditModeToggle, LoadingText};
use crate::app::layouts::{AdminSidebar, Footer, Navbar};
use crate::shared::hooks::{use_auth, use_auth_provider, use_content, use_content_provider, AuthState};

use super::admin::{
    AdminContactInfo, AdminContent, AdminDashboard, AdminPartners, AdminPortfolio, AdminServices,
    AdminSubmissions, AdminUsers,
};
use super::{Contact, Home, Login};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/")]
        Home {},
        #[route("/contact")]
        Contact {},
        #[route("/login?:reset")]
        Login { reset: String },

        #[nest("/admin")]
            #[layout(AdminLayout)]
                #[route("/")]
                AdminDashboard {},
                #[route("/content")]
                AdminContent {},
                #[route("/services")]
                AdminServices {},
                #[route("/portfolio")]
                AdminPortfolio {},
                #[route("/partners")]
                AdminPartners {},
                #[route("/contact")]
                AdminContactInfo {},
                #[route("/submissions")]
                AdminSubmissions {},
                #[route("/users")]
                AdminUsers {},
            #[end_layout]
        #[end_nest]

        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

#[component]
pub fn App() -> Element {
    use_effect(|| {
        tracing::info!("Naya Code site initialized");
    });

    rsx! {
        Router::<Route> {}
    }
}

/// Root layout. Owns the auth session and the content cache for the page session.
#[component]
fn Layout() -> Element {
    const MAIN_CSS: Asset = asset!("/assets/main.css");

    use_auth_provider();
    use_content_provider();

    rsx! {
        document::Link {
            rel: "stylesheet",
            href: MAIN_CSS
        },
        div { class: "c-layout",
            Navbar {}
            main { class: "c-layout__main",
                Outlet::<Route> {}
            }
            Footer {}
            EditModeToggle {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminGate {
    Checking,
    Denied,
    Open,
}

fn admin_gate(state: &AuthState) -> AdminGate {
    if !state.checked {
        AdminGate::Checking
    } else if state.user.as_ref().is_some_and(|user| user.role.can_edit()) {
        AdminGate::Open
    } else {
        AdminGate::Denied
    }
}

/// Editor-only shell for `/admin/*`
#[component]
fn AdminLayout() -> Element {
    let auth = use_auth();
    let gate = admin_gate(&auth.state.read());

    match gate {
        AdminGate::Checking => rsx! {
            LoadingText { message: "Checking your session..." }
        },
        AdminGate::Denied => rsx! {
            div { class: "c-admin-denied",
                h1 { "Editors only" }
                p { "Sign in with an editor or admin account to manage site content." }
                Link { to: Route::Login { reset: String::new() }, class: "c-btn c-btn--primary", "Sign in" }
            }
        },
        AdminGate::Open => rsx! { AdminPanel {} },
    }
}

/// Mounted once per visit to `/admin`; pulls fresh content (and the
/// submissions only editors see) on entry
#[component]
fn AdminPanel() -> Element {
    let content = use_content();
    use_hook(|| spawn(async move { content.refresh().await }));

    rsx! {
        div { class: "c-admin",
            AdminSidebar {}
            section { class: "c-admin__main",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "c-not-found",
            h1 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Home {}, class: "c-btn c-btn--primary", "Back home" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AuthUser, Role, UserProfile};

    fn signed_in(role: Role) -> AuthState {
        AuthState {
            token: Some("token".to_string()),
            user: Some(AuthUser {
                id: "u1".to_string(),
                email: "sita@nayacode.com.np".to_string(),
                role,
                profile: UserProfile::default(),
            }),
            checked: true,
        }
    }

    #[test]
    fn test_admin_gate() {
        assert_eq!(admin_gate(&AuthState::default()), AdminGate::Checking);
        assert_eq!(
            admin_gate(&AuthState { checked: true, ..Default::default() }),
            AdminGate::Denied
        );
        assert_eq!(admin_gate(&signed_in(Role::User)), AdminGate::Denied);
        assert_eq!(admin_gate(&signed_in(Role::Editor)), AdminGate::Open);
        assert_eq!(admin_gate(&signed_in(Role::Admin)), AdminGate::Open);
    }
}
