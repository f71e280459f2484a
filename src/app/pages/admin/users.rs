use dioxus::prelude::*;

use crate::app::components::{ErrorMessage, LoadingText, Notice, NoticeBanner};
use crate::domain::models::Role;
use crate::server_fns::{list_users, set_user_role};
use crate::shared::hooks::use_auth;

const ROLES: [Role; 3] = [Role::Admin, Role::Editor, Role::User];

fn parse_role(value: &str) -> Option<Role> {
    ROLES.into_iter().find(|role| role.as_str() == value)
}

/// Admin-only user list with role assignment
#[component]
pub fn AdminUsers() -> Element {
    let auth = use_auth();
    let mut notice = use_signal(|| None::<Notice>);
    let mut users = use_resource(move || async move { list_users(auth.token()).await });

    if !auth.is_admin() {
        return rsx! {
            ErrorMessage { message: "Only administrators can manage users." }
        };
    }

    let me = auth.user().map(|user| user.id).unwrap_or_default();

    let body = match &*users.read() {
        None => rsx! { LoadingText { message: "Loading users..." } },
        Some(Err(e)) => rsx! { ErrorMessage { message: format!("Failed to load users: {}", e) } },
        Some(Ok(list)) => rsx! {
            table { class: "c-table",
                thead {
                    tr {
                        th { "Email" }
                        th { "Name" }
                        th { "Role" }
                    }
                }
                tbody {
                    for user in list.iter().cloned() {
                        tr { key: "{user.id}",
                            td { "{user.email}" }
                            td { "{user.profile.full_name.clone().unwrap_or_default()}" }
                            td {
                                select {
                                    class: "c-form__input",
                                    disabled: user.id == me,
                                    value: "{user.role.as_str()}",
                                    onchange: {
                                        let user_id = user.id.clone();
                                        move |evt: FormEvent| {
                                            let Some(role) = parse_role(&evt.value()) else {
                                                return;
                                            };
                                            let user_id = user_id.clone();
                                            spawn(async move {
                                                let result = set_user_role(auth.token(), user_id, role).await;
                                                if result.is_ok() {
                                                    users.restart();
                                                }
                                                notice.set(Some(Notice::for_update(&result, "user role")));
                                            });
                                        }
                                    },
                                    for role in ROLES {
                                        option { value: role.as_str(), selected: role == user.role, "{role.as_str()}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    };

    rsx! {
        div { class: "c-admin-page",
            header { class: "c-admin-page__header",
                h1 { "Users" }
                p { "Editors can change site content. Admins can also manage users." }
            }
            NoticeBanner { notice: notice }
            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("editor"), Some(Role::Editor));
        assert_eq!(parse_role("owner"), None);
    }
}
