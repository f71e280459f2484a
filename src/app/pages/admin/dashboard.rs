use dioxus::prelude::*;

use crate::app::components::{optional, ErrorMessage, Notice, NoticeBanner, StatCard};
use crate::app::pages::login::check_new_password;
use crate::app::pages::Route;
use crate::domain::models::{FormSubmission, UserProfile};
use crate::domain::services::is_valid_url;
use crate::server_fns::{update_password, update_profile};
use crate::shared::hooks::{use_auth, use_content};

struct RecentRow {
    id: String,
    name: String,
    subject: String,
    status: &'static str,
    received: String,
}

impl From<&FormSubmission> for RecentRow {
    fn from(submission: &FormSubmission) -> Self {
        Self {
            id: submission.id.clone(),
            name: submission.name.clone(),
            subject: submission.subject.clone().unwrap_or_default(),
            status: submission.status.as_str(),
            received: submission.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[component]
pub fn AdminDashboard() -> Element {
    let content = use_content();
    let summary = content.cache.read().dashboard();
    let last_error = content.last_error();
    let recent: Vec<RecentRow> = summary.recent_submissions.iter().map(RecentRow::from).collect();

    rsx! {
        div { class: "c-admin-page",
            header { class: "c-admin-page__header",
                h1 { "Dashboard" }
                button {
                    class: "c-btn c-btn--ghost c-btn--sm",
                    onclick: move |_| {
                        spawn(async move { content.refresh().await });
                    },
                    "Refresh"
                }
            }

            if let Some(error) = last_error {
                ErrorMessage { message: format!("Could not load the latest content: {}", error) }
            }

            div { class: "c-stats",
                StatCard { label: "Services", value: summary.services }
                StatCard { label: "Portfolio items", value: summary.portfolio }
                StatCard { label: "Partners", value: summary.partners }
                StatCard {
                    label: "Submissions",
                    value: summary.submissions,
                    hint: format!("{} new", summary.unread_submissions),
                }
            }

            section { class: "c-admin-page__section",
                div { class: "c-admin-page__section-header",
                    h2 { "Recent submissions" }
                    Link { to: Route::AdminSubmissions {}, "View all →" }
                }
                if recent.is_empty() {
                    p { class: "c-empty", "No submissions yet." }
                } else {
                    table { class: "c-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Subject" }
                                th { "Status" }
                                th { "Received" }
                            }
                        }
                        tbody {
                            for row in recent {
                                tr { key: "{row.id}",
                                    td { "{row.name}" }
                                    td { "{row.subject}" }
                                    td { span { class: "c-status c-status--{row.status}", "{row.status}" } }
                                    td { "{row.received}" }
                                }
                            }
                        }
                    }
                }
            }

            ProfileForm {}
            ChangePassword {}
        }
    }
}

#[component]
fn ProfileForm() -> Element {
    let auth = use_auth();
    let profile = auth.user().map(|user| user.profile).unwrap_or_default();
    let (initial_name, initial_avatar) = (profile.full_name, profile.avatar_url);
    let mut full_name = use_signal(move || initial_name.unwrap_or_default());
    let mut avatar_url = use_signal(move || initial_avatar.unwrap_or_default());
    let mut notice = use_signal(|| None::<Notice>);

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(token) = auth.token() else {
            notice.set(Some(Notice::error("Your session has expired")));
            return;
        };
        let avatar = avatar_url.read().trim().to_string();
        if !avatar.is_empty() && !is_valid_url(&avatar) {
            notice.set(Some(Notice::error("Avatar must be a valid URL")));
            return;
        }
        let profile = UserProfile {
            full_name: optional(&full_name.read()),
            avatar_url: optional(&avatar),
        };
        spawn(async move {
            let result = update_profile(token, profile).await;
            if let Ok(user) = &result {
                auth.set_user(user.clone());
            }
            notice.set(Some(Notice::for_update(&result, "profile")));
        });
    };

    rsx! {
        section { class: "c-admin-page__section",
            h2 { "Profile" }
            NoticeBanner { notice: notice }
            form { class: "c-form c-form--inline", onsubmit: save,
                input {
                    class: "c-form__input",
                    placeholder: "Full name",
                    value: "{full_name}",
                    oninput: move |evt| full_name.set(evt.value()),
                }
                input {
                    class: "c-form__input",
                    r#type: "url",
                    placeholder: "Avatar URL",
                    value: "{avatar_url}",
                    oninput: move |evt| avatar_url.set(evt.value()),
                }
                button { class: "c-btn c-btn--primary", r#type: "submit", "Save profile" }
            }
        }
    }
}

/// Password change for the signed-in account
#[component]
fn ChangePassword() -> Element {
    let auth = use_auth();
    let mut new_password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut notice = use_signal(|| None::<Notice>);

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let password = new_password.read().clone();
        if let Some(problem) = check_new_password(&password, &confirm.read()) {
            notice.set(Some(Notice::error(problem)));
            return;
        }
        let Some(token) = auth.token() else {
            notice.set(Some(Notice::error("Your session has expired")));
            return;
        };
        spawn(async move {
            match update_password(token, password).await {
                Ok(()) => {
                    new_password.set(String::new());
                    confirm.set(String::new());
                    notice.set(Some(Notice::success("Password updated successfully")));
                }
                Err(e) => notice.set(Some(Notice::error(e.to_string()))),
            }
        });
    };

    rsx! {
        section { class: "c-admin-page__section",
            h2 { "Change password" }
            NoticeBanner { notice: notice }
            form { class: "c-form c-form--inline", onsubmit: save,
                input {
                    class: "c-form__input",
                    r#type: "password",
                    placeholder: "New password",
                    value: "{new_password}",
                    oninput: move |evt| new_password.set(evt.value()),
                }
                input {
                    class: "c-form__input",
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: "{confirm}",
                    oninput: move |evt| confirm.set(evt.value()),
                }
                button { class: "c-btn c-btn--primary", r#type: "submit", "Update" }
            }
        }
    }
}
