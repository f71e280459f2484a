use dioxus::prelude::*;

use crate::app::components::{Notice, NoticeBanner};
use crate::domain::models::{FormSubmission, FormSubmissionPatch, SubmissionStatus};
use crate::server_fns::update_form_submission;
use crate::shared::hooks::{use_auth, use_content};

/// Submissions shown for a status filter; `None` hides archived ones
fn visible(submissions: &[FormSubmission], filter: Option<SubmissionStatus>) -> Vec<FormSubmission> {
    submissions
        .iter()
        .filter(|s| match filter {
            Some(status) => s.status == status,
            None => s.status != SubmissionStatus::Archived,
        })
        .cloned()
        .collect()
}

#[component]
pub fn AdminSubmissions() -> Element {
    let content = use_content();
    let mut filter = use_signal(|| None::<SubmissionStatus>);
    let notice = use_signal(|| None::<Notice>);

    let all = content.snapshot().form_submissions;
    let shown = visible(&all, *filter.read());
    let current = *filter.read();
    let open_count = visible(&all, None).len();

    rsx! {
        div { class: "c-admin-page",
            header { class: "c-admin-page__header",
                h1 { "Form submissions" }
                div { class: "c-filter",
                    button {
                        class: if current.is_none() { "c-filter__btn c-filter__btn--active" } else { "c-filter__btn" },
                        onclick: move |_| filter.set(None),
                        "Open ({open_count})"
                    }
                    for status in SubmissionStatus::ALL {
                        button {
                            class: if current == Some(status) { "c-filter__btn c-filter__btn--active" } else { "c-filter__btn" },
                            onclick: move |_| filter.set(Some(status)),
                            "{status}"
                        }
                    }
                }
            }
            NoticeBanner { notice: notice }

            if shown.is_empty() {
                p { class: "c-empty", "Nothing here." }
            }
            for submission in shown {
                SubmissionCard { key: "{submission.id}", submission: submission, notice: notice }
            }
        }
    }
}

#[component]
fn SubmissionCard(submission: FormSubmission, notice: Signal<Option<Notice>>) -> Element {
    let auth = use_auth();
    let content = use_content();
    let mut notice = notice;
    let initial_notes = submission.notes.clone().unwrap_or_default();
    let mut notes = use_signal(move || initial_notes);

    let id = submission.id.clone();
    let update = move |patch: FormSubmissionPatch| {
        let id = id.clone();
        spawn(async move {
            let result = update_form_submission(auth.token(), id, patch).await;
            match &result {
                Ok(Some(_)) => content.refresh().await,
                Ok(None) => tracing::warn!("Submission disappeared before it could be updated"),
                Err(e) => tracing::warn!("Submission update failed: {}", e),
            }
            notice.set(Some(Notice::for_update(&result, "submission")));
        });
    };

    let set_status = update.clone();
    let save_notes = update;
    let received = submission.created_at.format("%Y-%m-%d %H:%M").to_string();

    rsx! {
        article { class: "c-submission c-submission--{submission.status}",
            header { class: "c-submission__header",
                div {
                    strong { "{submission.name}" }
                    " · "
                    a { href: "mailto:{submission.email}", "{submission.email}" }
                    if let Some(phone) = submission.phone.clone() {
                        " · {phone}"
                    }
                }
                span { class: "c-submission__date", "{received}" }
            }
            if let Some(subject) = submission.subject.clone() {
                h3 { class: "c-submission__subject", "{subject}" }
            }
            p { class: "c-submission__message", "{submission.message}" }

            div { class: "c-submission__controls",
                select {
                    class: "c-form__input",
                    value: "{submission.status}",
                    onchange: move |evt| {
                        if let Ok(status) = evt.value().parse::<SubmissionStatus>() {
                            set_status(FormSubmissionPatch { status: Some(status), notes: None });
                        }
                    },
                    for status in SubmissionStatus::ALL {
                        option { value: "{status}", selected: status == submission.status, "{status}" }
                    }
                }
                textarea {
                    class: "c-form__input",
                    rows: "2",
                    placeholder: "Internal notes",
                    value: "{notes}",
                    oninput: move |evt| notes.set(evt.value()),
                }
                button {
                    class: "c-btn c-btn--ghost c-btn--sm",
                    onclick: move |_| {
                        let text = notes.read().clone();
                        save_notes(FormSubmissionPatch { status: None, notes: Some(text) });
                    },
                    "Save notes"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::NewFormSubmission;

    fn submission(status: SubmissionStatus) -> FormSubmission {
        let mut s = FormSubmission::create(NewFormSubmission {
            name: "Sita".to_string(),
            email: "sita@example.com".to_string(),
            phone: None,
            subject: Some("Mobile app".to_string()),
            message: "We need an app for our shop".to_string(),
        });
        s.status = status;
        s
    }

    #[test]
    fn test_default_filter_hides_archived() {
        let all = vec![
            submission(SubmissionStatus::New),
            submission(SubmissionStatus::Archived),
            submission(SubmissionStatus::Replied),
        ];
        assert_eq!(visible(&all, None).len(), 2);
        assert_eq!(visible(&all, Some(SubmissionStatus::Archived)).len(), 1);
    }
}
