use dioxus::prelude::*;

use crate::domain::services::ContactFormInput;
use crate::server_fns::{submit_contact_form, SubmitOutcome};
use crate::shared::errors::ValidationErrors;

use super::common::{Notice, NoticeBanner};

/// Public contact form. Field rules are checked here first and again on the server.
#[component]
pub fn ContactForm() -> Element {
    let mut form = use_signal(ContactFormInput::default);
    let mut errors = use_signal(ValidationErrors::new);
    let mut submitting = use_signal(|| false);
    let mut notice = use_signal(|| None::<Notice>);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if *submitting.read() {
            return;
        }

        let input = form.read().clone();
        let field_errors = input.errors();
        if !field_errors.is_empty() {
            errors.set(field_errors);
            return;
        }

        errors.set(ValidationErrors::new());
        submitting.set(true);
        spawn(async move {
            match submit_contact_form(input).await {
                Ok(SubmitOutcome::Accepted(_)) => {
                    form.set(ContactFormInput::default());
                    notice.set(Some(Notice::success(
                        "Thank you! Your message has been sent. We'll get back to you soon.",
                    )));
                }
                Ok(SubmitOutcome::Rejected(server_errors)) => errors.set(server_errors),
                Err(e) => {
                    tracing::warn!("Contact form submission failed: {}", e);
                    notice.set(Some(Notice::error(
                        "Failed to send message. Please try again.",
                    )));
                }
            }
            submitting.set(false);
        });
    };

    let values = form.read().clone();
    let field_errors = errors.read().clone();
    let busy = *submitting.read();

    rsx! {
        form { class: "c-form", onsubmit: onsubmit,
            NoticeBanner { notice: notice }

            FormField { label: "Name", error: field_errors.get("name").map(str::to_string),
                input {
                    class: "c-form__input",
                    name: "name",
                    value: "{values.name}",
                    oninput: move |evt| form.write().name = evt.value(),
                }
            }
            FormField { label: "Email", error: field_errors.get("email").map(str::to_string),
                input {
                    class: "c-form__input",
                    r#type: "email",
                    name: "email",
                    value: "{values.email}",
                    oninput: move |evt| form.write().email = evt.value(),
                }
            }
            FormField { label: "Phone (optional)", error: field_errors.get("phone").map(str::to_string),
                input {
                    class: "c-form__input",
                    r#type: "tel",
                    name: "phone",
                    value: "{values.phone}",
                    oninput: move |evt| form.write().phone = evt.value(),
                }
            }
            FormField { label: "Subject", error: field_errors.get("subject").map(str::to_string),
                input {
                    class: "c-form__input",
                    name: "subject",
                    value: "{values.subject}",
                    oninput: move |evt| form.write().subject = evt.value(),
                }
            }
            FormField { label: "Message", error: field_errors.get("message").map(str::to_string),
                textarea {
                    class: "c-form__input c-form__input--multiline",
                    name: "message",
                    rows: "6",
                    value: "{values.message}",
                    oninput: move |evt| form.write().message = evt.value(),
                }
            }

            button {
                class: "c-btn c-btn--primary",
                r#type: "submit",
                disabled: busy,
                if busy { "Sending..." } else { "Send Message" }
            }
        }
    }
}

/// Label, control and inline error
#[component]
pub fn FormField(label: String, error: Option<String>, children: Element) -> Element {
    rsx! {
        label { class: "c-form__field",
            span { class: "c-form__label", "{label}" }
            {children}
            if let Some(error) = error {
                span { class: "c-form__error", "{error}" }
            }
        }
    }
}
