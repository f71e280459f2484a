use dioxus::prelude::*;

use crate::app::components::{ContactForm, EditableText};
use crate::shared::hooks::use_content;

#[component]
pub fn Contact() -> Element {
    let content = use_content();
    let contact = content.snapshot().contact;

    rsx! {
        section { class: "c-section c-contact",
            h1 { class: "c-section__title",
                EditableText { content_key: "contact.title", default_value: "Let's build something together" }
            }
            p { class: "c-section__lead",
                EditableText {
                    content_key: "contact.subtitle",
                    default_value: "Tell us about your project and we'll get back to you within one business day.",
                    multiline: true,
                }
            }

            div { class: "c-contact__grid",
                ContactForm {}

                aside { class: "c-contact__info",
                    h3 { "Visit us" }
                    p { "{contact.address}" }

                    if !contact.phone.is_empty() {
                        h3 { "Call" }
                        for phone in contact.phone.iter() {
                            p { a { href: "tel:{phone}", "{phone}" } }
                        }
                    }

                    if !contact.email.is_empty() {
                        h3 { "Email" }
                        for email in contact.email.iter() {
                            p { a { href: "mailto:{email}", "{email}" } }
                        }
                    }

                    if !contact.business_hours.is_empty() {
                        h3 { "Business hours" }
                        for line in contact.business_hours.iter() {
                            p { "{line}" }
                        }
                    }

                    if !contact.social_links.is_empty() {
                        div { class: "c-contact__social",
                            for (network, url) in contact.social_links.iter() {
                                a { href: "{url}", target: "_blank", "{network}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
