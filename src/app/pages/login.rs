use dioxus::prelude::*;

use crate::app::components::{Notice, NoticeBanner};
use crate::app::pages::Route;
use crate::server_fns;
use crate::shared::hooks::{use_auth, use_content};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginMode {
    SignIn,
    SignUp,
}

/// Client-side check before a new password goes to the server, which
/// enforces the length rule
pub fn check_new_password(password: &str, confirm: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Enter a new password")
    } else if password != confirm {
        Some("Passwords do not match")
    } else {
        None
    }
}

/// `/login`, or `/login?reset=<token>` when arriving from a reset link
#[component]
pub fn Login(reset: String) -> Element {
    if reset.is_empty() {
        rsx! { SignInForm {} }
    } else {
        rsx! { ResetPasswordForm { token: reset } }
    }
}

#[component]
fn ResetPasswordForm(token: String) -> Element {
    let mut new_password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut done = use_signal(|| false);
    let mut notice = use_signal(|| None::<Notice>);

    let save = move |evt: FormEvent| {
        evt.prevent_default();
        let password = new_password.read().clone();
        if let Some(problem) = check_new_password(&password, &confirm.read()) {
            notice.set(Some(Notice::error(problem)));
            return;
        }
        let token = token.clone();
        spawn(async move {
            match server_fns::update_password(token, password).await {
                Ok(()) => {
                    done.set(true);
                    notice.set(Some(Notice::success("Password updated. You can sign in now.")));
                }
                Err(e) => notice.set(Some(Notice::error(format!(
                    "This reset link is no longer valid: {}",
                    e
                )))),
            }
        });
    };

    let finished = *done.read();

    rsx! {
        section { class: "c-login",
            h1 { "Choose a new password" }
            NoticeBanner { notice: notice }
            if finished {
                Link { to: Route::Login { reset: String::new() }, class: "c-btn c-btn--primary", "Sign in" }
            } else {
                form { class: "c-form", onsubmit: save,
                    label { class: "c-form__field",
                        span { class: "c-form__label", "New password" }
                        input {
                            class: "c-form__input",
                            r#type: "password",
                            value: "{new_password}",
                            oninput: move |evt| new_password.set(evt.value()),
                        }
                    }
                    label { class: "c-form__field",
                        span { class: "c-form__label", "Confirm password" }
                        input {
                            class: "c-form__input",
                            r#type: "password",
                            value: "{confirm}",
                            oninput: move |evt| confirm.set(evt.value()),
                        }
                    }
                    button { class: "c-btn c-btn--primary", r#type: "submit", "Update password" }
                }
            }
        }
    }
}

#[component]
fn SignInForm() -> Element {
    let auth = use_auth();
    let content = use_content();
    let nav = navigator();

    let mut mode = use_signal(|| LoginMode::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut full_name = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut notice = use_signal(|| None::<Notice>);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if *busy.read() {
            return;
        }
        let current_mode = *mode.read();
        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();
        let name_value = full_name.read().trim().to_string();

        busy.set(true);
        spawn(async move {
            match current_mode {
                LoginMode::SignIn => match auth.sign_in(email_value, password_value).await {
                    Ok(user) => {
                        content.refresh().await;
                        if user.role.can_edit() {
                            nav.push(Route::AdminDashboard {});
                        } else {
                            nav.push(Route::Home {});
                        }
                    }
                    Err(e) => notice.set(Some(Notice::error(e))),
                },
                LoginMode::SignUp => {
                    let name = (!name_value.is_empty()).then_some(name_value);
                    match server_fns::sign_up(email_value, password_value, name).await {
                        Ok(_) => {
                            mode.set(LoginMode::SignIn);
                            notice.set(Some(Notice::success("Account created. You can sign in now.")));
                        }
                        Err(e) => notice.set(Some(Notice::error(e.to_string()))),
                    }
                }
            }
            busy.set(false);
        });
    };

    let forgot = move |_| {
        let email_value = email.read().trim().to_string();
        if email_value.is_empty() {
            notice.set(Some(Notice::error("Enter your email first")));
            return;
        }
        spawn(async move {
            match server_fns::reset_password(email_value).await {
                Ok(()) => notice.set(Some(Notice::success(
                    "If that account exists, a reset link has been issued.",
                ))),
                Err(e) => notice.set(Some(Notice::error(e.to_string()))),
            }
        });
    };

    let signing_up = *mode.read() == LoginMode::SignUp;
    let is_busy = *busy.read();
    let submit_label = match (is_busy, signing_up) {
        (true, _) => "Please wait...",
        (false, true) => "Create account",
        (false, false) => "Sign in",
    };

    rsx! {
        section { class: "c-login",
            h1 { if signing_up { "Create an account" } else { "Sign in" } }
            NoticeBanner { notice: notice }

            form { class: "c-form", onsubmit: onsubmit,
                if signing_up {
                    label { class: "c-form__field",
                        span { class: "c-form__label", "Full name" }
                        input {
                            class: "c-form__input",
                            value: "{full_name}",
                            oninput: move |evt| full_name.set(evt.value()),
                        }
                    }
                }
                label { class: "c-form__field",
                    span { class: "c-form__label", "Email" }
                    input {
                        class: "c-form__input",
                        r#type: "email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { class: "c-form__field",
                    span { class: "c-form__label", "Password" }
                    input {
                        class: "c-form__input",
                        r#type: "password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                button {
                    class: "c-btn c-btn--primary",
                    r#type: "submit",
                    disabled: is_busy,
                    "{submit_label}"
                }
            }

            div { class: "c-login__links",
                if !signing_up {
                    button { class: "c-btn c-btn--link", onclick: forgot, "Forgot password?" }
                }
                button {
                    class: "c-btn c-btn--link",
                    onclick: move |_| {
                        notice.set(None);
                        mode.set(if signing_up { LoginMode::SignIn } else { LoginMode::SignUp });
                    },
                    if signing_up { "Already have an account? Sign in" } else { "Need an account? Sign up" }
                }
            }
        }
    }
}
