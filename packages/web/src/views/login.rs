//! Login page view with email/password form.

use dioxus::prelude::*;
use ui::forms::LoginForm;
use ui::hooks::use_login;

use crate::{GuestOnly, Route};

#[component]
pub fn Login() -> Element {
    let login = use_login();
    let mut form = use_signal(LoginForm::default);
    let mut form_error = use_signal(|| Option::<String>::None);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        match form.read().validate() {
            Ok(credentials) => {
                form_error.set(None);
                login.mutate(credentials);
            }
            Err(err) => form_error.set(Some(err.to_string())),
        }
    };

    let error = form_error().or_else(|| login.state().error().map(|err| err.to_string()));
    let email = form.read().email.clone();
    let password = form.read().password.clone();

    rsx! {
        GuestOnly {
            div {
                class: "auth-page",
                h1 { "Welcome back" }
                form {
                    class: "stacked-form",
                    onsubmit: handle_login,
                    label { r#for: "email", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        autocomplete: "email",
                        value: "{email}",
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                    label { r#for: "password", "Password" }
                    input {
                        id: "password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{password}",
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                    if let Some(error) = error {
                        p { class: "form-error", "{error}" }
                    }
                    button {
                        r#type: "submit",
                        class: "primary",
                        disabled: login.is_pending(),
                        if login.is_pending() { "Signing in..." } else { "Log in" }
                    }
                }
                p {
                    class: "muted",
                    "No account yet? "
                    Link { to: Route::Signup {}, "Sign up" }
                }
            }
        }
    }
}
