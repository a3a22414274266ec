//! Signup page view.

use dioxus::prelude::*;
use ui::forms::SignupForm;
use ui::hooks::use_signup;

use crate::{GuestOnly, Route};

#[component]
pub fn Signup() -> Element {
    let signup = use_signup();
    let mut form = use_signal(SignupForm::default);
    let mut form_error = use_signal(|| Option::<String>::None);

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        match form.read().validate() {
            Ok(details) => {
                form_error.set(None);
                signup.mutate(details);
            }
            Err(err) => form_error.set(Some(err.to_string())),
        }
    };

    let error = form_error().or_else(|| signup.state().error().map(|err| err.to_string()));
    let SignupForm {
        first_name,
        last_name,
        email,
        password,
    } = form();

    rsx! {
        GuestOnly {
            div {
                class: "auth-page",
                h1 { "Create your account" }
                form {
                    class: "stacked-form",
                    onsubmit: handle_signup,
                    div {
                        class: "form-row",
                        div {
                            label { r#for: "first-name", "First name" }
                            input {
                                id: "first-name",
                                autocomplete: "given-name",
                                value: "{first_name}",
                                oninput: move |evt: FormEvent| form.write().first_name = evt.value(),
                            }
                        }
                        div {
                            label { r#for: "last-name", "Last name" }
                            input {
                                id: "last-name",
                                autocomplete: "family-name",
                                value: "{last_name}",
                                oninput: move |evt: FormEvent| form.write().last_name = evt.value(),
                            }
                        }
                    }
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
                        autocomplete: "new-password",
                        value: "{password}",
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                    if let Some(error) = error {
                        p { class: "form-error", "{error}" }
                    }
                    button {
                        r#type: "submit",
                        class: "primary",
                        disabled: signup.is_pending(),
                        if signup.is_pending() { "Creating account..." } else { "Sign up" }
                    }
                }
                p {
                    class: "muted",
                    "Already registered? "
                    Link { to: Route::Login {}, "Log in" }
                }
            }
        }
    }
}
