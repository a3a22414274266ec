use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::forms::PasswordForm;
use crate::hooks::use_update_password;

/// Account details, password change and logout.
#[component]
pub fn AccountView() -> Element {
    let auth = use_auth();
    let update = use_update_password();
    let mut form = use_signal(PasswordForm::default);
    let mut form_error = use_signal(|| Option::<String>::None);

    let (name, email) = auth
        .read()
        .user
        .as_ref()
        .map(|user| (user.display_name(), user.email.clone()))
        .unwrap_or_default();

    // Clear the fields once the server accepted the change.
    use_effect(move || {
        if update.state().data().is_some() {
            form.set(PasswordForm::default());
        }
    });

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match form.read().validate() {
            Ok(request) => {
                form_error.set(None);
                update.mutate(request);
            }
            Err(err) => form_error.set(Some(err.to_string())),
        }
    };

    let current = form.read().current_password.clone();
    let new = form.read().new_password.clone();
    let confirm = form.read().confirm_password.clone();

    rsx! {
        section {
            class: "dashboard-section",
            h2 { "Account" }
            dl {
                class: "account-details",
                dt { "Name" }
                dd { "{name}" }
                dt { "Email" }
                dd { "{email}" }
            }

            h3 { "Change password" }
            form {
                class: "stacked-form",
                onsubmit: on_submit,
                label { r#for: "current-password", "Current password" }
                input {
                    id: "current-password",
                    r#type: "password",
                    autocomplete: "current-password",
                    value: "{current}",
                    oninput: move |evt: FormEvent| form.write().current_password = evt.value(),
                }
                label { r#for: "new-password", "New password" }
                input {
                    id: "new-password",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: "{new}",
                    oninput: move |evt: FormEvent| form.write().new_password = evt.value(),
                }
                label { r#for: "confirm-password", "Confirm new password" }
                input {
                    id: "confirm-password",
                    r#type: "password",
                    autocomplete: "new-password",
                    value: "{confirm}",
                    oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                }
                if let Some(message) = form_error() {
                    p { class: "form-error", "{message}" }
                }
                button {
                    r#type: "submit",
                    class: "primary",
                    disabled: update.is_pending(),
                    if update.is_pending() { "Updating..." } else { "Update password" }
                }
            }

            div {
                class: "danger-zone",
                LogoutButton { class: "secondary" }
            }
        }
    }
}
