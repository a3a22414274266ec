use dioxus::prelude::*;

use crate::notifications::use_notifications;

const NOTIFICATIONS_CSS: Asset = asset!("/assets/styling/notifications.css");

#[component]
pub fn NotificationTray() -> Element {
    let mut notifications = use_notifications();
    let entries = notifications().entries.clone();

    if entries.is_empty() {
        return rsx! {
            document::Stylesheet { href: NOTIFICATIONS_CSS }
        };
    }

    rsx! {
        document::Stylesheet { href: NOTIFICATIONS_CSS }

        div {
            class: "notification-tray",
            role: "status",
            for notice in entries {
                div {
                    key: "{notice.id}",
                    class: notice.level.class(),
                    span { class: "notice-message", "{notice.message}" }
                    button {
                        class: "notice-dismiss",
                        title: "Dismiss",
                        onclick: move |_| notifications.write().dismiss(notice.id),
                        "×"
                    }
                }
            }
        }
    }
}
