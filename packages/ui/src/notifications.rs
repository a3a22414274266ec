use dioxus::prelude::*;

/// How long a notification stays up before dismissing itself.
pub const AUTO_DISMISS_SECS: u64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice info",
            NoticeLevel::Success => "notice success",
            NoticeLevel::Warning => "notice warning",
            NoticeLevel::Error => "notice error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notifications {
    pub entries: Vec<Notice>,
    next_id: u64,
}

impl Notifications {
    /// Append a notice and return its id.
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.entries.push(Notice {
            id: self.next_id,
            level,
            message: message.into(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|notice| notice.id != id);
    }
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

/// Show `message` and schedule its dismissal.
pub fn notify(notifications: &mut Signal<Notifications>, level: NoticeLevel, message: &str) {
    let id = notifications.write().push(level, message);

    #[cfg(target_arch = "wasm32")]
    {
        let mut notifications = *notifications;
        spawn(async move {
            gloo_timers::future::sleep(std::time::Duration::from_secs(AUTO_DISMISS_SECS)).await;
            notifications.write().dismiss(id);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = id;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut notifications = Notifications::default();
        let first = notifications.push(NoticeLevel::Success, "Password updated");
        let second = notifications.push(NoticeLevel::Error, "Request failed");
        assert_ne!(first, second);
        assert_eq!(notifications.entries[1].level, NoticeLevel::Error);

        notifications.dismiss(second);
        assert_eq!(notifications.entries.len(), 1);
        assert_eq!(notifications.entries[0].message, "Password updated");

        // Unknown ids are ignored
        notifications.dismiss(42);
        assert_eq!(notifications.entries.len(), 1);
    }
}
