use dioxus::prelude::*;

#[component]
pub fn StatCard(label: String, value: String, #[props(default)] hint: Option<String>) -> Element {
    rsx! {
        div {
            class: "stat-card",
            span { class: "stat-label", "{label}" }
            strong { class: "stat-value", "{value}" }
            if let Some(hint) = hint {
                span { class: "stat-hint", "{hint}" }
            }
        }
    }
}
