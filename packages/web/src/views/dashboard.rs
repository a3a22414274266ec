use dioxus::prelude::*;
use ui::views::DashboardView;

use crate::Protected;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        Protected {
            DashboardView {}
        }
    }
}
