use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::icons::{FaBullhorn, FaChartLine, FaCreditCard, FaDatabase, FaHouse, FaUser};
use crate::Icon;

use super::{AccountView, BillingView, ComingSoon, DatabaseView, OverviewView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardSection {
    Overview,
    Database,
    Campaigns,
    Analytics,
    Billing,
    Account,
}

impl DashboardSection {
    pub const ALL: [DashboardSection; 6] = [
        DashboardSection::Overview,
        DashboardSection::Database,
        DashboardSection::Campaigns,
        DashboardSection::Analytics,
        DashboardSection::Billing,
        DashboardSection::Account,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DashboardSection::Overview => "Overview",
            DashboardSection::Database => "Database",
            DashboardSection::Campaigns => "Campaigns",
            DashboardSection::Analytics => "Analytics",
            DashboardSection::Billing => "Billing",
            DashboardSection::Account => "Account",
        }
    }
}

#[component]
fn SectionIcon(section: DashboardSection) -> Element {
    match section {
        DashboardSection::Overview => rsx! { Icon { icon: FaHouse, width: 14, height: 14 } },
        DashboardSection::Database => rsx! { Icon { icon: FaDatabase, width: 14, height: 14 } },
        DashboardSection::Campaigns => rsx! { Icon { icon: FaBullhorn, width: 14, height: 14 } },
        DashboardSection::Analytics => rsx! { Icon { icon: FaChartLine, width: 14, height: 14 } },
        DashboardSection::Billing => rsx! { Icon { icon: FaCreditCard, width: 14, height: 14 } },
        DashboardSection::Account => rsx! { Icon { icon: FaUser, width: 14, height: 14 } },
    }
}

/// Signed-in area: section menu on the left, the active section on the right.
#[component]
pub fn DashboardView() -> Element {
    let auth = use_auth();
    let mut active = use_signal(|| DashboardSection::Overview);

    let (initial, name) = auth
        .read()
        .user
        .as_ref()
        .map(|user| (user.initial().to_string(), user.display_name()))
        .unwrap_or_default();

    let content = match active() {
        DashboardSection::Overview => rsx! { OverviewView {} },
        DashboardSection::Database => rsx! { DatabaseView {} },
        DashboardSection::Campaigns => rsx! { ComingSoon { title: "Campaigns" } },
        DashboardSection::Analytics => rsx! { ComingSoon { title: "Analytics" } },
        DashboardSection::Billing => rsx! { BillingView {} },
        DashboardSection::Account => rsx! { AccountView {} },
    };

    rsx! {
        div {
            class: "dashboard",
            aside {
                class: "dashboard-menu",
                div {
                    class: "dashboard-user",
                    span { class: "avatar", "{initial}" }
                    span { "{name}" }
                }
                nav {
                    for section in DashboardSection::ALL {
                        button {
                            key: "{section.title()}",
                            class: if active() == section { "menu-item active" } else { "menu-item" },
                            onclick: move |_| active.set(section),
                            SectionIcon { section }
                            span { "{section.title()}" }
                        }
                    }
                }
                LogoutButton { class: "menu-item" }
            }
            main {
                class: "dashboard-content",
                {content}
            }
        }
    }
}
