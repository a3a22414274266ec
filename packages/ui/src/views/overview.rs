use dioxus::prelude::*;

use crate::hooks::use_user_profile;
use crate::query::QueryState;

use super::StatCard;

/// Profile statistics, recent searches and recently visited creators.
#[component]
pub fn OverviewView() -> Element {
    let profile = use_user_profile();

    let user = match profile {
        QueryState::Idle | QueryState::Loading => {
            return rsx! { p { class: "muted", "Loading your profile..." } };
        }
        QueryState::Failed(err) => {
            return rsx! { p { class: "form-error", "Could not load your profile: {err}" } };
        }
        QueryState::Ready(user) => user,
    };

    let member_since = user
        .created_at
        .map(|created| created.format("%b %-d, %Y").to_string());
    let plan = if user.has_paid { "Full access" } else { "Free" };
    let greeting = user.display_name();
    let searches: Vec<(String, String)> = user
        .search_history
        .iter()
        .take(10)
        .map(|entry| (entry.summary(), entry.created_at.format("%b %-d").to_string()))
        .collect();
    let visits: Vec<(String, Option<String>)> = user
        .visited_profiles
        .iter()
        .take(10)
        .map(|visit| {
            (
                visit.creator.display_name().to_string(),
                visit.creator.followers_label(),
            )
        })
        .collect();

    rsx! {
        section {
            class: "dashboard-section",
            h2 { "Welcome back, {greeting}" }
            div {
                class: "stat-grid",
                StatCard { label: "Searches", value: user.total_search_count.to_string() }
                StatCard { label: "Profiles visited", value: user.total_visits_count.to_string() }
                StatCard { label: "Plan", value: plan.to_string(), hint: member_since.map(|since| format!("Member since {since}")) }
            }

            div {
                class: "two-columns",
                div {
                    h3 { "Recent searches" }
                    if searches.is_empty() {
                        p { class: "muted", "No searches yet." }
                    }
                    ul {
                        class: "plain-list",
                        for (summary, date) in searches {
                            li {
                                span { "{summary}" }
                                span { class: "muted", "{date}" }
                            }
                        }
                    }
                }
                div {
                    h3 { "Recently visited" }
                    if visits.is_empty() {
                        p { class: "muted", "No visited profiles yet." }
                    }
                    ul {
                        class: "plain-list",
                        for (name, followers) in visits {
                            li {
                                span { "{name}" }
                                if let Some(followers) = followers {
                                    span { class: "muted", "{followers}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
