//! # User model for the signed-in account
//!
//! [`User`] is what `GET /profile/me` returns. It is both the session's
//! identity (held by the session context once hydrated) and the dashboard's
//! data source: it embeds the account's append-only activity records.
//!
//! - `id`, `email`, `first_name`, `last_name`: identity.
//! - `status` / `account_type`: free-form strings owned by the backend
//!   (e.g. `"active"`, `"free"`).
//! - `created_at`: account creation time.
//! - `search_history` / `visited_profiles`: read-only activity, newest first
//!   as the backend returns them, alongside the aggregate counters
//!   `total_search_count` and `total_visits_count`.
//! - `has_paid`: whether lifetime access has been purchased.
//!
//! Activity fields default when absent so that a lean identity payload still
//! deserializes. The helper [`User::display_name`] joins first and last name
//! and falls back to the email address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::creator::Creator;

/// The signed-in account, as returned by the profile endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub search_history: Vec<SearchHistory>,
    #[serde(default)]
    pub total_search_count: u64,
    #[serde(default)]
    pub visited_profiles: Vec<VisitedProfile>,
    #[serde(default)]
    pub total_visits_count: u64,
    #[serde(default)]
    pub has_paid: bool,
}

impl User {
    /// "First Last", falling back to email if both names are blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }

    /// Single-letter avatar fallback.
    pub fn initial(&self) -> char {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// One past search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistory {
    pub id: String,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SearchHistory {
    /// Short description such as `beauty · AE`.
    pub fn summary(&self) -> String {
        let parts: Vec<&str> = [self.keyword.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect();
        if parts.is_empty() {
            "All creators".to_string()
        } else {
            parts.join(" · ")
        }
    }
}

/// One creator the user opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitedProfile {
    #[serde(default)]
    pub visited_at: Option<DateTime<Utc>>,
    pub creator: Creator,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"{
        "id": "u-1",
        "email": "ana@example.com",
        "firstName": "Ana",
        "lastName": "Lopez",
        "status": "active",
        "accountType": "free",
        "createdAt": "2024-05-01T10:00:00.000Z",
        "searchHistory": [
            {"id": "s-1", "keyword": "beauty", "country": "AE", "createdAt": "2024-05-02T09:00:00.000Z"},
            {"id": "s-2", "createdAt": "2024-05-03T09:00:00.000Z"}
        ],
        "totalSearchCount": 2,
        "visitedProfiles": [
            {
                "visitedAt": null,
                "creator": {
                    "id": "c-1",
                    "username": "glowup",
                    "profileLink": "https://tiktok.com/@glowup",
                    "country": "AE",
                    "region": {"id": "r-1", "name": "AE", "countryName": "United Arab Emirates", "flag": "🇦🇪"},
                    "followers": 125000
                }
            }
        ],
        "totalVisitsCount": 1,
        "hasPaid": false
    }"#;

    #[test]
    fn test_full_profile_deserializes() {
        let user: User = serde_json::from_str(PROFILE).unwrap();
        assert_eq!(user.display_name(), "Ana Lopez");
        assert_eq!(user.initial(), 'A');
        assert_eq!(user.account_type.as_deref(), Some("free"));
        assert_eq!(user.total_search_count, 2);
        assert_eq!(user.search_history[0].summary(), "beauty · AE");
        assert_eq!(user.search_history[1].summary(), "All creators");
        assert_eq!(user.visited_profiles.len(), 1);
        assert!(user.visited_profiles[0].visited_at.is_none());
        assert_eq!(user.visited_profiles[0].creator.display_name(), "glowup");
        assert!(!user.has_paid);
    }

    #[test]
    fn test_identity_only_payload() {
        let user: User =
            serde_json::from_str(r#"{"id":"u-2","email":"bo@example.com","firstName":"","lastName":""}"#)
                .unwrap();
        assert_eq!(user.display_name(), "bo@example.com");
        assert!(user.search_history.is_empty());
        assert_eq!(user.total_visits_count, 0);
        assert!(user.created_at.is_none());
    }
}
