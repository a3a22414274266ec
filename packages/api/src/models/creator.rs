//! Creator directory models: creators, regions, and paginated search.

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// A country the directory can be filtered by.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    /// Country code used as the search filter value, e.g. `"AE"`.
    pub name: String,
    pub country_name: String,
    /// Flag emoji.
    pub flag: String,
}

impl Region {
    pub fn label(&self) -> String {
        format!("{} {}", self.flag, self.country_name)
    }
}

/// `GET /content-creators/regions` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionsResponse {
    pub data: Vec<Region>,
}

/// A content creator as returned by search. Never mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    /// TikTok profile link.
    #[serde(default)]
    pub profile_link: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl Creator {
    /// Nickname, then username, then `"N/A"`.
    pub fn display_name(&self) -> &str {
        [self.nickname.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.trim().is_empty())
            .unwrap_or("N/A")
    }

    /// Flag and country name of the creator's region, if known.
    pub fn category(&self) -> String {
        match (&self.region, &self.country) {
            (Some(region), _) => region.label(),
            (None, Some(country)) => country.clone(),
            (None, None) => String::new(),
        }
    }

    pub fn followers_label(&self) -> Option<String> {
        self.followers.map(format_followers)
    }

    /// Generated initials avatar for the creator.
    pub fn avatar_url(&self) -> String {
        Url::parse_with_params(
            "https://ui-avatars.com/api/",
            &[
                ("format", "svg"),
                ("name", self.display_name()),
                ("background", "2a2a2a"),
                ("color", "ffffff"),
            ],
        )
        .map(|url| url.to_string())
        .unwrap_or_default()
    }
}

/// Compact follower count: `1.5M`, `12.3K`, `999`.
pub fn format_followers(followers: u64) -> String {
    // Thresholds sit where one decimal rounds up into the next unit.
    if followers >= 999_950 {
        format!("{:.1}M", followers as f64 / 1_000_000.0)
    } else if followers >= 1_000 {
        format!("{:.1}K", followers as f64 / 1_000.0)
    } else {
        followers.to_string()
    }
}

/// `POST /content-creators/search` body. Absent filters are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Country code, e.g. `"AE"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchParams {
    /// Filters from raw form input; blank values mean "no filter".
    pub fn new(keyword: &str, country: &str) -> Self {
        Self {
            keyword: non_blank(keyword),
            country: non_blank(country),
            page: None,
            limit: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Pagination metadata of a search page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl PageMeta {
    /// `ceil(total / limit)`; zero when `limit` is zero.
    pub fn expected_total_pages(total: u64, limit: u32) -> u32 {
        if limit == 0 {
            return 0;
        }
        total.div_ceil(u64::from(limit)) as u32
    }

    /// Whether `total_pages` agrees with `total` and `limit`.
    pub fn is_consistent(&self) -> bool {
        self.total_pages == Self::expected_total_pages(self.total, self.limit)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index range of the items on this page, e.g. `(21, 40)`.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 || self.page == 0 {
            return None;
        }
        let first = u64::from(self.page - 1) * u64::from(self.limit) + 1;
        if first > self.total {
            return None;
        }
        let last = (first + u64::from(self.limit) - 1).min(self.total);
        Some((first, last))
    }
}

/// `POST /content-creators/search` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub data: Vec<Creator>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(total: u64, page: u32, limit: u32, total_pages: u32) -> PageMeta {
        PageMeta {
            total,
            page,
            limit,
            total_pages,
        }
    }

    #[test]
    fn test_search_params_omit_blank_filters() {
        let params = SearchParams::new("  ", "");
        assert_eq!(serde_json::to_string(&params).unwrap(), "{}");

        let params = SearchParams::new(" beauty ", "AE").with_page(2).with_limit(20);
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"keyword": "beauty", "country": "AE", "page": 2, "limit": 20})
        );
    }

    #[test]
    fn test_page_zero_is_clamped() {
        assert_eq!(SearchParams::default().with_page(0).page, Some(1));
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(PageMeta::expected_total_pages(0, 20), 0);
        assert_eq!(PageMeta::expected_total_pages(20, 20), 1);
        assert_eq!(PageMeta::expected_total_pages(21, 20), 2);
        assert_eq!(PageMeta::expected_total_pages(95, 10), 10);
        assert_eq!(PageMeta::expected_total_pages(5, 0), 0);

        assert!(meta(95, 1, 10, 10).is_consistent());
        assert!(!meta(95, 1, 10, 9).is_consistent());
    }

    #[test]
    fn test_page_navigation() {
        let first = meta(45, 1, 20, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(first.item_range(), Some((1, 20)));

        let last = meta(45, 3, 20, 3);
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.item_range(), Some((41, 45)));

        assert_eq!(meta(0, 1, 20, 0).item_range(), None);
        assert_eq!(meta(10, 5, 20, 1).item_range(), None);
    }

    #[test]
    fn test_search_response_deserializes() {
        let body = r#"{
            "data": [
                {"id": "c-1", "nickname": "Glow", "username": "glowup", "region": {"id": "r-1", "name": "AE", "countryName": "United Arab Emirates", "flag": "🇦🇪"}, "followers": 1500000, "instagram": "glow.ig", "youtube": null, "email": "glow@example.com", "bio": "Skincare"},
                {"id": "c-2", "username": null, "nickname": null, "country": "AE", "followers": null}
            ],
            "meta": {"total": 2, "page": 1, "limit": 20, "totalPages": 1}
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.meta.is_consistent());

        let glow = &response.data[0];
        assert_eq!(glow.display_name(), "Glow");
        assert_eq!(glow.category(), "🇦🇪 United Arab Emirates");
        assert_eq!(glow.followers_label().as_deref(), Some("1.5M"));

        let anonymous = &response.data[1];
        assert_eq!(anonymous.display_name(), "N/A");
        assert_eq!(anonymous.category(), "AE");
        assert!(anonymous.followers_label().is_none());
    }

    #[test]
    fn test_format_followers() {
        assert_eq!(format_followers(999), "999");
        assert_eq!(format_followers(12_340), "12.3K");
        assert_eq!(format_followers(2_000_000), "2.0M");
    }

    #[test]
    fn test_format_followers_rolls_over_to_millions() {
        assert_eq!(format_followers(999_949), "999.9K");
        assert_eq!(format_followers(999_950), "1.0M");
        assert_eq!(format_followers(999_999), "1.0M");
    }

    #[test]
    fn test_avatar_url_encodes_name() {
        let creator = Creator {
            id: "c-9".into(),
            username: None,
            nickname: Some("Léa & Co".into()),
            profile_link: None,
            country: None,
            region: None,
            followers: None,
            instagram: None,
            youtube: None,
            email: None,
            bio: None,
        };
        let url = creator.avatar_url();
        assert!(url.starts_with("https://ui-avatars.com/api/?format=svg&name="));
        assert!(!url.contains(' '));
        assert!(url.contains("%26"));
    }

    #[test]
    fn test_region_label() {
        let region: Region = serde_json::from_str(
            r#"{"id":"r-2","name":"FR","countryName":"France","flag":"🇫🇷"}"#,
        )
        .unwrap();
        assert_eq!(region.label(), "🇫🇷 France");
    }
}
