//! REST operations the client knows about.

use reqwest::Method;

/// One backend operation: its HTTP method and path below the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Signup,
    Me,
    UpdatePassword,
    Regions,
    Search,
    /// Record that the signed-in user opened a creator.
    RecordVisit { creator_id: String },
    CreatePaymentIntent { user_id: String },
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login | Endpoint::Signup | Endpoint::Search => Method::POST,
            Endpoint::CreatePaymentIntent { .. } => Method::POST,
            Endpoint::Me | Endpoint::Regions | Endpoint::RecordVisit { .. } => Method::GET,
            Endpoint::UpdatePassword => Method::PATCH,
        }
    }

    /// Path segments, unencoded. Dynamic segments are percent-encoded when
    /// joined onto the base URL.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Login => vec!["auth", "login"],
            Endpoint::Signup => vec!["auth", "signup"],
            Endpoint::Me => vec!["profile", "me"],
            Endpoint::UpdatePassword => vec!["profile", "update-password"],
            Endpoint::Regions => vec!["content-creators", "regions"],
            Endpoint::Search => vec!["content-creators", "search"],
            Endpoint::RecordVisit { creator_id } => vec!["content-creators", creator_id, "visit"],
            Endpoint::CreatePaymentIntent { user_id } => vec!["payment", "create-intent", user_id],
        }
    }

    /// Human-readable path, e.g. `/content-creators/regions`.
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_and_methods() {
        let cases = [
            (Endpoint::Login, Method::POST, "/auth/login"),
            (Endpoint::Signup, Method::POST, "/auth/signup"),
            (Endpoint::Me, Method::GET, "/profile/me"),
            (Endpoint::UpdatePassword, Method::PATCH, "/profile/update-password"),
            (Endpoint::Regions, Method::GET, "/content-creators/regions"),
            (Endpoint::Search, Method::POST, "/content-creators/search"),
            (
                Endpoint::RecordVisit {
                    creator_id: "c-42".into(),
                },
                Method::GET,
                "/content-creators/c-42/visit",
            ),
            (
                Endpoint::CreatePaymentIntent {
                    user_id: "u-1".into(),
                },
                Method::POST,
                "/payment/create-intent/u-1",
            ),
        ];

        for (endpoint, method, path) in cases {
            assert_eq!(endpoint.method(), method, "{endpoint:?}");
            assert_eq!(endpoint.path(), path);
        }
    }
}
