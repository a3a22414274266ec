//! # Session lifecycle
//!
//! The session is a three-phase state machine held by [`crate::AuthProvider`]:
//!
//! | Phase | Entered when |
//! |-------|--------------|
//! | [`SessionPhase::Loading`] | Page load, before hydration finishes. |
//! | [`SessionPhase::Anonymous`] | No token, the token was rejected, logout, or forced expiry. |
//! | [`SessionPhase::Authenticated`] | Hydration fetched the profile with the stored token. |
//!
//! The functions here are framework-free so the transitions can be tested
//! without a renderer; the Dioxus layer only stores the resulting
//! [`AuthState`] in a signal and performs the returned navigation.
//!
//! Login and logout hand back a path for a *full-page* navigation instead of
//! mutating state in place: the next page load hydrates from storage, so the
//! token in storage and the authenticated flag cannot drift apart.

use api::{ApiError, ProfileSource, User};
use store::{KeyValueStore, StoreError, TokenStore};

/// Where a fresh session lands.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Where anonymous visitors of protected pages and logged-out users land.
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Anonymous,
    Authenticated,
}

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.user, self.loading) {
            (_, true) => SessionPhase::Loading,
            (Some(_), false) => SessionPhase::Authenticated,
            (None, false) => SessionPhase::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.id.as_str())
    }
}

/// Reconstruct the session from the stored token.
///
/// Without a token no request is made. A rejected or failed profile fetch
/// clears the token; the failure is logged and otherwise silent.
pub async fn hydrate<S, P>(tokens: &TokenStore<S>, profiles: &P) -> AuthState
where
    S: KeyValueStore,
    P: ProfileSource,
{
    if !tokens.is_present() {
        return AuthState::anonymous();
    }

    match profiles.fetch_profile().await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "session hydrated");
            AuthState::authenticated(user)
        }
        Err(err) => {
            tracing::error!(error = %err, "session expired or invalid");
            tokens.clear();
            AuthState::anonymous()
        }
    }
}

/// Persist a freshly issued token. Returns the path to navigate to.
pub fn begin_session<S: KeyValueStore>(
    tokens: &TokenStore<S>,
    token: &str,
) -> Result<&'static str, StoreError> {
    tokens.set(token)?;
    Ok(DASHBOARD_PATH)
}

/// Drop the session. Returns the path to navigate to.
pub fn end_session<S: KeyValueStore>(tokens: &TokenStore<S>, state: &mut AuthState) -> &'static str {
    expire_session(tokens, state);
    LOGIN_PATH
}

/// Whether `result` shows the server no longer accepts the session token.
///
/// The API client has already cleared the stored token at this point; the
/// caller still has to drop the user with [`expire_session`].
pub fn is_rejected<T>(result: &Result<T, ApiError>) -> bool {
    matches!(result, Err(err) if err.is_unauthorized())
}

/// Drop the session in place after the server rejected the token.
pub fn expire_session<S: KeyValueStore>(tokens: &TokenStore<S>, state: &mut AuthState) {
    tokens.clear();
    *state = AuthState::anonymous();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use store::MemoryStore;

    struct FakeProfiles {
        result: Result<User, ApiError>,
        calls: Cell<u32>,
    }

    impl FakeProfiles {
        fn returning(result: Result<User, ApiError>) -> Self {
            Self {
                result,
                calls: Cell::new(0),
            }
        }
    }

    impl ProfileSource for FakeProfiles {
        async fn fetch_profile(&self) -> Result<User, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    fn user() -> User {
        serde_json_user(r#"{"id":"u-1","email":"ana@example.com","firstName":"Ana","lastName":"Lopez"}"#)
    }

    fn serde_json_user(json: &str) -> User {
        serde_json::from_str(json).unwrap()
    }

    fn tokens() -> TokenStore<MemoryStore> {
        TokenStore::new(MemoryStore::new())
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = AuthState::default();
        assert_eq!(state.phase(), SessionPhase::Loading);
        assert!(!state.is_authenticated());
    }

    #[tokio::test]
    async fn test_hydrate_without_token_skips_request() {
        let tokens = tokens();
        let profiles = FakeProfiles::returning(Ok(user()));

        let state = hydrate(&tokens, &profiles).await;
        assert_eq!(state.phase(), SessionPhase::Anonymous);
        assert_eq!(profiles.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_hydrate_with_valid_token() {
        let tokens = tokens();
        tokens.set("good").unwrap();
        let profiles = FakeProfiles::returning(Ok(user()));

        let state = hydrate(&tokens, &profiles).await;
        assert_eq!(state.phase(), SessionPhase::Authenticated);
        assert_eq!(state.user_id(), Some("u-1"));
        assert_eq!(tokens.get().as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn test_hydrate_with_expired_token_clears_it() {
        let tokens = tokens();
        tokens.set("expired").unwrap();
        let profiles = FakeProfiles::returning(Err(ApiError::Unauthorized {
            message: "jwt expired".into(),
        }));

        let state = hydrate(&tokens, &profiles).await;
        assert_eq!(state.phase(), SessionPhase::Anonymous);
        assert!(tokens.get().is_none());
        assert_eq!(profiles.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_hydrate_network_failure_also_clears() {
        let tokens = tokens();
        tokens.set("maybe-valid").unwrap();
        let profiles = FakeProfiles::returning(Err(ApiError::Network("offline".into())));

        let state = hydrate(&tokens, &profiles).await;
        assert!(!state.is_authenticated());
        assert!(tokens.get().is_none());
    }

    #[test]
    fn test_login_then_logout_ends_anonymous() {
        let tokens = tokens();
        let mut state = AuthState::anonymous();

        for round in 0..3 {
            let target = begin_session(&tokens, &format!("token-{round}")).unwrap();
            assert_eq!(target, DASHBOARD_PATH);
            assert!(tokens.is_present());
            // The next page load hydrates the user
            state = AuthState::authenticated(user());

            let target = end_session(&tokens, &mut state);
            assert_eq!(target, LOGIN_PATH);
            assert_eq!(state.phase(), SessionPhase::Anonymous);
            assert!(tokens.get().is_none());
        }
    }

    #[test]
    fn test_only_unauthorized_is_rejected() {
        assert!(is_rejected::<()>(&Err(ApiError::Unauthorized {
            message: "jwt expired".into()
        })));
        assert!(!is_rejected::<()>(&Err(ApiError::Server {
            status: 403,
            message: "Forbidden".into()
        })));
        assert!(!is_rejected::<()>(&Err(ApiError::Network("offline".into()))));
        assert!(!is_rejected(&Ok(())));
    }

    #[test]
    fn test_expire_session_clears_both() {
        let tokens = tokens();
        tokens.set("t").unwrap();
        let mut state = AuthState::authenticated(user());

        expire_session(&tokens, &mut state);
        assert_eq!(state, AuthState::anonymous());
        assert!(!tokens.is_present());
    }
}
