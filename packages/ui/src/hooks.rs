//! Data hooks: one per backend operation the pages use.
//!
//! Queries (`use_user_profile`, `use_regions`) run through the shared query
//! cache. Everything else is an on-demand mutation. Any hook whose request
//! comes back unauthorized expires the session.

use api::{
    ApiError, AuthResponse, LoginRequest, MessageResponse, Region, SearchParams, SearchResponse,
    SignupRequest, UpdatePasswordRequest, User,
};
use dioxus::prelude::*;
use store::{KeyValueStore, QueryKey, QueryOptions, TokenStore};

use crate::auth::{expire, use_auth, use_client, use_config};
use crate::navigation;
use crate::notifications::{notify, use_notifications, NoticeLevel};
use crate::payment::{self, PaymentStage, PlatformProvider};
use crate::platform::Client;
use crate::query::{
    log_failure, use_mutation, use_query, use_query_client, QueryState, SharedCache, UseMutation,
};
use crate::session::{self, AuthState};

pub fn profile_key() -> QueryKey {
    QueryKey::new("userProfile")
}

pub fn regions_key() -> QueryKey {
    QueryKey::new("regions")
}

/// Pass `result` through, expiring the session on an authorization failure.
fn guard_session<T>(
    auth: &mut Signal<AuthState>,
    client: &Client,
    result: Result<T, ApiError>,
) -> Result<T, ApiError> {
    if session::is_rejected(&result) {
        expire(auth, client);
    }
    result
}

/// Mark the profile stale after a password change. Returns the notice to show.
fn settle_password_update(
    cache: &SharedCache,
    result: &Result<MessageResponse, ApiError>,
) -> (NoticeLevel, String) {
    match result {
        Ok(response) => {
            cache.invalidate(&profile_key());
            let message = if response.message.is_empty() {
                "Password updated".to_string()
            } else {
                response.message.clone()
            };
            (NoticeLevel::Success, message)
        }
        Err(err) => {
            tracing::error!(error = %err, "password update failed");
            (NoticeLevel::Error, err.to_string())
        }
    }
}

/// Persist the token of a login or signup response. Returns where to go next.
pub fn complete_login<S: KeyValueStore>(
    tokens: &TokenStore<S>,
    response: &AuthResponse,
) -> Result<&'static str, ApiError> {
    let token = response.token().ok_or(ApiError::MissingToken)?;
    Ok(session::begin_session(tokens, token)?)
}

async fn authenticate(
    client: Client,
    what: &'static str,
    request: impl std::future::Future<Output = Result<AuthResponse, ApiError>>,
) -> Result<(), ApiError> {
    match request.await.and_then(|response| complete_login(client.tokens(), &response)) {
        Ok(target) => {
            tracing::info!("{} succeeded", what);
            navigation::redirect(target);
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "{} failed", what);
            Err(err)
        }
    }
}

pub fn use_login() -> UseMutation<LoginRequest, ()> {
    let client = use_client();
    use_mutation(move |credentials: LoginRequest| {
        let client = client.clone();
        async move {
            let request = client.login(&credentials);
            authenticate(client.clone(), "login", request).await
        }
    })
}

pub fn use_signup() -> UseMutation<SignupRequest, ()> {
    let client = use_client();
    use_mutation(move |details: SignupRequest| {
        let client = client.clone();
        async move {
            let request = client.signup(&details);
            authenticate(client.clone(), "signup", request).await
        }
    })
}

/// The signed-in user's profile. Idle while nobody is signed in.
pub fn use_user_profile() -> QueryState<User> {
    let client = use_client();
    let auth = use_auth();
    use_query(
        profile_key(),
        QueryOptions::default(),
        move || auth.read().is_authenticated(),
        move || {
            let client = client.clone();
            let mut auth = auth;
            async move {
                let result = client.me().await;
                guard_session(&mut auth, &client, result)
            }
        },
    )
}

pub fn use_regions() -> QueryState<Vec<Region>> {
    let client = use_client();
    let config = use_config();
    let options = QueryOptions::default()
        .with_stale_time(config.regions_stale_time())
        .with_refetch_on_window_focus(false);
    let auth = use_auth();
    use_query(regions_key(), options, || true, move || {
        let client = client.clone();
        let mut auth = auth;
        async move {
            let result = client.regions().await;
            guard_session(&mut auth, &client, result)
        }
    })
}

pub fn use_search_creators() -> UseMutation<SearchParams, SearchResponse> {
    let client = use_client();
    let auth = use_auth();
    use_mutation(move |params: SearchParams| {
        let client = client.clone();
        let mut auth = auth;
        async move {
            let result = client.search(&params).await;
            match &result {
                Ok(response) => tracing::debug!(
                    total = response.meta.total,
                    page = response.meta.page,
                    "creator search finished"
                ),
                Err(err) => tracing::error!(error = %err, "creator search failed"),
            }
            guard_session(&mut auth, &client, result)
        }
    })
}

/// Record a profile visit in the background. Failures are logged, not shown.
pub fn use_record_visit() -> Callback<String> {
    let client = use_client();
    let auth = use_auth();
    use_callback(move |creator_id: String| {
        let client = client.clone();
        let mut auth = auth;
        spawn(async move {
            let visit = async {
                let result = client.record_visit(&creator_id).await;
                guard_session(&mut auth, &client, result)
            };
            log_failure("recording profile visit", visit).await;
        });
    })
}

pub fn use_update_password() -> UseMutation<UpdatePasswordRequest, MessageResponse> {
    let client = use_client();
    let auth = use_auth();
    let queries = use_query_client();
    let notifications = use_notifications();
    use_mutation(move |request: UpdatePasswordRequest| {
        let client = client.clone();
        let queries = queries.clone();
        let mut auth = auth;
        let mut notifications = notifications;
        async move {
            let result = client.update_password(&request).await;
            let result = guard_session(&mut auth, &client, result);
            let (level, message) = settle_password_update(queries.cache(), &result);
            if result.is_ok() {
                queries.refresh();
            }
            notify(&mut notifications, level, &message);
            result
        }
    })
}

/// Handle returned by [`use_payment`].
#[derive(Clone, Copy)]
pub struct UsePayment {
    stage: Signal<PaymentStage>,
    start: Callback<()>,
    confirm: Callback<PlatformProvider>,
}

impl UsePayment {
    pub fn stage(&self) -> PaymentStage {
        (self.stage)()
    }

    /// Request a payment intent for the signed-in user.
    pub fn start(&self) {
        self.start.call(());
    }

    /// Confirm the pending intent with the mounted card form.
    pub fn confirm(&self, provider: PlatformProvider) {
        self.confirm.call(provider);
    }
}

pub fn use_payment() -> UsePayment {
    let client = use_client();
    let auth = use_auth();
    let queries = use_query_client();
    let mut stage = use_signal(|| PaymentStage::Idle);

    let start = use_callback(move |()| {
        if !stage.peek().can_start() {
            return;
        }
        stage.set(PaymentStage::CreatingIntent);
        let client = client.clone();
        let mut auth = auth;
        spawn(async move {
            let user = auth.read().user.clone();
            let result = payment::create_intent(&client, user.as_ref()).await;
            let next = match guard_session(&mut auth, &client, result) {
                Ok(intent) => PaymentStage::AwaitingCard(intent),
                Err(err) => {
                    tracing::error!(error = %err, "could not create payment intent");
                    PaymentStage::Failed {
                        message: err.to_string(),
                        intent: None,
                    }
                }
            };
            stage.set(next);
        });
    });

    let confirm = use_callback(move |provider: PlatformProvider| {
        let Some(intent) = stage.peek().intent().cloned() else {
            return;
        };
        let email = auth
            .peek()
            .user
            .as_ref()
            .map(|user| user.email.clone())
            .unwrap_or_default();
        stage.set(PaymentStage::Confirming(intent.clone()));
        let queries = queries.clone();
        spawn(async move {
            let next = payment::confirm(&provider, intent, &email).await;
            if matches!(next, PaymentStage::Succeeded(_)) {
                queries.invalidate(&profile_key());
            }
            stage.set(next);
        });
    });

    UsePayment {
        stage,
        start,
        confirm,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::ApiClient;
    use std::cell::Cell;
    use store::MemoryStore;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn tokens() -> TokenStore<MemoryStore> {
        TokenStore::new(MemoryStore::new())
    }

    #[test]
    fn test_complete_login_persists_token() {
        let tokens = tokens();
        let response = AuthResponse {
            token: Some("jwt".into()),
        };
        assert_eq!(complete_login(&tokens, &response), Ok("/dashboard"));
        assert_eq!(tokens.get().as_deref(), Some("jwt"));
    }

    #[test]
    fn test_complete_login_without_token() {
        let tokens = tokens();
        for token in [None, Some(String::new())] {
            let response = AuthResponse { token };
            assert_eq!(complete_login(&tokens, &response), Err(ApiError::MissingToken));
        }
        assert!(!tokens.is_present());
    }

    fn user() -> User {
        serde_json::from_str(r#"{"id":"u-1","email":"ana@example.com"}"#).unwrap()
    }

    /// Answer one request with `status` and an empty JSON body.
    async fn respond_once(status: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/api", listener.local_addr().unwrap());
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            while !String::from_utf8_lossy(&raw).contains("\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{{}}"
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        base_url
    }

    #[tokio::test]
    async fn test_rejected_visit_expires_session() {
        let base_url = respond_once("401 Unauthorized").await;
        let client = ApiClient::new(base_url, tokens());
        client.tokens().set("expired").unwrap();
        let mut state = AuthState::authenticated(user());

        let result = client.record_visit("c-1").await;
        assert!(session::is_rejected(&result));
        // What guard_session does with the hook's auth signal
        session::expire_session(client.tokens(), &mut state);

        assert!(!client.tokens().is_present());
        assert!(!state.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_visit_keeps_session() {
        let base_url = respond_once("500 Internal Server Error").await;
        let client = ApiClient::new(base_url, tokens());
        client.tokens().set("valid").unwrap();

        let result = client.record_visit("c-1").await;
        assert!(result.is_err());
        assert!(!session::is_rejected(&result));
        assert!(client.tokens().is_present());
    }

    #[tokio::test]
    async fn test_password_update_refetches_profile() {
        let cache = SharedCache::new();
        let calls = Cell::new(0);
        let counter = &calls;
        let fetch = move || async move {
            counter.set(counter.get() + 1);
            Ok::<u32, ApiError>(counter.get())
        };
        let options = QueryOptions::default().with_stale_time(std::time::Duration::from_secs(60));

        let first = cache.fetch(&profile_key(), options, fetch()).await.unwrap();
        let cached = cache.fetch(&profile_key(), options, fetch()).await.unwrap();
        assert_eq!((*first, *cached), (1, 1));

        let failed = Err(ApiError::Server {
            status: 400,
            message: "Current password is incorrect".into(),
        });
        let (level, message) = settle_password_update(&cache, &failed);
        assert_eq!(level, NoticeLevel::Error);
        assert_eq!(message, "Current password is incorrect");
        let still_cached = cache.fetch(&profile_key(), options, fetch()).await.unwrap();
        assert_eq!(*still_cached, 1);

        let updated = Ok(MessageResponse {
            message: String::new(),
        });
        let (level, message) = settle_password_update(&cache, &updated);
        assert_eq!((level, message.as_str()), (NoticeLevel::Success, "Password updated"));

        let refreshed = cache.fetch(&profile_key(), options, fetch()).await.unwrap();
        assert_eq!(*refreshed, 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_query_keys() {
        assert_eq!(profile_key().to_string(), "[userProfile]");
        assert_eq!(regions_key().to_string(), "[regions]");
    }
}
