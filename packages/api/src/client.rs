//! # REST client with bearer-token interception
//!
//! [`ApiClient`] is the single configured HTTP client of the application. It
//! owns a `reqwest::Client`, the API base URL and the [`TokenStore`] the
//! session writes to.
//!
//! ## Request pipeline
//!
//! 1. [`ApiClient::prepare`] resolves the [`Endpoint`] against the base URL,
//!    attaches `Authorization: Bearer <token>` when a token is stored, and
//!    serializes the JSON body. The request is fully built here; any failure
//!    (unparseable base URL, a token that is not a legal header value, a body
//!    that fails to serialize) is an [`ApiError::Request`] and nothing is sent.
//! 2. `send` dispatches it. Non-2xx responses become [`ApiError`]s via
//!    [`ApiError::from_response`]; a 401 additionally clears the stored token
//!    so storage never keeps a credential the server rejected.
//! 3. Bodies are decoded with `serde_json`.
//!
//! ## [`ProfileSource`]
//!
//! Session hydration only needs "who am I". The trait narrows the client to
//! that one call so the session logic can be exercised without a server.

use std::future::Future;

use reqwest::{Method, Request, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{KeyValueStore, TokenStore};

use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::models::{
    AuthResponse, LoginRequest, MessageResponse, PaymentIntent, Region, RegionsResponse,
    SearchParams, SearchResponse, SignupRequest, UpdatePasswordRequest, User,
};

/// Anything that can answer "who is signed in".
pub trait ProfileSource {
    fn fetch_profile(&self) -> impl Future<Output = Result<User, ApiError>>;
}

/// Configured client for the creator-directory API.
#[derive(Clone, Debug)]
pub struct ApiClient<S> {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenStore<S>,
}

impl<S: KeyValueStore> ApiClient<S> {
    pub fn new(base_url: impl Into<String>, tokens: TokenStore<S>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store every request reads from.
    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    /// Absolute URL of an endpoint. Segments are percent-encoded.
    pub fn url(&self, endpoint: &Endpoint) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::Request(format!("invalid base URL `{}`: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Request(format!("base URL `{}` cannot have a path", self.base_url)))?
            .pop_if_empty()
            .extend(endpoint.segments());
        Ok(url)
    }

    /// Build the request for `endpoint`, authenticated when a token is stored.
    pub fn prepare<B>(&self, endpoint: &Endpoint, body: Option<&B>) -> Result<Request, ApiError>
    where
        B: Serialize + ?Sized,
    {
        tracing::trace!(method = %endpoint.method(), path = %endpoint.path(), "preparing request");
        let mut builder = self.http.request(endpoint.method(), self.url(endpoint)?);
        if let Some(token) = self.tokens.get() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        Ok(builder.build()?)
    }

    async fn send(&self, request: Request) -> Result<Response, ApiError> {
        let method: Method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status, &body);
        if err.is_unauthorized() {
            self.tokens.clear();
            tracing::warn!(%method, %path, "request unauthorized, stored token cleared");
        } else {
            tracing::debug!(%method, %path, status = status.as_u16(), "request failed");
        }
        Err(err)
    }

    async fn call<B, T>(&self, endpoint: Endpoint, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.prepare(&endpoint, body)?;
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.call(Endpoint::Login, Some(credentials)).await
    }

    pub async fn signup(&self, details: &SignupRequest) -> Result<AuthResponse, ApiError> {
        self.call(Endpoint::Signup, Some(details)).await
    }

    /// The signed-in user's profile.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.call(Endpoint::Me, None::<&()>).await
    }

    pub async fn update_password(
        &self,
        passwords: &UpdatePasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.call(Endpoint::UpdatePassword, Some(passwords)).await
    }

    pub async fn regions(&self) -> Result<Vec<Region>, ApiError> {
        let response: RegionsResponse = self.call(Endpoint::Regions, None::<&()>).await?;
        Ok(response.data)
    }

    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse, ApiError> {
        self.call(Endpoint::Search, Some(params)).await
    }

    /// Record a visit of `creator_id`. The response body is ignored.
    pub async fn record_visit(&self, creator_id: &str) -> Result<(), ApiError> {
        let endpoint = Endpoint::RecordVisit {
            creator_id: creator_id.to_string(),
        };
        let request = self.prepare(&endpoint, None::<&()>)?;
        self.send(request).await.map(|_| ())
    }

    pub async fn create_payment_intent(&self, user_id: &str) -> Result<PaymentIntent, ApiError> {
        let endpoint = Endpoint::CreatePaymentIntent {
            user_id: user_id.to_string(),
        };
        self.call(endpoint, None::<&()>).await
    }
}

impl<S: KeyValueStore> ProfileSource for ApiClient<S> {
    async fn fetch_profile(&self) -> Result<User, ApiError> {
        self.me().await
    }
}
