//! # API crate: typed client for the creator-directory REST API
//!
//! Every call the web application makes to the backend goes through this crate.
//! The backend itself is an external service; this crate only knows its
//! contract.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, bearer-token interceptor, request building and response mapping |
//! | [`endpoints`] | [`Endpoint`]: method and path of every REST operation |
//! | [`error`] | [`ApiError`]: the error taxonomy shared by all calls |
//! | [`models`] | Wire types (`User`, `Creator`, `Region`, `Transaction`, requests and responses) |
//!
//! ## Operations
//!
//! - **Auth**: [`ApiClient::login`], [`ApiClient::signup`]
//! - **Profile**: [`ApiClient::me`], [`ApiClient::update_password`]
//! - **Creators**: [`ApiClient::regions`], [`ApiClient::search`], [`ApiClient::record_visit`]
//! - **Payment**: [`ApiClient::create_payment_intent`]

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;

pub use client::{ApiClient, ProfileSource};
pub use endpoints::Endpoint;
pub use error::ApiError;
pub use models::{
    AuthResponse, Creator, LoginRequest, MessageResponse, PageMeta, PaymentIntent, Region,
    SearchHistory, SearchParams, SearchResponse, SignupRequest, Transaction,
    UpdatePasswordRequest, User, VisitedProfile,
};
