//! Wire models for the REST API.

mod auth;
mod creator;
mod payment;
mod user;

pub use auth::{AuthResponse, LoginRequest, MessageResponse, SignupRequest, UpdatePasswordRequest};
pub use creator::{
    format_followers, Creator, PageMeta, Region, RegionsResponse, SearchParams, SearchResponse,
};
pub use payment::{PaymentIntent, Transaction};
pub use user::{SearchHistory, User, VisitedProfile};
