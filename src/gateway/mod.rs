//! Façade over the hosted backend: identity service plus the `profiles`,
//! `locations` and `ratings` tables.
//!
//! Every operation resolves to a `Result` and never panics, so callers branch
//! on the error explicitly. The gateway does not retry, does not classify
//! transient failures and does not sanitize input.

pub mod session_store;
pub mod supabase;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::models::location::{Location, NewLocation, TopRatedLocation};
use crate::models::profile::{Profile, ProfileUpdate};
use crate::models::rating::Rating;
use crate::models::user::User;

pub use supabase::SupabaseGateway;

/// Result of a successful sign-up.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUp {
    /// The account exists but the e-mail link must be followed before login.
    PendingConfirmation(User),
    /// The backend auto-confirmed the account and opened a session.
    SignedIn(User),
}

#[async_trait(?Send)]
pub trait Backend {
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<SignUp, GatewayError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, GatewayError>;
    async fn sign_out(&self) -> Result<(), GatewayError>;
    /// `Ok(None)` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<User>, GatewayError>;
    /// Whether a session is held locally. Turns `false` once the gateway
    /// drops a session the backend no longer accepts.
    fn has_session(&self) -> bool;

    async fn get_profile(&self, user_id: Uuid) -> Result<Profile, GatewayError>;
    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<(), GatewayError>;

    /// All locations, newest first, each with its ratings and their authors' names.
    async fn get_locations(&self) -> Result<Vec<Location>, GatewayError>;
    async fn create_location(&self, location: &NewLocation) -> Result<(), GatewayError>;

    /// Ratings of one location, newest first.
    async fn get_ratings(&self, location_id: Uuid) -> Result<Vec<Rating>, GatewayError>;
    async fn create_rating(&self, location_id: Uuid, score: u8, comment: Option<&str>) -> Result<(), GatewayError>;
    async fn update_rating(&self, rating_id: Uuid, score: u8, comment: Option<&str>) -> Result<(), GatewayError>;

    /// Ranking computed by the backend's `get_top_rated_locations` procedure.
    async fn get_top_rated_locations(&self, limit: u32) -> Result<Vec<TopRatedLocation>, GatewayError>;

    async fn user_rating_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, GatewayError>;
    async fn user_location_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, GatewayError>;
}
