use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use localrate::error::GatewayError;
use localrate::gateway::{Backend, SignUp};
use localrate::models::location::{Location, NewLocation, TopRatedLocation};
use localrate::models::profile::{Profile, ProfileUpdate};
use localrate::models::rating::{AuthorName, Rating, RatingSummary};
use localrate::models::user::User;

struct Account {
    user: User,
    password: String,
}

#[derive(Default)]
struct State {
    accounts: Vec<Account>,
    current: Option<User>,
    profiles: HashMap<Uuid, Profile>,
    /// Newest first, like the real `created_at.desc` ordering.
    locations: Vec<Location>,
    ratings: Vec<Rating>,
    failures: HashMap<&'static str, GatewayError>,
    calls: Vec<&'static str>,
    auto_confirm: bool,
    clock: i64,
}

/// In-memory stand-in for the hosted backend. Records every call and can be
/// told to fail a given operation.
#[derive(Default)]
pub struct MemoryBackend {
    state: RefCell<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign-ups open a session straight away instead of waiting for the
    /// confirmation e-mail.
    pub fn auto_confirm(self) -> Self {
        self.state.borrow_mut().auto_confirm = true;
        self
    }

    /// Adds a confirmed account with a profile.
    pub fn add_user(&self, email: &str, password: &str, full_name: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            email_confirmed_at: Some(Utc::now()),
        };
        let mut state = self.state.borrow_mut();
        state.accounts.push(Account { user: user.clone(), password: password.to_string() });
        state.profiles.insert(user.id, profile(user.id, full_name));
        user
    }

    pub fn sign_in_as(&self, user: &User) {
        self.state.borrow_mut().current = Some(user.clone());
    }

    /// What the real gateway does when a refresh is rejected: the session
    /// disappears without a sign-out call.
    pub fn drop_session(&self) {
        self.state.borrow_mut().current = None;
    }

    /// Adds a location rated once per entry of `scores` by fresh users.
    pub fn add_location(&self, name: &str, scores: &[u8]) -> Uuid {
        let id = Uuid::new_v4();
        let mut state = self.state.borrow_mut();
        let created_at = tick(&mut state);
        state.locations.insert(
            0,
            Location {
                id,
                name: name.to_string(),
                description: None,
                address: None,
                image_url: None,
                created_by: None,
                created_at: Some(created_at),
                ratings: Vec::new(),
            },
        );
        for &score in scores {
            let created_at = tick(&mut state);
            state.ratings.insert(
                0,
                Rating {
                    id: Uuid::new_v4(),
                    location_id: id,
                    user_id: Uuid::new_v4(),
                    rating: score,
                    comment: None,
                    created_at: Some(created_at),
                    profiles: Some(AuthorName { full_name: Some("Visitante".into()) }),
                },
            );
        }
        id
    }

    pub fn fail(&self, operation: &'static str, err: GatewayError) {
        self.state.borrow_mut().failures.insert(operation, err);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.borrow().calls.clone()
    }

    pub fn ratings_of(&self, location_id: Uuid) -> Vec<Rating> {
        self.state
            .borrow()
            .ratings
            .iter()
            .filter(|rating| rating.location_id == location_id)
            .cloned()
            .collect()
    }

    pub fn profile_of(&self, user_id: Uuid) -> Option<Profile> {
        self.state.borrow().profiles.get(&user_id).cloned()
    }

    fn enter(&self, operation: &'static str) -> Result<(), GatewayError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(operation);
        match state.failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn signed_in(&self) -> Result<User, GatewayError> {
        self.state.borrow().current.clone().ok_or(GatewayError::NotAuthenticated)
    }

    fn author(&self, user_id: Uuid) -> Option<AuthorName> {
        self.state
            .borrow()
            .profiles
            .get(&user_id)
            .map(|profile| AuthorName { full_name: profile.full_name.clone() })
    }
}

fn profile(id: Uuid, full_name: &str) -> Profile {
    Profile {
        id,
        full_name: Some(full_name.to_string()),
        avatar_url: None,
        created_at: Some(Utc::now()),
    }
}

/// Strictly increasing timestamps so "newest first" is well defined.
fn tick(state: &mut State) -> chrono::DateTime<Utc> {
    state.clock += 1;
    Utc::now() + Duration::seconds(state.clock)
}

fn not_found() -> GatewayError {
    GatewayError::Api {
        status: 406,
        message: "JSON object requested, multiple (or no) rows returned".into(),
    }
}

#[async_trait(?Send)]
impl Backend for MemoryBackend {
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<SignUp, GatewayError> {
        self.enter("sign_up")?;
        let mut state = self.state.borrow_mut();
        if state.accounts.iter().any(|account| account.user.email() == email) {
            return Err(GatewayError::Api { status: 422, message: "User already registered".into() });
        }
        let user = User {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            email_confirmed_at: state.auto_confirm.then(Utc::now),
        };
        state.accounts.push(Account { user: user.clone(), password: password.to_string() });
        state.profiles.insert(user.id, profile(user.id, full_name));
        if state.auto_confirm {
            state.current = Some(user.clone());
            Ok(SignUp::SignedIn(user))
        } else {
            Ok(SignUp::PendingConfirmation(user))
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User, GatewayError> {
        self.enter("sign_in")?;
        let mut state = self.state.borrow_mut();
        let user = state
            .accounts
            .iter()
            .find(|account| account.user.email() == email && account.password == password)
            .map(|account| account.user.clone())
            .ok_or(GatewayError::Api { status: 400, message: "Invalid login credentials".into() })?;
        if !user.is_confirmed() {
            return Err(GatewayError::Api { status: 400, message: "Email not confirmed".into() });
        }
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        // The local session is dropped whatever the backend answers.
        self.state.borrow_mut().current = None;
        self.enter("sign_out")
    }

    async fn current_user(&self) -> Result<Option<User>, GatewayError> {
        self.enter("current_user")?;
        Ok(self.state.borrow().current.clone())
    }

    fn has_session(&self) -> bool {
        self.state.borrow().current.is_some()
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Profile, GatewayError> {
        self.enter("get_profile")?;
        self.state.borrow().profiles.get(&user_id).cloned().ok_or_else(not_found)
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<(), GatewayError> {
        self.enter("update_profile")?;
        let mut state = self.state.borrow_mut();
        let profile = state.profiles.get_mut(&user_id).ok_or_else(not_found)?;
        profile.full_name = Some(update.full_name.clone());
        profile.avatar_url = Some(update.avatar_url.clone());
        Ok(())
    }

    async fn get_locations(&self) -> Result<Vec<Location>, GatewayError> {
        self.enter("get_locations")?;
        // Lets overlapping navigations interleave.
        tokio::task::yield_now().await;
        let state = self.state.borrow();
        let locations = state
            .locations
            .iter()
            .map(|location| Location {
                ratings: state
                    .ratings
                    .iter()
                    .filter(|rating| rating.location_id == location.id)
                    .map(|rating| RatingSummary {
                        rating: rating.rating,
                        comment: rating.comment.clone(),
                        profiles: rating.profiles.clone(),
                    })
                    .collect(),
                ..location.clone()
            })
            .collect();
        Ok(locations)
    }

    async fn create_location(&self, location: &NewLocation) -> Result<(), GatewayError> {
        self.enter("create_location")?;
        let user = self.signed_in()?;
        let mut state = self.state.borrow_mut();
        let created_at = tick(&mut state);
        let optional = |value: &str| Some(value.to_string()).filter(|v| !v.is_empty());
        state.locations.insert(
            0,
            Location {
                id: Uuid::new_v4(),
                name: location.name.clone(),
                description: optional(&location.description),
                address: optional(&location.address),
                image_url: optional(&location.image_url),
                created_by: Some(user.id),
                created_at: Some(created_at),
                ratings: Vec::new(),
            },
        );
        Ok(())
    }

    async fn get_ratings(&self, location_id: Uuid) -> Result<Vec<Rating>, GatewayError> {
        self.enter("get_ratings")?;
        Ok(self.ratings_of(location_id))
    }

    async fn create_rating(&self, location_id: Uuid, score: u8, comment: Option<&str>) -> Result<(), GatewayError> {
        self.enter("create_rating")?;
        let user = self.signed_in()?;
        let author = self.author(user.id);
        let mut state = self.state.borrow_mut();
        if state
            .ratings
            .iter()
            .any(|rating| rating.location_id == location_id && rating.user_id == user.id)
        {
            return Err(GatewayError::Api {
                status: 409,
                message: "duplicate key value violates unique constraint".into(),
            });
        }
        let created_at = tick(&mut state);
        state.ratings.insert(
            0,
            Rating {
                id: Uuid::new_v4(),
                location_id,
                user_id: user.id,
                rating: score,
                comment: comment.map(str::to_string),
                created_at: Some(created_at),
                profiles: author,
            },
        );
        Ok(())
    }

    async fn update_rating(&self, rating_id: Uuid, score: u8, comment: Option<&str>) -> Result<(), GatewayError> {
        self.enter("update_rating")?;
        let mut state = self.state.borrow_mut();
        let rating = state
            .ratings
            .iter_mut()
            .find(|rating| rating.id == rating_id)
            .ok_or_else(not_found)?;
        rating.rating = score;
        rating.comment = comment.map(str::to_string);
        Ok(())
    }

    async fn get_top_rated_locations(&self, limit: u32) -> Result<Vec<TopRatedLocation>, GatewayError> {
        self.enter("get_top_rated_locations")?;
        let state = self.state.borrow();
        let mut rows: Vec<TopRatedLocation> = state
            .locations
            .iter()
            .filter_map(|location| {
                let scores: Vec<f64> = state
                    .ratings
                    .iter()
                    .filter(|rating| rating.location_id == location.id)
                    .map(|rating| f64::from(rating.rating))
                    .collect();
                if scores.is_empty() {
                    return None;
                }
                Some(TopRatedLocation {
                    id: location.id,
                    name: location.name.clone(),
                    image_url: location.image_url.clone(),
                    average_rating: Some(scores.iter().sum::<f64>() / scores.len() as f64),
                    rating_count: Some(scores.len() as i64),
                })
            })
            .collect();
        rows.sort_by(|a, b| b.average_rating.partial_cmp(&a.average_rating).unwrap_or(std::cmp::Ordering::Equal));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn user_rating_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, GatewayError> {
        self.enter("user_rating_ids")?;
        Ok(self
            .state
            .borrow()
            .ratings
            .iter()
            .filter(|rating| rating.user_id == user_id)
            .map(|rating| rating.id)
            .collect())
    }

    async fn user_location_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, GatewayError> {
        self.enter("user_location_ids")?;
        Ok(self
            .state
            .borrow()
            .locations
            .iter()
            .filter(|location| location.created_by == Some(user_id))
            .map(|location| location.id)
            .collect())
    }
}
