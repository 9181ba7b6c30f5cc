use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use chrono::Utc;
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::logging::{error, log, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::session_store::SessionStore;
use super::{Backend, SignUp};
use crate::config::BackendConfig;
use crate::error::GatewayError;
use crate::models::location::{Location, NewLocation, TopRatedLocation};
use crate::models::profile::{Profile, ProfileUpdate};
use crate::models::rating::{NewRating, Rating, RatingUpdate};
use crate::models::user::{AuthSession, User};

const LOCATIONS_SELECT: &str = "*,ratings(rating,comment,profiles(full_name))";
const RATINGS_SELECT: &str = "*,profiles(full_name)";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// `Backend` over the hosted service's REST surface (GoTrue + PostgREST).
pub struct SupabaseGateway {
    config: BackendConfig,
    store: SessionStore,
    session: RefCell<Option<AuthSession>>,
    restored: Cell<bool>,
}

impl SupabaseGateway {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            store: SessionStore::default(),
            session: RefCell::new(None),
            restored: Cell::new(false),
        }
    }

    // The stored session is read lazily so the gateway can be built while
    // rendering on the server, where there is no localStorage.
    fn session(&self) -> Option<AuthSession> {
        if !self.restored.replace(true) {
            *self.session.borrow_mut() = self.store.load();
        }
        self.session.borrow().clone()
    }

    fn remember(&self, session: AuthSession) {
        if let Err(e) = self.store.save(&session) {
            warn!("[GATEWAY] Session not persisted: {}", e);
        }
        self.restored.set(true);
        *self.session.borrow_mut() = Some(session);
    }

    fn forget(&self) {
        self.store.clear();
        self.restored.set(true);
        *self.session.borrow_mut() = None;
    }

    fn session_user(&self) -> Result<User, GatewayError> {
        self.session()
            .map(|session| session.user)
            .ok_or(GatewayError::NotAuthenticated)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self
            .session()
            .map(|session| session.access_token)
            .unwrap_or_else(|| self.config.anon_key.clone());
        builder
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {token}"))
    }

    async fn post_json<B: Serialize>(&self, builder: RequestBuilder, body: &B) -> Result<Response, GatewayError> {
        let request = self
            .authorized(builder)
            .header("Content-Type", "application/json")
            .json(body)?;
        Ok(request.send().await?)
    }

    /// Exchanges the refresh token once the access token has expired.
    /// A failed refresh signs the user out locally.
    async fn fresh_session(&self) -> Result<Option<AuthSession>, GatewayError> {
        let Some(session) = self.session() else {
            return Ok(None);
        };
        if !session.is_expired(Utc::now()) {
            return Ok(Some(session));
        }
        let Some(refresh_token) = session.refresh_token.clone() else {
            self.forget();
            return Ok(None);
        };

        log!("[GATEWAY] Access token expired, refreshing session");
        let url = self.config.auth_url("token?grant_type=refresh_token");
        let request = Request::post(&url)
            .header("apikey", &self.config.anon_key)
            .header("Content-Type", "application/json")
            .json(&json!({ "refresh_token": refresh_token }))?;
        let response = request.send().await?;
        match read::<TokenResponse>(&response).await {
            Ok(tokens) => {
                let session = tokens.into_session(Utc::now().timestamp());
                self.remember(session.clone());
                Ok(Some(session))
            }
            Err(GatewayError::Api { status, message }) => {
                warn!("[GATEWAY] Session refresh rejected ({}): {}", status, message);
                self.forget();
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait(?Send)]
impl Backend for SupabaseGateway {
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<SignUp, GatewayError> {
        log!("[GATEWAY] sign_up {}", email);
        let redirect = gloo_utils::window().location().origin().unwrap_or_default();
        let body = json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name },
        });
        let url = format!(
            "{}?redirect_to={}",
            self.config.auth_url("signup"),
            urlencoding::encode(&redirect)
        );
        let response = self.post_json(Request::post(&url), &body).await?;
        let value: serde_json::Value = read(&response).await?;
        match parse_sign_up(value, Utc::now().timestamp())? {
            SignUpResponse::Session(session) => {
                let user = session.user.clone();
                self.remember(session);
                Ok(SignUp::SignedIn(user))
            }
            SignUpResponse::User(user) => Ok(SignUp::PendingConfirmation(user)),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User, GatewayError> {
        log!("[GATEWAY] sign_in {}", email);
        let url = self.config.auth_url("token?grant_type=password");
        let body = json!({ "email": email, "password": password });
        let response = self.post_json(Request::post(&url), &body).await?;
        let tokens: TokenResponse = read(&response).await?;
        let session = tokens.into_session(Utc::now().timestamp());
        let user = session.user.clone();
        self.remember(session);
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        log!("[GATEWAY] sign_out");
        if self.session().is_none() {
            return Ok(());
        }
        let url = self.config.auth_url("logout");
        let result = match self.authorized(Request::post(&url)).send().await {
            Ok(response) => expect_ok(&response).await,
            Err(e) => Err(e.into()),
        };
        // The local session goes away whatever the backend answered.
        self.forget();
        result
    }

    async fn current_user(&self) -> Result<Option<User>, GatewayError> {
        if self.fresh_session().await?.is_none() {
            return Ok(None);
        }
        let url = self.config.auth_url("user");
        let response = self.authorized(Request::get(&url)).send().await?;
        if matches!(response.status(), 401 | 403) {
            log!("[GATEWAY] Stored session no longer valid");
            self.forget();
            return Ok(None);
        }
        let user: User = read(&response).await?;
        Ok(Some(user))
    }

    fn has_session(&self) -> bool {
        self.session().is_some()
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Profile, GatewayError> {
        log!("[GATEWAY] get_profile {}", user_id);
        let url = self.config.rest_url(&profile_query(user_id));
        let response = self
            .authorized(Request::get(&url))
            .header("Accept", SINGLE_OBJECT)
            .send()
            .await?;
        read(&response).await
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> Result<(), GatewayError> {
        log!("[GATEWAY] update_profile {}", user_id);
        let url = self.config.rest_url(&eq_filter("profiles", "id", user_id));
        let response = self.post_json(Request::patch(&url), update).await?;
        expect_ok(&response).await
    }

    async fn get_locations(&self) -> Result<Vec<Location>, GatewayError> {
        log!("[GATEWAY] get_locations");
        let url = self.config.rest_url(&locations_query());
        let response = self.authorized(Request::get(&url)).send().await?;
        let locations: Vec<Location> = read(&response).await?;
        log!("[GATEWAY] Fetched {} locations", locations.len());
        Ok(locations)
    }

    async fn create_location(&self, location: &NewLocation) -> Result<(), GatewayError> {
        let user = self.session_user()?;
        log!("[GATEWAY] create_location '{}' by {}", location.name, user.id);
        let url = self.config.rest_url("locations");
        let body = json!({
            "name": location.name,
            "description": location.description,
            "address": location.address,
            "image_url": location.image_url,
            "created_by": user.id,
        });
        let response = self
            .post_json(Request::post(&url).header("Prefer", "return=minimal"), &body)
            .await?;
        expect_ok(&response).await
    }

    async fn get_ratings(&self, location_id: Uuid) -> Result<Vec<Rating>, GatewayError> {
        log!("[GATEWAY] get_ratings {}", location_id);
        let url = self.config.rest_url(&ratings_query(location_id));
        let response = self.authorized(Request::get(&url)).send().await?;
        read(&response).await
    }

    async fn create_rating(&self, location_id: Uuid, score: u8, comment: Option<&str>) -> Result<(), GatewayError> {
        let user = self.session_user()?;
        log!("[GATEWAY] create_rating {} on {}", score, location_id);
        let url = self.config.rest_url("ratings");
        let body = NewRating {
            location_id,
            user_id: user.id,
            rating: score,
            comment: comment.map(str::to_string),
        };
        let response = self
            .post_json(Request::post(&url).header("Prefer", "return=minimal"), &body)
            .await?;
        expect_ok(&response).await
    }

    async fn update_rating(&self, rating_id: Uuid, score: u8, comment: Option<&str>) -> Result<(), GatewayError> {
        log!("[GATEWAY] update_rating {} -> {}", rating_id, score);
        let url = self.config.rest_url(&eq_filter("ratings", "id", rating_id));
        let body = RatingUpdate {
            rating: score,
            comment: comment.map(str::to_string),
        };
        let response = self.post_json(Request::patch(&url), &body).await?;
        expect_ok(&response).await
    }

    async fn get_top_rated_locations(&self, limit: u32) -> Result<Vec<TopRatedLocation>, GatewayError> {
        log!("[GATEWAY] get_top_rated_locations limit={}", limit);
        let url = self.config.rest_url("rpc/get_top_rated_locations");
        let response = self
            .post_json(Request::post(&url), &json!({ "limit_count": limit }))
            .await?;
        read(&response).await
    }

    async fn user_rating_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, GatewayError> {
        let url = self.config.rest_url(&ids_query("ratings", "user_id", user_id));
        let response = self.authorized(Request::get(&url)).send().await?;
        let rows: Vec<IdRow> = read(&response).await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    async fn user_location_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, GatewayError> {
        let url = self.config.rest_url(&ids_query("locations", "created_by", user_id));
        let response = self.authorized(Request::get(&url)).send().await?;
        let rows: Vec<IdRow> = read(&response).await?;
        Ok(rows.into_iter().map(|row| row.id).collect())
    }
}

#[derive(Deserialize)]
struct IdRow {
    id: Uuid,
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: User,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> AuthSession {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now + secs));
        AuthSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

#[derive(Debug)]
enum SignUpResponse {
    Session(AuthSession),
    User(User),
}

// `/signup` answers with a token payload when the project auto-confirms
// e-mails and with the bare user otherwise.
fn parse_sign_up(value: serde_json::Value, now: i64) -> Result<SignUpResponse, GatewayError> {
    if value.get("access_token").is_some() {
        let tokens: TokenResponse = serde_json::from_value(value)?;
        Ok(SignUpResponse::Session(tokens.into_session(now)))
    } else {
        Ok(SignUpResponse::User(serde_json::from_value(value)?))
    }
}

/// Error payloads differ between the auth service (`msg`,
/// `error_description`) and the REST layer (`message`).
#[derive(Deserialize, Default)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    error_code: Option<String>,
}

fn error_message(status: u16, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error)
        .or(parsed.error_code)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            }
        })
}

async fn read<T: DeserializeOwned>(response: &Response) -> Result<T, GatewayError> {
    let status = response.status();
    let ok = response.ok();
    let text = response.text().await?;
    if !ok {
        let message = error_message(status, &text);
        error!("[GATEWAY] {} -> {}: {}", response.url(), status, message);
        return Err(GatewayError::Api { status, message });
    }
    Ok(serde_json::from_str(&text)?)
}

async fn expect_ok(response: &Response) -> Result<(), GatewayError> {
    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = error_message(status, &text);
    error!("[GATEWAY] {} -> {}: {}", response.url(), status, message);
    Err(GatewayError::Api { status, message })
}

fn eq_filter(table: &str, column: &str, id: Uuid) -> String {
    format!("{table}?{column}=eq.{id}")
}

fn profile_query(user_id: Uuid) -> String {
    format!("{}&select=*", eq_filter("profiles", "id", user_id))
}

fn ids_query(table: &str, column: &str, id: Uuid) -> String {
    format!("{}&select=id", eq_filter(table, column, id))
}

fn locations_query() -> String {
    format!(
        "locations?select={}&order=created_at.desc",
        urlencoding::encode(LOCATIONS_SELECT)
    )
}

fn ratings_query(location_id: Uuid) -> String {
    format!(
        "{}&select={}&order=created_at.desc",
        eq_filter("ratings", "location_id", location_id),
        urlencoding::encode(RATINGS_SELECT)
    )
}
