use leptos::logging::{error, log};
use uuid::Uuid;

use super::{error_card, format_date, stars, LocationCard, PageView, CARD_PLACEHOLDER};
use crate::error::{GatewayError, RenderError};
use crate::gateway::Backend;
use crate::messages;
use crate::models::location::{Location, NewLocation};
use crate::models::rating::{is_valid_score, Rating};
use crate::router::Page;
use crate::toast::Notification;

#[derive(Debug, Clone, PartialEq)]
pub struct LocationsView {
    pub locations: Vec<Location>,
}

impl LocationsView {
    /// Cards for the locations matching `search`, in fetch order.
    pub fn cards(&self, search: &str) -> Vec<LocationCard> {
        filter_locations(&self.locations, search)
            .into_iter()
            .map(|location| LocationCard::new(location, CARD_PLACEHOLDER))
            .collect()
    }
}

/// Locations whose name, description or address contains `search`,
/// ignoring case. An empty term keeps everything.
pub fn filter_locations<'a>(locations: &'a [Location], search: &str) -> Vec<&'a Location> {
    let term = search.to_lowercase();
    locations.iter().filter(|location| location.matches(&term)).collect()
}

pub async fn load(backend: &dyn Backend) -> Result<PageView, RenderError> {
    match backend.get_locations().await {
        Ok(locations) => Ok(PageView::Locations(LocationsView { locations })),
        Err(e) => error_card(Page::Locations, e, messages::LOCATIONS_LOAD_FAILED),
    }
}

/// Submits the add-location form.
pub async fn add_location(backend: &dyn Backend, location: NewLocation) -> Notification {
    if location.name.trim().is_empty() {
        return Notification::error(messages::LOCATION_NAME_REQUIRED);
    }
    match backend.create_location(&location).await {
        Ok(()) => {
            log!("[PAGE] Location '{}' added", location.name);
            Notification::success(messages::LOCATION_ADDED)
        }
        Err(e) => {
            error!("[PAGE] Failed to add location: {:?}", e);
            Notification::error(e.toast_text(messages::LOCATION_ADD_FAILED))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingEntry {
    pub author: String,
    pub stars: String,
    pub score: u8,
    pub comment: String,
    pub date: String,
}

impl From<&Rating> for RatingEntry {
    fn from(rating: &Rating) -> Self {
        Self {
            author: rating.author().unwrap_or(messages::ANONYMOUS_AUTHOR).to_string(),
            stars: stars(f64::from(rating.rating)),
            score: rating.rating,
            comment: rating.comment.clone().unwrap_or_default(),
            date: format_date(rating.created_at),
        }
    }
}

/// The signed-in user's existing rating of a location.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnRating {
    pub id: Uuid,
    pub score: u8,
    pub comment: String,
}

/// Contents of the rating modal for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingPanel {
    pub location_id: Uuid,
    pub entries: Vec<RatingEntry>,
    pub own: Option<OwnRating>,
}

pub async fn load_rating_panel(backend: &dyn Backend, location_id: Uuid) -> Result<RatingPanel, GatewayError> {
    let ratings = backend.get_ratings(location_id).await?;
    let user = match backend.current_user().await {
        Ok(user) => user,
        Err(e) => {
            error!("[PAGE] Could not resolve current user for rating panel: {}", e);
            None
        }
    };
    let own = user.and_then(|user| {
        ratings
            .iter()
            .find(|rating| rating.user_id == user.id)
            .map(|rating| OwnRating {
                id: rating.id,
                score: rating.rating,
                comment: rating.comment.clone().unwrap_or_default(),
            })
    });
    Ok(RatingPanel {
        location_id,
        entries: ratings.iter().map(RatingEntry::from).collect(),
        own,
    })
}

/// Saves the rating form: updates `existing` when the user already rated the
/// location, creates a new rating otherwise.
pub async fn submit_rating(
    backend: &dyn Backend,
    location_id: Uuid,
    existing: Option<Uuid>,
    score: u8,
    comment: &str,
) -> Notification {
    if !is_valid_score(score) {
        return Notification::error(messages::RATING_OUT_OF_RANGE);
    }
    let comment = Some(comment.trim()).filter(|c| !c.is_empty());
    let result = match existing {
        Some(rating_id) => backend.update_rating(rating_id, score, comment).await,
        None => backend.create_rating(location_id, score, comment).await,
    };
    match result {
        Ok(()) => Notification::success(messages::RATING_SAVED),
        Err(e) => {
            error!("[PAGE] Failed to save rating: {:?}", e);
            Notification::error(e.toast_text(messages::RATING_SAVE_FAILED))
        }
    }
}
