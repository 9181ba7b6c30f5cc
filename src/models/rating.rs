use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Embedded `profiles(full_name)` relation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AuthorName {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A rating as nested under `locations` (`ratings(rating, comment, profiles(full_name))`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RatingSummary {
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub profiles: Option<AuthorName>,
}

/// A full row from the `ratings` table with its author's name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Rating {
    pub id: Uuid,
    pub location_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub profiles: Option<AuthorName>,
}

impl Rating {
    pub fn author(&self) -> Option<&str> {
        self.profiles
            .as_ref()
            .and_then(|author| author.full_name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewRating {
    pub location_id: Uuid,
    pub user_id: Uuid,
    pub rating: u8,
    pub comment: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RatingUpdate {
    pub rating: u8,
    pub comment: Option<String>,
}

pub fn is_valid_score(score: u8) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}
