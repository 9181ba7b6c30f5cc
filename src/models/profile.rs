use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// The non-empty full name, if the user filled one in.
    pub fn name(&self) -> Option<&str> {
        self.full_name.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// Fields written by the profile form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub avatar_url: String,
    pub updated_at: DateTime<Utc>,
}
