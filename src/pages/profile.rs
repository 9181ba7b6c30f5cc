use chrono::Utc;
use leptos::logging::error;
use uuid::Uuid;

use super::{error_card, format_date, PageView, AVATAR_PLACEHOLDER};
use crate::error::RenderError;
use crate::gateway::Backend;
use crate::messages;
use crate::models::profile::{Profile, ProfileUpdate};
use crate::models::user::User;
use crate::router::Page;
use crate::toast::Notification;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub avatar_src: String,
    pub member_since: String,
    /// Current form values.
    pub full_name: String,
    pub avatar_url: String,
}

impl ProfileView {
    pub fn new(user: &User, profile: &Profile) -> Self {
        let avatar_url = profile.avatar_url.clone().unwrap_or_default();
        Self {
            user_id: user.id,
            email: user.email().to_string(),
            display_name: profile.name().unwrap_or(messages::NAME_MISSING).to_string(),
            avatar_src: if avatar_url.is_empty() {
                AVATAR_PLACEHOLDER.to_string()
            } else {
                avatar_url.clone()
            },
            member_since: format_date(profile.created_at),
            full_name: profile.full_name.clone().unwrap_or_default(),
            avatar_url,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileStats {
    pub ratings: usize,
    pub locations: usize,
}

pub async fn load(backend: &dyn Backend) -> Result<PageView, RenderError> {
    let user = match backend.current_user().await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(PageView::Notice(messages::USER_NOT_FOUND.to_string())),
        Err(e) if e.is_expected() => {
            error!("[PAGE] No current user for profile page: {}", e);
            return Ok(PageView::Notice(messages::USER_NOT_FOUND.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    match backend.get_profile(user.id).await {
        Ok(profile) => Ok(PageView::Profile(ProfileView::new(&user, &profile))),
        Err(e) => error_card(Page::Profile, e, messages::PROFILE_LOAD_FAILED),
    }
}

/// Counts shown under "Minhas Estatísticas", loaded after the page is on
/// screen. A failed query leaves its count at zero.
pub async fn load_stats(backend: &dyn Backend, user_id: Uuid) -> ProfileStats {
    let mut stats = ProfileStats::default();
    match backend.user_rating_ids(user_id).await {
        Ok(ids) => stats.ratings = ids.len(),
        Err(e) => error!("[PAGE] Error loading user rating count: {}", e),
    }
    match backend.user_location_ids(user_id).await {
        Ok(ids) => stats.locations = ids.len(),
        Err(e) => error!("[PAGE] Error loading user location count: {}", e),
    }
    stats
}

/// Outcome of the profile form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSaved {
    pub notification: Notification,
    /// New header name when the update went through.
    pub display_name: Option<String>,
}

pub async fn save_profile(backend: &dyn Backend, full_name: &str, avatar_url: &str) -> ProfileSaved {
    let user = match backend.current_user().await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return ProfileSaved {
                notification: Notification::error(messages::USER_NOT_FOUND),
                display_name: None,
            }
        }
        Err(e) => {
            return ProfileSaved {
                notification: Notification::error(e.toast_text(messages::PROFILE_UPDATE_FAILED)),
                display_name: None,
            }
        }
    };
    let update = ProfileUpdate {
        full_name: full_name.to_string(),
        avatar_url: avatar_url.to_string(),
        updated_at: Utc::now(),
    };
    match backend.update_profile(user.id, &update).await {
        Ok(()) => ProfileSaved {
            notification: Notification::success(messages::PROFILE_UPDATED),
            display_name: Some(if full_name.is_empty() {
                user.email().to_string()
            } else {
                full_name.to_string()
            }),
        },
        Err(e) => {
            error!("[PAGE] Failed to update profile: {:?}", e);
            ProfileSaved {
                notification: Notification::error(e.toast_text(messages::PROFILE_UPDATE_FAILED)),
                display_name: None,
            }
        }
    }
}
