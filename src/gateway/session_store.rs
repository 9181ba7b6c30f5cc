use leptos::logging::warn;

use crate::config::SESSION_STORAGE_KEY;
use crate::error::GatewayError;
use crate::models::user::AuthSession;

/// Persists the auth session in `localStorage` so a reload keeps the user
/// signed in. Browser only: never touch it while rendering on the server.
#[derive(Debug, Clone)]
pub struct SessionStore {
    key: &'static str,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self { key: SESSION_STORAGE_KEY }
    }
}

impl SessionStore {
    pub fn with_key(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Result<web_sys::Storage, GatewayError> {
        gloo_utils::window()
            .local_storage()
            .map_err(|e| GatewayError::Storage(format!("{e:?}")))?
            .ok_or_else(|| GatewayError::Storage("localStorage unavailable".into()))
    }

    pub fn load(&self) -> Option<AuthSession> {
        let raw = Self::storage().ok()?.get_item(self.key).ok()??;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("[GATEWAY] Discarding unreadable stored session: {}", e);
                self.clear();
                None
            }
        }
    }

    pub fn save(&self, session: &AuthSession) -> Result<(), GatewayError> {
        let raw = serde_json::to_string(session)?;
        Self::storage()?
            .set_item(self.key, &raw)
            .map_err(|e| GatewayError::Storage(format!("{e:?}")))
    }

    pub fn clear(&self) {
        if let Ok(storage) = Self::storage() {
            let _ = storage.remove_item(self.key);
        }
    }
}
