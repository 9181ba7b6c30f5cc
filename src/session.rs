//! Authentication state and the login/register/logout flows.

use std::rc::Rc;

use leptos::logging::{error, log, warn};

use crate::error::GatewayError;
use crate::gateway::{Backend, SignUp};
use crate::messages;
use crate::models::user::User;
use crate::toast::Notification;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn(User),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

impl AuthTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthTab::Login => "login",
            AuthTab::Register => "register",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// What the login screen or the user menu should do after an auth action.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub notification: Option<Notification>,
    /// New session state, if the action changed it.
    pub next: Option<SessionState>,
    /// Tab the login screen should switch to.
    pub tab: Option<AuthTab>,
}

impl AuthOutcome {
    fn toast(notification: Notification) -> Self {
        Self { notification: Some(notification), next: None, tab: None }
    }
}

/// Local checks run before any sign-up request: the confirmation must match
/// and the password must be at least six characters long.
pub fn validate_registration(registration: &Registration) -> Result<(), &'static str> {
    if registration.password != registration.confirm {
        return Err(messages::PASSWORD_MISMATCH);
    }
    if registration.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(messages::PASSWORD_TOO_SHORT);
    }
    Ok(())
}

pub fn login_error_message(err: &GatewayError) -> String {
    let text = err.to_string();
    if err.is_expected() && (text.contains("email_not_confirmed") || text.contains("Email not confirmed")) {
        messages::EMAIL_NOT_CONFIRMED.to_string()
    } else {
        err.toast_text(messages::LOGIN_FAILED)
    }
}

pub struct SessionController {
    backend: Rc<dyn Backend>,
}

impl SessionController {
    pub fn new(backend: Rc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Start-up check for an existing session.
    pub async fn restore(&self) -> SessionState {
        match self.backend.current_user().await {
            Ok(Some(user)) => {
                log!("[SESSION] Restored session for {}", user.email());
                SessionState::LoggedIn(user)
            }
            Ok(None) => SessionState::LoggedOut,
            Err(e) => {
                error!("[SESSION] Could not restore session: {}", e);
                SessionState::LoggedOut
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthOutcome {
        match self.backend.sign_in(email, password).await {
            Ok(user) => {
                log!("[SESSION] Signed in as {}", user.email());
                AuthOutcome {
                    notification: Some(Notification::success(messages::LOGIN_SUCCESS)),
                    next: Some(SessionState::LoggedIn(user)),
                    tab: None,
                }
            }
            Err(e) => {
                error!("[SESSION] Sign-in failed: {}", e);
                AuthOutcome::toast(Notification::error(login_error_message(&e)))
            }
        }
    }

    pub async fn sign_up(&self, registration: &Registration) -> AuthOutcome {
        if let Err(message) = validate_registration(registration) {
            return AuthOutcome::toast(Notification::error(message));
        }
        let result = self
            .backend
            .sign_up(&registration.email, &registration.password, &registration.name)
            .await;
        match result {
            Ok(SignUp::PendingConfirmation(user)) if !user.is_confirmed() => AuthOutcome {
                notification: Some(Notification::success(messages::SIGN_UP_CONFIRM_EMAIL)),
                next: None,
                tab: Some(AuthTab::Login),
            },
            Ok(SignUp::PendingConfirmation(_)) => AuthOutcome {
                notification: Some(Notification::success(messages::SIGN_UP_SUCCESS)),
                next: None,
                tab: Some(AuthTab::Login),
            },
            Ok(SignUp::SignedIn(user)) => AuthOutcome {
                notification: Some(Notification::success(messages::SIGN_UP_SUCCESS)),
                next: Some(SessionState::LoggedIn(user)),
                tab: Some(AuthTab::Login),
            },
            Err(e) => {
                error!("[SESSION] Sign-up failed: {}", e);
                AuthOutcome::toast(Notification::error(e.toast_text(messages::SIGN_UP_FAILED)))
            }
        }
    }

    /// The gateway drops the local session even when the backend call fails,
    /// so the user always ends up on the login screen.
    pub async fn sign_out(&self) -> AuthOutcome {
        let notification = match self.backend.sign_out().await {
            Ok(()) => None,
            Err(e) => {
                error!("[SESSION] Sign-out failed: {}", e);
                Some(Notification::error(e.toast_text(messages::SIGN_OUT_FAILED)))
            }
        };
        AuthOutcome {
            notification,
            next: Some(SessionState::LoggedOut),
            tab: None,
        }
    }

    /// Notices a session the gateway dropped on its own, after a rejected
    /// token refresh or a revoked token. Returns the outcome that sends a
    /// signed-in user back to the login screen; `None` while nothing changed.
    pub fn check_session(&self, state: &SessionState) -> Option<AuthOutcome> {
        if !matches!(state, SessionState::LoggedIn(_)) || self.backend.has_session() {
            return None;
        }
        warn!("[SESSION] Session ended by the backend, showing login");
        Some(AuthOutcome {
            notification: Some(Notification::info(messages::SESSION_EXPIRED)),
            next: Some(SessionState::LoggedOut),
            tab: Some(AuthTab::Login),
        })
    }

    /// Header name: the profile's full name, else the e-mail. Best effort.
    pub async fn display_name(&self, user: &User) -> String {
        match self.backend.get_profile(user.id).await {
            Ok(profile) => profile.name().unwrap_or(user.email()).to_string(),
            Err(e) => {
                error!("[SESSION] Error loading profile: {}", e);
                user.email().to_string()
            }
        }
    }
}
