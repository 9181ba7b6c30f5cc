//! Reactive state of the browser UI: session, toasts, loading overlay and
//! the page currently on screen.

use gloo_timers::callback::Timeout;
use leptos::logging::log;
use leptos::*;

use crate::config::TOAST_LIFETIME_MS;
use crate::context::AppContext;
use crate::messages;
use crate::pages::PageView;
use crate::router::{LoadOutcome, Page};
use crate::session::{AuthOutcome, SessionController, SessionState};
use crate::toast::{Notification, ToastQueue};

#[derive(Clone, Copy)]
pub struct UiState {
    pub loading: RwSignal<bool>,
    pub toasts: RwSignal<ToastQueue>,
    /// Name shown in the header's user menu.
    pub user_name: RwSignal<String>,
    /// `None` until the start-up session check finishes.
    pub session: RwSignal<Option<SessionState>>,
    pub content: RwSignal<Option<PageView>>,
    pub active: RwSignal<Page>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            loading: create_rw_signal(false),
            toasts: create_rw_signal(ToastQueue::default()),
            user_name: create_rw_signal(String::new()),
            session: create_rw_signal(None),
            content: create_rw_signal(None),
            active: create_rw_signal(Page::Home),
        }
    }

    /// Shows `notification` and removes it again after the toast lifetime.
    pub fn notify(&self, notification: Notification) {
        let Some(id) = self.toasts.try_update(|queue| queue.push(notification)) else {
            return;
        };
        let toasts = self.toasts;
        Timeout::new(TOAST_LIFETIME_MS, move || {
            toasts.try_update(|queue| queue.dismiss(id));
        })
        .forget();
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.try_set(loading);
    }

    /// Applies the result of a login, sign-up or logout.
    pub fn apply(&self, outcome: AuthOutcome) {
        if let Some(notification) = outcome.notification {
            self.notify(notification);
        }
        match outcome.next {
            Some(SessionState::LoggedOut) => {
                self.content.try_set(None);
                self.user_name.try_set(String::new());
                self.session.try_set(Some(SessionState::LoggedOut));
            }
            Some(state) => {
                self.session.try_set(Some(state));
            }
            None => {}
        }
    }

    /// Returns to the login screen when the gateway dropped the session
    /// behind the UI's back. Returns `true` in that case.
    pub fn observe_session(&self, session: &SessionController) -> bool {
        let Some(Some(state)) = self.session.try_get_untracked() else {
            return false;
        };
        match session.check_session(&state) {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Navigation entry point handed to components that switch pages. Carries
/// page names so `data-page` attributes can be passed through unchanged.
#[derive(Clone, Copy)]
pub struct Navigator(pub Callback<String>);

impl Navigator {
    pub fn new(ctx: AppContext, ui: UiState) -> Self {
        Self(Callback::new(move |name: String| navigate_named(&ctx, ui, &name)))
    }

    pub fn go(&self, page: Page) {
        self.0.call(page.as_str().to_string());
    }

    pub fn go_named(&self, name: &str) {
        self.0.call(name.to_string());
    }
}

pub fn navigate(ctx: &AppContext, ui: UiState, page: Page) {
    navigate_named(ctx, ui, page.as_str());
}

/// Marks the page active, shows the loading overlay and swaps the rendered
/// page into the content region once it is ready. Unknown names leave the
/// screen as it is.
pub fn navigate_named(ctx: &AppContext, ui: UiState, name: &str) {
    if let Ok(page) = name.parse::<Page>() {
        ui.active.set(page);
    }
    ui.set_loading(true);
    let router = ctx.router.clone();
    let session = ctx.session.clone();
    let name = name.to_string();
    spawn_local(async move {
        let outcome = router.load_page_named(&name).await;
        if ui.observe_session(&session) {
            ui.set_loading(false);
            return;
        }
        match outcome {
            LoadOutcome::Rendered(view) => {
                ui.content.try_set(Some(view));
                ui.set_loading(false);
            }
            LoadOutcome::Failed(_) => {
                ui.notify(Notification::error(messages::PAGE_LOAD_FAILED));
                ui.set_loading(false);
            }
            // The newer navigation owns the overlay.
            LoadOutcome::Superseded => {}
            LoadOutcome::Unknown(name) => {
                log!("[ROUTER] Ignoring navigation to {}", name);
                ui.set_loading(false);
            }
        }
    });
}
