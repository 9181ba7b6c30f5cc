//! Services shared by every component through Leptos context.

use std::rc::Rc;

use crate::config::BackendConfig;
use crate::gateway::{Backend, SupabaseGateway};
use crate::router::PageRouter;
use crate::session::SessionController;

#[derive(Clone)]
pub struct AppContext {
    pub backend: Rc<dyn Backend>,
    pub router: Rc<PageRouter>,
    pub session: Rc<SessionController>,
}

impl AppContext {
    pub fn new(config: BackendConfig) -> Self {
        Self::with_backend(Rc::new(SupabaseGateway::new(config)))
    }

    /// Wires the router and session controller to one shared backend.
    pub fn with_backend(backend: Rc<dyn Backend>) -> Self {
        Self {
            router: Rc::new(PageRouter::new(backend.clone())),
            session: Rc::new(SessionController::new(backend.clone())),
            backend,
        }
    }
}
