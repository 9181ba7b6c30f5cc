//! Page routing.
//!
//! Pages form a closed set. Each navigation takes a new generation number;
//! when a render finishes after a newer navigation started, its result is
//! dropped so overlapping renders never overwrite the newer page.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use leptos::logging::{error, log};

use crate::error::{RenderError, RouteError};
use crate::gateway::Backend;
use crate::pages::{self, PageView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Locations,
    Ranking,
    Profile,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Locations, Page::Ranking, Page::Profile];

    /// Name carried by the navigation buttons' `data-page` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Locations => "locations",
            Page::Ranking => "ranking",
            Page::Profile => "profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Início",
            Page::Locations => "Locais",
            Page::Ranking => "Ranking",
            Page::Profile => "Perfil",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Home => "fas fa-home",
            Page::Locations => "fas fa-map-marker-alt",
            Page::Ranking => "fas fa-trophy",
            Page::Profile => "fas fa-user",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = RouteError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.as_str() == name)
            .ok_or_else(|| RouteError::UnknownPage(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Swap this view into the content region.
    Rendered(PageView),
    /// The render failed unexpectedly; keep the current content and toast.
    Failed(RenderError),
    /// A newer navigation started while this one was in flight.
    Superseded,
    /// No such page; nothing changes.
    Unknown(String),
}

/// Identifies one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTicket {
    pub page: Page,
    generation: u64,
}

pub struct PageRouter {
    backend: Rc<dyn Backend>,
    generation: Cell<u64>,
    current: Cell<Option<Page>>,
    initialized: Cell<bool>,
}

impl PageRouter {
    pub fn new(backend: Rc<dyn Backend>) -> Self {
        Self {
            backend,
            generation: Cell::new(0),
            current: Cell::new(None),
            initialized: Cell::new(false),
        }
    }

    /// Called whenever the app shell comes up after sign-in. Returns `true`
    /// the first time; the caller then loads the home page either way.
    pub fn start(&self) -> bool {
        if self.initialized.replace(true) {
            log!("[ROUTER] Already initialized, reloading home page");
            false
        } else {
            log!("[ROUTER] Initializing");
            true
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    pub fn current_page(&self) -> Option<Page> {
        self.current.get()
    }

    pub fn begin(&self, page: Page) -> NavTicket {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        NavTicket { page, generation }
    }

    pub fn is_current(&self, ticket: NavTicket) -> bool {
        self.generation.get() == ticket.generation
    }

    /// Renders `page`. Navigating to the page already on screen renders it
    /// again from scratch.
    pub async fn load_page(&self, page: Page) -> LoadOutcome {
        let ticket = self.begin(page);
        log!("[ROUTER] Loading {} (navigation {})", page, ticket.generation);

        let result = pages::render(page, self.backend.as_ref()).await;

        if !self.is_current(ticket) {
            log!("[ROUTER] Discarding stale render of {} (navigation {})", page, ticket.generation);
            return LoadOutcome::Superseded;
        }
        self.current.set(Some(page));
        match result {
            Ok(view) => LoadOutcome::Rendered(view),
            Err(e) => {
                error!("[ROUTER] Error loading page {}: {}", page, e);
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Same as [`load_page`](Self::load_page) for a page name coming from
    /// markup. Unknown names are logged and change nothing.
    pub async fn load_page_named(&self, name: &str) -> LoadOutcome {
        match name.parse::<Page>() {
            Ok(page) => self.load_page(page).await,
            Err(e) => {
                error!("[ROUTER] {}", e);
                LoadOutcome::Unknown(name.to_string())
            }
        }
    }
}
