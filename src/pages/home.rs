use super::{error_card, LocationCard, PageView, FEATURED_PLACEHOLDER};
use crate::error::RenderError;
use crate::gateway::Backend;
use crate::messages;
use crate::models::location::Location;
use crate::router::Page;

const FEATURED_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub featured: Vec<LocationCard>,
    pub location_count: usize,
    pub rating_count: usize,
}

impl HomeView {
    pub fn new(locations: &[Location]) -> Self {
        Self {
            featured: locations
                .iter()
                .take(FEATURED_COUNT)
                .map(|location| LocationCard::new(location, FEATURED_PLACEHOLDER))
                .collect(),
            location_count: locations.len(),
            rating_count: locations.iter().map(Location::rating_count).sum(),
        }
    }
}

pub async fn load(backend: &dyn Backend) -> Result<PageView, RenderError> {
    match backend.get_locations().await {
        Ok(locations) => Ok(PageView::Home(HomeView::new(&locations))),
        Err(e) => error_card(Page::Home, e, messages::HOME_LOAD_FAILED),
    }
}
