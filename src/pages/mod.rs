//! Per-page view models.
//!
//! Each page loads what it needs through the gateway and returns a
//! [`PageView`]; the components in `crate::components` only turn these
//! values into markup.

pub mod home;
pub mod locations;
pub mod profile;
pub mod ranking;

use chrono::{DateTime, Utc};
use leptos::logging::error;
use uuid::Uuid;

use crate::error::{GatewayError, RenderError};
use crate::gateway::Backend;
use crate::messages;
use crate::models::location::Location;
use crate::router::Page;

pub const FEATURED_PLACEHOLDER: &str = "https://via.placeholder.com/150x250?text=Sem+Imagem";
pub const CARD_PLACEHOLDER: &str = "https://via.placeholder.com/200x300?text=Sem+Imagem";
pub const RANKING_PLACEHOLDER: &str = "https://via.placeholder.com/80x80?text=Sem+Imagem";
pub const AVATAR_PLACEHOLDER: &str = "https://via.placeholder.com/100x100?text=Avatar";

const STAR_SCALE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Home(home::HomeView),
    Locations(locations::LocationsView),
    Ranking(ranking::RankingView),
    Profile(profile::ProfileView),
    /// The backend refused the page's data.
    Error(ErrorCard),
    /// A plain message card, e.g. no signed-in user on the profile page.
    Notice(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCard {
    pub title: &'static str,
    pub description: &'static str,
}

/// Renders `page`. Gateway failures the user can do nothing about become the
/// page's error card; anything else is returned as a [`RenderError`].
pub async fn render(page: Page, backend: &dyn Backend) -> Result<PageView, RenderError> {
    match page {
        Page::Home => home::load(backend).await,
        Page::Locations => locations::load(backend).await,
        Page::Ranking => ranking::load(backend).await,
        Page::Profile => profile::load(backend).await,
    }
}

pub(crate) fn error_card(
    page: Page,
    err: GatewayError,
    description: &'static str,
) -> Result<PageView, RenderError> {
    error!("[PAGE] Error rendering {} page: {}", page, err);
    if err.is_expected() {
        Ok(PageView::Error(ErrorCard {
            title: messages::ERROR_TITLE,
            description,
        }))
    } else {
        Err(err.into())
    }
}

/// Mean rounded half-up to one decimal, always printed with one digit.
///
/// Rounding goes through `(average * 10).round()`, so a mean such as 23/20
/// prints `1.2` and 87/20 prints `4.4`. A plain `{:.1}` (or JavaScript's
/// `toFixed(1)`) rounds the nearest binary value instead and gives `1.1`
/// and `4.3` for those.
pub fn format_score(average: f64) -> String {
    format!("{:.1}", (average * 10.0).round() / 10.0)
}

pub fn stars(average: f64) -> String {
    let filled = (average.max(0.0).floor() as usize).min(STAR_SCALE);
    format!("{}{}", "★".repeat(filled), "☆".repeat(STAR_SCALE - filled))
}

/// `★★★★☆ (4.0)`
pub fn format_rating(average: f64) -> String {
    format!("{} ({})", stars(average), format_score(average))
}

/// Short Brazilian date, `dd/mm/yyyy`.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default()
}

/// What a location card shows.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCard {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub address: String,
    pub image_url: String,
    pub rating_label: String,
    pub rating_count: usize,
}

impl LocationCard {
    pub fn new(location: &Location, placeholder: &str) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            description: location.description.clone().unwrap_or_default(),
            address: location.address.clone().unwrap_or_default(),
            image_url: location
                .image_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| placeholder.to_string()),
            rating_label: format_rating(location.average_rating()),
            rating_count: location.rating_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn scores_print_one_decimal() {
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(4.0), "4.0");
        assert_eq!(format_score(11.0 / 3.0), "3.7");
    }

    #[test]
    fn score_ties_round_up() {
        assert_eq!(format_score(4.25), "4.3");
        assert_eq!(format_score(2.75), "2.8");
    }

    #[test]
    fn decimal_halves_of_exact_means_round_up() {
        // 23 points over 20 ratings, 87 over 20.
        assert_eq!(format_score(23.0 / 20.0), "1.2");
        assert_eq!(format_score(87.0 / 20.0), "4.4");
    }

    #[test]
    fn stars_use_floor_on_a_five_star_scale() {
        assert_eq!(stars(0.0), "☆☆☆☆☆");
        assert_eq!(stars(3.9), "★★★☆☆");
        assert_eq!(stars(5.0), "★★★★★");
        assert_eq!(format_rating(4.0), "★★★★☆ (4.0)");
    }

    #[test]
    fn out_of_range_scores_do_not_overflow_the_scale() {
        assert_eq!(stars(7.0), "★★★★★");
        assert_eq!(stars(-1.0), "☆☆☆☆☆");
    }

    #[test]
    fn dates_use_brazilian_order() {
        let date = Utc.with_ymd_and_hms(2025, 9, 3, 14, 0, 0).unwrap();
        assert_eq!(format_date(Some(date)), "03/09/2025");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn unexpected_gateway_errors_escape_the_card() {
        let card = error_card(Page::Home, GatewayError::Network("offline".into()), "x");
        assert!(matches!(card, Ok(PageView::Error(_))));

        let escaped = error_card(Page::Home, GatewayError::Decode("bad json".into()), "x");
        assert!(matches!(escaped, Err(RenderError::Gateway(GatewayError::Decode(_)))));
    }
}
