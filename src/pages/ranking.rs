use std::cmp::Ordering;

use uuid::Uuid;

use super::{error_card, format_rating, format_score, PageView, RANKING_PLACEHOLDER};
use crate::error::RenderError;
use crate::gateway::Backend;
use crate::messages;
use crate::models::location::Location;
use crate::router::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_position(position: usize) -> Option<Medal> {
        match position {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Medal::Gold => "fas fa-medal medal-gold",
            Medal::Silver => "fas fa-medal medal-silver",
            Medal::Bronze => "fas fa-medal medal-bronze",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedLocation {
    pub position: usize,
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub average: f64,
    pub rating_count: usize,
    pub medal: Option<Medal>,
}

impl RankedLocation {
    pub fn rating_label(&self) -> String {
        format_rating(self.average)
    }

    pub fn score_label(&self) -> String {
        format_score(self.average)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingView {
    pub entries: Vec<RankedLocation>,
}

/// Drops unrated locations, then orders by mean score and, on equal means,
/// by number of ratings. The sort is stable, so full ties keep fetch order.
pub fn rank_locations(locations: &[Location]) -> Vec<RankedLocation> {
    let mut rated: Vec<(&Location, f64, usize)> = locations
        .iter()
        .map(|location| (location, location.average_rating(), location.rating_count()))
        .filter(|(_, _, count)| *count > 0)
        .collect();

    rated.sort_by(|(_, avg_a, count_a), (_, avg_b, count_b)| {
        avg_b
            .partial_cmp(avg_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| count_b.cmp(count_a))
    });

    rated
        .into_iter()
        .enumerate()
        .map(|(index, (location, average, rating_count))| {
            let position = index + 1;
            RankedLocation {
                position,
                id: location.id,
                name: location.name.clone(),
                image_url: location
                    .image_url
                    .clone()
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(|| RANKING_PLACEHOLDER.to_string()),
                average,
                rating_count,
                medal: Medal::for_position(position),
            }
        })
        .collect()
}

pub async fn load(backend: &dyn Backend) -> Result<PageView, RenderError> {
    match backend.get_locations().await {
        Ok(locations) => Ok(PageView::Ranking(RankingView {
            entries: rank_locations(&locations),
        })),
        Err(e) => error_card(Page::Ranking, e, messages::RANKING_LOAD_FAILED),
    }
}
