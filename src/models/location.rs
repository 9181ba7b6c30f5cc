use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rating::RatingSummary;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_by: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ratings: Vec<RatingSummary>,
}

impl Location {
    pub fn rating_count(&self) -> usize {
        self.ratings.len()
    }

    /// Arithmetic mean of the nested scores, 0 when nobody rated the location.
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.ratings.iter().map(|r| u32::from(r.rating)).sum();
        f64::from(sum) / self.ratings.len() as f64
    }

    /// Case-insensitive substring match over name, description and address.
    /// `term` must already be lowercased.
    pub fn matches(&self, term: &str) -> bool {
        let contains = |field: &str| field.to_lowercase().contains(term);
        contains(&self.name)
            || self.description.as_deref().is_some_and(contains)
            || self.address.as_deref().is_some_and(contains)
    }
}

/// Payload of the add-location form; `created_by` is stamped by the gateway.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NewLocation {
    pub name: String,
    pub description: String,
    pub address: String,
    pub image_url: String,
}

/// Row returned by the `get_top_rated_locations` stored procedure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TopRatedLocation {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rating::RatingSummary;

    fn location(name: &str, scores: &[u8]) -> Location {
        Location {
            id: Uuid::new_v4(),
            name: name.into(),
            description: Some("Cafeteria com mesas ao ar livre".into()),
            address: None,
            image_url: None,
            created_by: None,
            created_at: None,
            ratings: scores
                .iter()
                .map(|&rating| RatingSummary {
                    rating,
                    comment: None,
                    profiles: None,
                })
                .collect(),
        }
    }

    #[test]
    fn average_of_no_ratings_is_zero() {
        assert_eq!(location("Vazio", &[]).average_rating(), 0.0);
    }

    #[test]
    fn average_is_arithmetic_mean() {
        let cafe = location("Café A", &[5, 3]);
        assert_eq!(cafe.average_rating(), 4.0);
        assert_eq!(cafe.rating_count(), 2);
        assert_eq!(location("Café C", &[5, 4, 4, 4]).average_rating(), 4.25);
    }

    #[test]
    fn matches_ignores_case_and_skips_missing_fields() {
        let cafe = location("Café A", &[]);
        assert!(cafe.matches("café"));
        assert!(cafe.matches("ar livre"));
        assert!(!cafe.matches("rua"));
    }

    #[test]
    fn nested_ratings_deserialize() {
        let json = r#"{
            "id": "6f1c1f2a-1a0e-4f0b-9d43-3c2d6ad0c001",
            "name": "Padaria Central",
            "description": null,
            "address": "Rua das Flores, 10",
            "image_url": null,
            "created_by": "6f1c1f2a-1a0e-4f0b-9d43-3c2d6ad0c002",
            "created_at": "2025-09-18T21:13:31.123456+00:00",
            "ratings": [
                {"rating": 4, "comment": "Bom", "profiles": {"full_name": "Ana"}},
                {"rating": 2, "comment": null, "profiles": null}
            ]
        }"#;
        let parsed: Location = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.rating_count(), 2);
        assert_eq!(parsed.average_rating(), 3.0);
        assert_eq!(parsed.address.as_deref(), Some("Rua das Flores, 10"));
    }
}
