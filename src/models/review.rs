// src/models/review.rs

use serde::{Deserialize, Serialize};

use super::PlaceDetail;

/// Raw review attached to a place detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub rating: f64,
    pub text: String,
}

impl Review {
    pub fn new(rating: f64, text: impl Into<String>) -> Self {
        Self {
            rating,
            text: text.into(),
        }
    }
}

/// Flattened (place, review) pair, the unit written to the spreadsheet
/// DOCUMENTATION: Serialized field order matches the spreadsheet column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub company_name: String,
    pub location: String,
    pub stars: f64,
    pub review_text: String,
}

impl ExportRow {
    /// Build the row for one review of one place
    pub fn from_review(place: &PlaceDetail, review: &Review) -> Self {
        Self {
            company_name: place.name.clone(),
            location: place.formatted_address.clone(),
            stars: review.rating,
            review_text: review.text.clone(),
        }
    }

    /// Cell values in spreadsheet column order
    pub fn to_cells(&self) -> Vec<serde_json::Value> {
        vec![
            serde_json::Value::from(self.company_name.as_str()),
            serde_json::Value::from(self.location.as_str()),
            serde_json::Value::from(self.stars),
            serde_json::Value::from(self.review_text.as_str()),
        ]
    }

    /// Human-readable star count: whole ratings print without a fraction
    pub fn stars_display(&self) -> String {
        if self.stars.fract() == 0.0 {
            format!("{}", self.stars as i64)
        } else {
            format!("{}", self.stars)
        }
    }
}
