//! Offer Model

use serde::{Deserialize, Serialize};

/// Promotional offer entity
///
/// An offer without a restaurant reference applies storewide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// Restaurant reference (String ID); absent = global offer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
    /// Discount in percent, 0-100
    pub discount_percent: f64,
    /// Validity window, Unix millis
    pub valid_from: i64,
    pub valid_until: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

fn default_true() -> bool {
    true
}

impl Offer {
    /// Whether the offer is live at the given instant.
    pub fn is_valid_at(&self, now_millis: i64) -> bool {
        self.is_active && self.valid_from <= now_millis && now_millis < self.valid_until
    }
}

/// Create offer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferCreate {
    pub title: String,
    pub description: Option<String>,
    pub restaurant: Option<String>,
    pub discount_percent: f64,
    pub valid_from: i64,
    pub valid_until: i64,
}

/// Update offer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(valid_from: i64, valid_until: i64, is_active: bool) -> Offer {
        Offer {
            id: None,
            title: "Weekend special".to_string(),
            description: None,
            restaurant: None,
            discount_percent: 10.0,
            valid_from,
            valid_until,
            is_active,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn validity_window_is_half_open() {
        let o = offer(100, 200, true);
        assert!(!o.is_valid_at(99));
        assert!(o.is_valid_at(100));
        assert!(o.is_valid_at(199));
        assert!(!o.is_valid_at(200));
    }

    #[test]
    fn inactive_offer_is_never_valid() {
        assert!(!offer(100, 200, false).is_valid_at(150));
    }
}
