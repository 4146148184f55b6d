use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::BigDecimal, FromRow};

use crate::utils::decimal::deserialize_optional;

/// Inclusive range; each bound is optional on its own.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PriceRange {
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub min: Option<BigDecimal>,
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub max: Option<BigDecimal>,
}

impl PriceRange {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// The constraints a listing search is narrowed by. Every field is optional
/// and an absent field places no constraint on its dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub price_total: Option<PriceRange>,
    pub price_per_area: Option<PriceRange>,
    pub rooms: Option<Vec<i32>>,
    pub city: Option<String>,
    pub district: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SavedFilter {
    pub filter_id: i64,
    pub name: String,
    pub price_min: Option<BigDecimal>,
    pub price_max: Option<BigDecimal>,
    pub price_per_area_min: Option<BigDecimal>,
    pub price_per_area_max: Option<BigDecimal>,
    pub rooms: Option<String>, //JSON array text, e.g. "[2,3]"
    pub city: Option<String>,
    pub district: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Column values for a saved filter before the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavedFilter {
    pub name: String,
    pub price_min: Option<BigDecimal>,
    pub price_max: Option<BigDecimal>,
    pub price_per_area_min: Option<BigDecimal>,
    pub price_per_area_max: Option<BigDecimal>,
    pub rooms: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
}
