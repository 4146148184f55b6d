use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;

use crate::models::listingmodel::Location;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocationDto {
    pub location_id: i64,
    pub city: Option<String>,
    pub locality: Option<String>,
    pub district: Option<String>,
    pub street: Option<String>,
    pub full_address: Option<String>,
    pub latitude: Option<BigDecimal>,
    pub longitude: Option<BigDecimal>,
}

impl LocationDto {
    pub fn from_location(location: &Location) -> Self {
        Self {
            location_id: location.location_id,
            city: location.city.clone(),
            locality: location.locality.clone(),
            district: location.district.clone(),
            street: location.street.clone(),
            full_address: location.full_address.clone(),
            latitude: location.latitude.clone(),
            longitude: location.longitude.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationListDto {
    pub locations: Vec<LocationDto>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}
