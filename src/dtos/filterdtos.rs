use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::BigDecimal;
use validator::{Validate, ValidationError};

use crate::{
    dtos::locationdtos::LocationDto,
    error::ErrorMessage,
    models::{
        filtermodel::{FilterSpec, NewSavedFilter, PriceRange, SavedFilter},
        listingmodel::ListingWithLocation,
    },
    utils::rooms::{decode_rooms, encode_rooms},
};

fn validate_rooms(rooms: &Vec<i32>) -> Result<(), ValidationError> {
    if rooms.iter().any(|r| *r < 1) {
        let mut error = ValidationError::new("rooms");
        error.message = Some(Cow::from(ErrorMessage::InvalidRoomCount.to_string()));
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct FilterRequestDto {
    // Label only, not used for matching
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,

    pub price_total: Option<PriceRange>,
    pub price_per_area: Option<PriceRange>,

    #[validate(custom = "validate_rooms")]
    pub rooms: Option<Vec<i32>>,

    #[validate(length(max = 255, message = "City must be at most 255 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 255, message = "District must be at most 255 characters"))]
    pub district: Option<String>,
}

impl FilterRequestDto {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            price_total: self.price_total.clone(),
            price_per_area: self.price_per_area.clone(),
            rooms: self.rooms.clone(),
            city: self.city.clone(),
            district: self.district.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct SaveFilterRequestDto {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    pub price_total: Option<PriceRange>,
    pub price_per_area: Option<PriceRange>,

    #[validate(custom = "validate_rooms")]
    pub rooms: Option<Vec<i32>>,

    #[validate(length(max = 255, message = "City must be at most 255 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 255, message = "District must be at most 255 characters"))]
    pub district: Option<String>,
}

impl SaveFilterRequestDto {
    pub fn to_new_filter(&self) -> NewSavedFilter {
        let price_total = self.price_total.clone().unwrap_or_default();
        let price_per_area = self.price_per_area.clone().unwrap_or_default();

        NewSavedFilter {
            name: self.name.clone(),
            price_min: price_total.min,
            price_max: price_total.max,
            price_per_area_min: price_per_area.min,
            price_per_area_max: price_per_area.max,
            rooms: encode_rooms(self.rooms.as_deref()),
            city: self.city.clone(),
            district: self.district.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SavedFilterDto {
    pub filter_id: i64,
    pub name: String,
    pub price_min: Option<BigDecimal>,
    pub price_max: Option<BigDecimal>,
    pub price_per_area_min: Option<BigDecimal>,
    pub price_per_area_max: Option<BigDecimal>,
    pub rooms: Option<Vec<i32>>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SavedFilterDto {
    pub fn from_saved_filter(filter: &SavedFilter) -> Self {
        Self {
            filter_id: filter.filter_id,
            name: filter.name.clone(),
            price_min: filter.price_min.clone(),
            price_max: filter.price_max.clone(),
            price_per_area_min: filter.price_per_area_min.clone(),
            price_per_area_max: filter.price_per_area_max.clone(),
            rooms: decode_rooms(filter.rooms.as_deref()),
            city: filter.city.clone(),
            district: filter.district.clone(),
            created_at: filter.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavedFilterListDto {
    pub filters: Vec<SavedFilterDto>,
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListingDto {
    pub listing_id: i64,
    pub rooms: Option<i32>,
    pub area: Option<BigDecimal>,
    pub price_total: Option<BigDecimal>,
    pub price_per_area_basic: Option<BigDecimal>,
    pub price_per_area_detailed: Option<BigDecimal>,
    pub date_posted: Option<NaiveDate>,
    pub photo_count: Option<i32>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub description_text: Option<String>,
    pub location: LocationDto,
}

impl ListingDto {
    pub fn from_row(row: &ListingWithLocation) -> Self {
        let listing = &row.listing;
        Self {
            listing_id: listing.listing_id,
            rooms: listing.rooms,
            area: listing.area.clone(),
            price_total: listing.price_total.clone(),
            price_per_area_basic: listing.price_per_area_basic.clone(),
            price_per_area_detailed: listing.price_per_area_detailed.clone(),
            date_posted: listing.date_posted,
            photo_count: listing.photo_count,
            url: listing.url.clone(),
            image_url: listing.image_url.clone(),
            description_text: listing.description_text.clone(),
            location: LocationDto::from_location(&row.location),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilteredListingsDto {
    pub listings: Vec<ListingDto>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listingmodel::fixtures::dec;
    use serde_json::json;

    #[test]
    fn test_rooms_below_one_rejected() {
        let request = FilterRequestDto {
            rooms: Some(vec![2, 0]),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rooms"));

        let ok = FilterRequestDto {
            rooms: Some(vec![1, 4]),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_save_request_name_length() {
        let empty: SaveFilterRequestDto = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(empty.validate().is_err());

        let long: SaveFilterRequestDto =
            serde_json::from_value(json!({ "name": "x".repeat(256) })).unwrap();
        assert!(long.validate().is_err());

        let ok: SaveFilterRequestDto =
            serde_json::from_value(json!({ "name": "My apartment search" })).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_filter_request_from_json() {
        let request: FilterRequestDto = serde_json::from_value(json!({
            "price_total": { "min": "300000.00", "max": "600000.00" },
            "price_per_area": { "min": "8000" },
            "rooms": [2, 3],
            "city": "Warszawa"
        }))
        .unwrap();

        let spec = request.to_spec();
        assert_eq!(
            spec.price_total,
            Some(PriceRange {
                min: Some(dec("300000")),
                max: Some(dec("600000"))
            })
        );
        assert_eq!(spec.price_per_area.unwrap().max, None);
        assert_eq!(spec.rooms, Some(vec![2, 3]));
        assert_eq!(spec.city.as_deref(), Some("Warszawa"));
        assert_eq!(spec.district, None);
    }

    #[test]
    fn test_numeric_bounds_are_inclusive_at_the_boundary() {
        use crate::{
            models::listingmodel::fixtures::{listing, location, with_location},
            service::listing_filter::ListingFilter,
        };

        let request: FilterRequestDto = serde_json::from_value(json!({
            "price_per_area": { "min": 9000.1 },
            "price_total": { "min": 200000.00, "max": 450000.3 }
        }))
        .unwrap();

        let spec = request.to_spec();
        assert_eq!(spec.price_per_area.as_ref().unwrap().min, Some(dec("9000.10")));
        assert_eq!(spec.price_total.as_ref().unwrap().max, Some(dec("450000.30")));

        let mut boundary = listing(1);
        boundary.price_per_area_basic = Some(dec("9000.10"));
        boundary.price_total = Some(dec("450000.30"));
        let row = with_location(boundary, location(1, Some("Warszawa"), None));

        assert!(ListingFilter::from_spec(&spec).matches(&row));
    }

    #[test]
    fn test_save_request_flattens_ranges_and_encodes_rooms() {
        let request: SaveFilterRequestDto = serde_json::from_value(json!({
            "name": "Centrum",
            "price_total": { "max": "500000" },
            "rooms": [2, 3],
            "district": "Centrum"
        }))
        .unwrap();

        let new_filter = request.to_new_filter();
        assert_eq!(new_filter.price_min, None);
        assert_eq!(new_filter.price_max, Some(dec("500000")));
        assert_eq!(new_filter.price_per_area_min, None);
        assert_eq!(new_filter.rooms.as_deref(), Some("[2,3]"));
        assert_eq!(new_filter.district.as_deref(), Some("Centrum"));
    }

    #[test]
    fn test_saved_filter_dto_decodes_rooms_leniently() {
        let mut filter = SavedFilter {
            filter_id: 7,
            name: "Old".to_string(),
            price_min: None,
            price_max: None,
            price_per_area_min: None,
            price_per_area_max: None,
            rooms: Some("[1,2]".to_string()),
            city: None,
            district: None,
            created_at: Utc::now(),
        };
        assert_eq!(SavedFilterDto::from_saved_filter(&filter).rooms, Some(vec![1, 2]));

        filter.rooms = Some("not json".to_string());
        assert_eq!(SavedFilterDto::from_saved_filter(&filter).rooms, None);
    }
}
