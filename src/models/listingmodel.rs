use chrono::NaiveDate;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use sqlx::{types::BigDecimal, FromRow};

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Location {
    pub location_id: i64,
    pub city: Option<String>,
    pub locality: Option<String>,
    pub district: Option<String>,
    pub street: Option<String>,
    pub full_address: Option<String>,
    pub latitude: Option<BigDecimal>,
    pub longitude: Option<BigDecimal>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Listing {
    pub listing_id: i64,
    pub location_id: i64,
    pub building_id: i64,
    pub owner_id: i64,
    pub features_id: i64,

    pub rooms: Option<i32>,
    pub area: Option<BigDecimal>,

    //Pricing
    pub price_total: Option<BigDecimal>,
    pub price_per_area_basic: Option<BigDecimal>,    //simple total/area ratio from the source
    pub price_per_area_detailed: Option<BigDecimal>, //authoritative figure when present

    pub date_posted: Option<NaiveDate>,

    //Display
    pub photo_count: Option<i32>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub description_text: Option<String>,
}

/// A listing row joined with the location it references.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct ListingWithLocation {
    #[sqlx(flatten)]
    pub listing: Listing,
    #[sqlx(flatten)]
    pub location: Location,
}

/// Read access to the fields an offer is filtered and ordered by.
pub trait OfferFields {
    fn price_total(&self) -> Option<&BigDecimal>;
    fn area(&self) -> Option<&BigDecimal>;
    fn price_per_area_basic(&self) -> Option<&BigDecimal>;
    fn price_per_area_detailed(&self) -> Option<&BigDecimal>;
    fn date_posted(&self) -> Option<NaiveDate>;

    /// Best available price per unit of area.
    ///
    /// The detailed figure wins, then the basic one, then `price_total / area`.
    /// A zero or missing area yields `None` rather than a division error.
    fn effective_price_per_area(&self) -> Option<BigDecimal> {
        let chain: [fn(&Self) -> Option<BigDecimal>; 3] = [
            |offer| offer.price_per_area_detailed().cloned(),
            |offer| offer.price_per_area_basic().cloned(),
            |offer| derived_price_per_area(offer.price_total(), offer.area()),
        ];

        chain.iter().find_map(|source| source(self))
    }
}

pub fn derived_price_per_area(
    price_total: Option<&BigDecimal>,
    area: Option<&BigDecimal>,
) -> Option<BigDecimal> {
    match (price_total, area) {
        (Some(total), Some(area)) if !area.is_zero() => Some(total / area),
        _ => None,
    }
}

impl OfferFields for Listing {
    fn price_total(&self) -> Option<&BigDecimal> {
        self.price_total.as_ref()
    }

    fn area(&self) -> Option<&BigDecimal> {
        self.area.as_ref()
    }

    fn price_per_area_basic(&self) -> Option<&BigDecimal> {
        self.price_per_area_basic.as_ref()
    }

    fn price_per_area_detailed(&self) -> Option<&BigDecimal> {
        self.price_per_area_detailed.as_ref()
    }

    fn date_posted(&self) -> Option<NaiveDate> {
        self.date_posted
    }
}

impl OfferFields for ListingWithLocation {
    fn price_total(&self) -> Option<&BigDecimal> {
        self.listing.price_total()
    }

    fn area(&self) -> Option<&BigDecimal> {
        self.listing.area()
    }

    fn price_per_area_basic(&self) -> Option<&BigDecimal> {
        self.listing.price_per_area_basic()
    }

    fn price_per_area_detailed(&self) -> Option<&BigDecimal> {
        self.listing.price_per_area_detailed()
    }

    fn date_posted(&self) -> Option<NaiveDate> {
        self.listing.date_posted()
    }
}
