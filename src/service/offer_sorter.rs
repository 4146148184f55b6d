use chrono::NaiveDate;
use sqlx::types::BigDecimal;

use crate::models::listingmodel::OfferFields;

/// Closed set of orderings a search can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Price,
    PricePerArea,
    DatePosted,
    Area,
    BestMatch,
}

impl SortBy {
    /// Exact, case-sensitive match. `None` for anything else; callers treat
    /// that as no reordering.
    pub fn parse(name: &str) -> Option<SortBy> {
        match name {
            "price" => Some(SortBy::Price),
            "price_per_area" => Some(SortBy::PricePerArea),
            "date_posted" => Some(SortBy::DatePosted),
            "area" => Some(SortBy::Area),
            "best_match" => Some(SortBy::BestMatch),
            _ => None,
        }
    }

    fn key<T: OfferFields>(self, offer: &T) -> Option<SortValue> {
        match self {
            SortBy::Price => offer.price_total().cloned().map(SortValue::Decimal),
            SortBy::PricePerArea => offer.effective_price_per_area().map(SortValue::Decimal),
            SortBy::DatePosted => offer.date_posted().map(SortValue::Date),
            SortBy::Area => offer.area().cloned().map(SortValue::Decimal),
            SortBy::BestMatch => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than `desc` sorts ascending.
    pub fn parse(name: Option<&str>) -> SortOrder {
        match name {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Decimal(BigDecimal),
    Date(NaiveDate),
}

/// `(is_missing, value)`: present values order before missing ones.
type SortKey = (bool, Option<SortValue>);

fn sort_key<T: OfferFields>(sort_by: SortBy, offer: &T) -> SortKey {
    let value = sort_by.key(offer);
    (value.is_none(), value)
}

pub struct OfferSorter;

impl OfferSorter {
    /// Returns a sorted copy of `offers`; the input is left untouched.
    ///
    /// Ascending places offers without a key last. Descending is the reverse
    /// arrangement, so those offers come first. Offers with equal keys keep
    /// their input order in both directions.
    pub fn sort<T>(offers: &[T], sort_by: Option<SortBy>, order: SortOrder) -> Vec<T>
    where
        T: OfferFields + Clone,
    {
        let sort_by = match sort_by {
            None | Some(SortBy::BestMatch) => return offers.to_vec(),
            Some(sort_by) => sort_by,
        };

        let mut keyed: Vec<(SortKey, &T)> = offers
            .iter()
            .map(|offer| (sort_key(sort_by, offer), offer))
            .collect();

        // slice::sort_by is stable
        keyed.sort_by(|(a, _), (b, _)| match order {
            SortOrder::Asc => a.cmp(b),
            SortOrder::Desc => b.cmp(a),
        });

        keyed.into_iter().map(|(_, offer)| offer.clone()).collect()
    }

    /// Sorts by name, the way request parameters arrive.
    pub fn sort_by_name<T>(offers: &[T], sort_by: Option<&str>, order: Option<&str>) -> Vec<T>
    where
        T: OfferFields + Clone,
    {
        let criterion = sort_by.and_then(SortBy::parse);
        if sort_by.is_some() && criterion.is_none() {
            tracing::debug!("Unknown sort criterion {:?}, keeping input order", sort_by);
        }

        Self::sort(offers, criterion, SortOrder::parse(order))
    }
}
