// service/search.rs
use std::sync::Arc;

use crate::{
    db::{db::DBClient, listingdb::ListingExt},
    dtos::querydtos::SearchQueryDto,
    models::{filtermodel::FilterSpec, listingmodel::ListingWithLocation},
    service::{error::ServiceError, listing_filter::ListingFilter, offer_sorter::OfferSorter},
};

#[derive(Debug)]
pub struct SearchResult {
    pub listings: Vec<ListingWithLocation>,
    pub total: i64,
}

#[derive(Debug, Clone)]
pub struct ListingSearchService<D = DBClient> {
    db_client: Arc<D>,
}

impl<D> ListingSearchService<D>
where
    D: ListingExt + Send + Sync,
{
    pub fn new(db_client: Arc<D>) -> Self {
        Self { db_client }
    }

    /// Filters in the store, then orders and windows the matches in memory.
    /// `total` counts every match regardless of `skip`/`limit`.
    pub async fn search(
        &self,
        spec: &FilterSpec,
        query: &SearchQueryDto,
    ) -> Result<SearchResult, ServiceError> {
        let filter = ListingFilter::from_spec(spec);
        if filter.is_unconstrained() {
            tracing::debug!("Searching all listings");
        } else {
            tracing::debug!("Searching listings with {} constraint(s)", filter.clauses().len());
        }

        let (total, rows) = self.db_client.search_listings(&filter).await?;
        tracing::debug!("Listing search matched {} row(s)", total);

        let sorted = if query.sort_by.is_some() {
            OfferSorter::sort_by_name(&rows, query.sort_by.as_deref(), query.order.as_deref())
        } else {
            rows
        };

        Ok(SearchResult {
            listings: window(sorted, query.skip, query.limit),
            total,
        })
    }
}

fn window<T>(rows: Vec<T>, skip: Option<i64>, limit: Option<i64>) -> Vec<T> {
    if skip.is_none() && limit.is_none() {
        return rows;
    }

    let skip = skip.and_then(|s| usize::try_from(s).ok()).unwrap_or(0);
    let limit = limit
        .and_then(|l| usize::try_from(l).ok())
        .unwrap_or(usize::MAX);

    rows.into_iter().skip(skip).take(limit).collect()
}
