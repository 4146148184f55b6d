use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use crate::{
    db::db::DBClient,
    models::listingmodel::{ListingWithLocation, Location},
    service::listing_filter::ListingFilter,
};

const LISTING_WITH_LOCATION_COLUMNS: &str = r#"
    SELECT
        l.listing_id, l.location_id, l.building_id, l.owner_id, l.features_id,
        l.rooms, l.area, l.price_total, l.price_per_area_basic, l.price_per_area_detailed,
        l.date_posted, l.photo_count, l.url, l.image_url, l.description_text,
        loc.city, loc.locality, loc.district, loc.street, loc.full_address,
        loc.latitude, loc.longitude
    FROM listing l
    JOIN location loc ON l.location_id = loc.location_id
"#;

const LISTING_COUNT: &str = r#"
    SELECT COUNT(l.listing_id)
    FROM listing l
    JOIN location loc ON l.location_id = loc.location_id
"#;

#[async_trait]
pub trait ListingExt {
    /// Matching total and every matching row with its location attached.
    async fn search_listings(
        &self,
        filter: &ListingFilter,
    ) -> Result<(i64, Vec<ListingWithLocation>), sqlx::Error>;
}

#[async_trait]
pub trait LocationExt {
    async fn get_location(
        &self,
        location_id: i64,
    ) -> Result<Option<Location>, sqlx::Error>;

    async fn get_locations(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Location>, sqlx::Error>;

    async fn get_location_count(&self) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl ListingExt for DBClient {
    async fn search_listings(
        &self,
        filter: &ListingFilter,
    ) -> Result<(i64, Vec<ListingWithLocation>), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let mut count_query = QueryBuilder::<Postgres>::new(LISTING_COUNT);
        filter.push_where(&mut count_query);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&mut *tx)
            .await?;

        let mut rows_query = QueryBuilder::<Postgres>::new(LISTING_WITH_LOCATION_COLUMNS);
        filter.push_where(&mut rows_query);
        rows_query.push(" ORDER BY l.listing_id");
        let rows = rows_query
            .build_query_as::<ListingWithLocation>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((total, rows))
    }
}

#[async_trait]
impl LocationExt for DBClient {
    async fn get_location(
        &self,
        location_id: i64,
    ) -> Result<Option<Location>, sqlx::Error> {
        let location = sqlx::query_as::<_, Location>(
            r#"
            SELECT location_id, city, locality, district, street, full_address, latitude, longitude
            FROM location
            WHERE location_id = $1
            "#,
        )
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    async fn get_locations(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Location>, sqlx::Error> {
        let locations = sqlx::query_as::<_, Location>(
            r#"
            SELECT location_id, city, locality, district, street, full_address, latitude, longitude
            FROM location
            ORDER BY location_id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    async fn get_location_count(&self) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(location_id) FROM location")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
