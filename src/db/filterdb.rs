use async_trait::async_trait;

use crate::{
    db::db::DBClient,
    models::filtermodel::{NewSavedFilter, SavedFilter},
};

#[async_trait]
pub trait SavedFilterExt {
    async fn save_filter(
        &self,
        new_filter: &NewSavedFilter,
    ) -> Result<SavedFilter, sqlx::Error>;

    async fn get_saved_filter(
        &self,
        filter_id: i64,
    ) -> Result<Option<SavedFilter>, sqlx::Error>;

    async fn get_saved_filters(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<SavedFilter>, sqlx::Error>;

    async fn get_saved_filter_count(&self) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl SavedFilterExt for DBClient {
    async fn save_filter(
        &self,
        new_filter: &NewSavedFilter,
    ) -> Result<SavedFilter, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, SavedFilter>(
            r#"
            INSERT INTO saved_filters (
                name, price_min, price_max, price_per_area_min, price_per_area_max, rooms, city, district
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8
            ) RETURNING
                filter_id, name, price_min, price_max, price_per_area_min, price_per_area_max,
                rooms, city, district, created_at
            "#,
        )
        .bind(&new_filter.name)
        .bind(&new_filter.price_min)
        .bind(&new_filter.price_max)
        .bind(&new_filter.price_per_area_min)
        .bind(&new_filter.price_per_area_max)
        .bind(&new_filter.rooms)
        .bind(&new_filter.city)
        .bind(&new_filter.district)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(saved)
    }

    async fn get_saved_filter(
        &self,
        filter_id: i64,
    ) -> Result<Option<SavedFilter>, sqlx::Error> {
        let filter = sqlx::query_as::<_, SavedFilter>(
            r#"
            SELECT filter_id, name, price_min, price_max, price_per_area_min, price_per_area_max,
                rooms, city, district, created_at
            FROM saved_filters
            WHERE filter_id = $1
            "#,
        )
        .bind(filter_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(filter)
    }

    async fn get_saved_filters(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<SavedFilter>, sqlx::Error> {
        let filters = sqlx::query_as::<_, SavedFilter>(
            r#"
            SELECT filter_id, name, price_min, price_max, price_per_area_min, price_per_area_max,
                rooms, city, district, created_at
            FROM saved_filters
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(filters)
    }

    async fn get_saved_filter_count(&self) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(filter_id) FROM saved_filters")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
