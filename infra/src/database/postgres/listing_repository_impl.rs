//! PostgreSQL implementation of the ListingRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use rentals_core::domain::entities::{Listing, ListingFilter, NewListing};
use rentals_core::errors::DomainError;
use rentals_core::repositories::ListingRepository;
use rentals_shared::{Coordinate, Pagination};

use super::filters::{listing_count_query, listing_page_query, LISTING_COLUMNS};
use super::map_sqlx_error;

/// PostgreSQL implementation of ListingRepository
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_listing(row: &PgRow) -> Result<Listing, DomainError> {
        let column = |name: &str, e: sqlx::Error| DomainError::Database {
            message: format!("Failed to get {}: {}", name, e),
        };

        Ok(Listing {
            id: row.try_get("id").map_err(|e| column("id", e))?,
            name: row.try_get("name").map_err(|e| column("name", e))?,
            description: row.try_get("description").map_err(|e| column("description", e))?,
            floor_area: row.try_get("floor_area").map_err(|e| column("floor_area", e))?,
            rent: row.try_get("rent").map_err(|e| column("rent", e))?,
            rooms: row.try_get("rooms").map_err(|e| column("rooms", e))?,
            address: row.try_get("address").map_err(|e| column("address", e))?,
            photo: row.try_get("photo").map_err(|e| column("photo", e))?,
            available: row.try_get("available").map_err(|e| column("available", e))?,
            location: Coordinate::new(
                row.try_get("latitude").map_err(|e| column("latitude", e))?,
                row.try_get("longitude").map_err(|e| column("longitude", e))?,
            ),
            owner_id: row.try_get("owner_id").map_err(|e| column("owner_id", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Listing>, DomainError> {
        let query = format!("SELECT {} FROM listings WHERE id = $1", LISTING_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to find listing", e))?;

        row.as_ref().map(Self::row_to_listing).transpose()
    }

    async fn list(
        &self,
        filter: &ListingFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Listing>, u64), DomainError> {
        let rows = listing_page_query(filter, pagination)
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to list listings", e))?;

        let total: i64 = listing_count_query(filter)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to count listings", e))?;

        let listings = rows
            .iter()
            .map(Self::row_to_listing)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((listings, total.max(0) as u64))
    }

    async fn create(&self, listing: NewListing) -> Result<Listing, DomainError> {
        let query = format!(
            "INSERT INTO listings (name, description, floor_area, rent, rooms, address, photo, \
             available, latitude, longitude, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {}",
            LISTING_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(&listing.name)
            .bind(&listing.description)
            .bind(listing.floor_area)
            .bind(listing.rent)
            .bind(listing.rooms)
            .bind(&listing.address)
            .bind(&listing.photo)
            .bind(listing.available)
            .bind(listing.location.lat)
            .bind(listing.location.long)
            .bind(listing.owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to create listing", e))?;

        Self::row_to_listing(&row)
    }

    async fn update(&self, listing: Listing) -> Result<Listing, DomainError> {
        let query = format!(
            "UPDATE listings SET name = $2, description = $3, floor_area = $4, rent = $5, \
             rooms = $6, address = $7, photo = $8, available = $9, latitude = $10, \
             longitude = $11, owner_id = $12, updated_at = now() \
             WHERE id = $1 RETURNING {}",
            LISTING_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(listing.id)
            .bind(&listing.name)
            .bind(&listing.description)
            .bind(listing.floor_area)
            .bind(listing.rent)
            .bind(listing.rooms)
            .bind(&listing.address)
            .bind(&listing.photo)
            .bind(listing.available)
            .bind(listing.location.lat)
            .bind(listing.location.long)
            .bind(listing.owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to update listing", e))?;

        match row {
            Some(row) => Self::row_to_listing(&row),
            None => Err(DomainError::not_found("Listing", listing.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete listing", e))?;

        Ok(result.rows_affected() > 0)
    }
}
