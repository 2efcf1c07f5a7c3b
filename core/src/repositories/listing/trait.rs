//! Listing repository trait defining the interface for listing persistence.

use async_trait::async_trait;
use rentals_shared::Pagination;

use crate::domain::entities::{Listing, ListingFilter, NewListing};
use crate::errors::DomainError;

/// Repository trait for Listing entity persistence operations
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Find a listing by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Listing>, DomainError>;

    /// Page through listings matching the filter, newest first
    ///
    /// # Returns
    /// * `Ok((listings, total))` - The requested page and the total number of matches
    async fn list(
        &self,
        filter: &ListingFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Listing>, u64), DomainError>;

    /// Persist a new listing and return it with its generated id
    async fn create(&self, listing: NewListing) -> Result<Listing, DomainError>;

    /// Overwrite every mutable column, including the owner
    async fn update(&self, listing: Listing) -> Result<Listing, DomainError>;

    /// Delete a listing
    ///
    /// # Returns
    /// * `Ok(true)` - Listing was deleted
    /// * `Ok(false)` - Listing not found
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
