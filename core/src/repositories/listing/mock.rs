//! In-memory implementation of ListingRepository for tests and local runs

use async_trait::async_trait;
use chrono::Utc;
use rentals_shared::Pagination;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::{Listing, ListingFilter, NewListing};
use crate::errors::DomainError;

use super::trait_::ListingRepository;

/// Mock listing repository backed by a map
pub struct MockListingRepository {
    listings: Arc<RwLock<HashMap<i64, Listing>>>,
    next_id: AtomicI64,
}

impl MockListingRepository {
    pub fn new() -> Self {
        Self {
            listings: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a repository pre-populated with listings, keeping their ids
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        let next_id = listings.iter().map(|l| l.id).max().unwrap_or(0) + 1;
        Self {
            listings: Arc::new(RwLock::new(
                listings.into_iter().map(|l| (l.id, l)).collect(),
            )),
            next_id: AtomicI64::new(next_id),
        }
    }
}

impl Default for MockListingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingRepository for MockListingRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Listing>, DomainError> {
        let listings = self.listings.read().await;
        Ok(listings.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &ListingFilter,
        pagination: Pagination,
    ) -> Result<(Vec<Listing>, u64), DomainError> {
        let listings = self.listings.read().await;
        let mut matching: Vec<Listing> = listings
            .values()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(pagination.limit() as usize)
            .collect();
        Ok((page, total))
    }

    async fn create(&self, listing: NewListing) -> Result<Listing, DomainError> {
        let mut listings = self.listings.write().await;
        let now = Utc::now();
        let created = Listing {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: listing.name,
            description: listing.description,
            floor_area: listing.floor_area,
            rent: listing.rent,
            rooms: listing.rooms,
            address: listing.address,
            photo: listing.photo,
            available: listing.available,
            location: listing.location,
            owner_id: listing.owner_id,
            created_at: now,
            updated_at: now,
        };
        listings.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, listing: Listing) -> Result<Listing, DomainError> {
        let mut listings = self.listings.write().await;
        let existing = listings
            .get_mut(&listing.id)
            .ok_or_else(|| DomainError::not_found("Listing", listing.id))?;

        let created_at = existing.created_at;
        *existing = Listing {
            created_at,
            updated_at: Utc::now(),
            ..listing
        };
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut listings = self.listings.write().await;
        Ok(listings.remove(&id).is_some())
    }
}
