//! Listing service implementation

use rentals_shared::{PaginatedResponse, Pagination};
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::{Listing, ListingChanges, ListingDraft, ListingFilter, User};
use crate::errors::{DomainError, DomainResult};
use crate::policy::{Action, ResourceKind, RuleSet};
use crate::repositories::{ListingRepository, UserRepository};

/// Service for the listing catalogue
pub struct ListingService<L: ListingRepository, U: UserRepository> {
    listing_repository: Arc<L>,
    user_repository: Arc<U>,
}

impl<L: ListingRepository, U: UserRepository> ListingService<L, U> {
    pub fn new(listing_repository: Arc<L>, user_repository: Arc<U>) -> Self {
        Self {
            listing_repository,
            user_repository,
        }
    }

    /// Browse listings, newest first
    pub async fn list(
        &self,
        filter: &ListingFilter,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Listing>> {
        let pagination = pagination.validate();
        let (listings, total) = self.listing_repository.list(filter, pagination).await?;
        Ok(PaginatedResponse::new(listings, pagination, total))
    }

    pub async fn get(&self, id: i64) -> DomainResult<Listing> {
        self.listing_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Listing", id))
    }

    /// Create a listing owned by the actor, or by another account for admins
    pub async fn create(&self, actor: &User, draft: ListingDraft) -> DomainResult<Listing> {
        let rules = RuleSet::for_user(actor);
        rules.ensure(Action::Create, ResourceKind::Listing)?;
        validate_location(&draft.location)?;

        let owner_id = match draft.owner_id {
            Some(owner_id) if owner_id != actor.id => {
                self.ensure_can_assign(&rules, owner_id).await?;
                owner_id
            }
            _ => actor.id,
        };

        let listing = self
            .listing_repository
            .create(draft.into_new_listing(owner_id))
            .await?;
        info!(listing_id = listing.id, owner_id, actor_id = actor.id, "listing created");
        Ok(listing)
    }

    /// Update a listing; the ownership check runs against the stored record
    pub async fn update(
        &self,
        actor: &User,
        id: i64,
        changes: ListingChanges,
    ) -> DomainResult<Listing> {
        let mut listing = self.get(id).await?;
        let rules = RuleSet::for_user(actor);
        rules.ensure(Action::Update, &listing)?;

        if let Some(location) = &changes.location {
            validate_location(location)?;
        }
        if let Some(owner_id) = changes.owner_id {
            if owner_id != listing.owner_id {
                self.ensure_can_assign(&rules, owner_id).await?;
                info!(listing_id = id, from = listing.owner_id, to = owner_id, "listing reassigned");
                listing.owner_id = owner_id;
            }
        }

        listing.apply(&changes);
        self.listing_repository.update(listing).await
    }

    pub async fn delete(&self, actor: &User, id: i64) -> DomainResult<()> {
        let listing = self.get(id).await?;
        RuleSet::for_user(actor).ensure(Action::Delete, &listing)?;

        if !self.listing_repository.delete(id).await? {
            return Err(DomainError::not_found("Listing", id));
        }
        info!(listing_id = id, actor_id = actor.id, "listing deleted");
        Ok(())
    }

    /// Only accounts that manage every listing may pick the owner, and the
    /// owner must exist
    async fn ensure_can_assign(&self, rules: &RuleSet, owner_id: i64) -> DomainResult<()> {
        rules.ensure(Action::Manage, ResourceKind::Listing)?;
        if self.user_repository.find_by_id(owner_id).await?.is_none() {
            return Err(DomainError::not_found("User", owner_id));
        }
        Ok(())
    }
}

fn validate_location(location: &rentals_shared::Coordinate) -> DomainResult<()> {
    if location.is_valid() {
        Ok(())
    } else {
        Err(DomainError::validation("location is out of range"))
    }
}
