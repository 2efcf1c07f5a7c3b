//! Listing entity representing an apartment offered for rent.

use chrono::{DateTime, Utc};
use rentals_shared::Coordinate;
use serde::{Deserialize, Serialize};

/// Room count from which the filter switches from exact match to "at least"
pub const ROOMS_AT_LEAST_THRESHOLD: i32 = 4;

/// Listing entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Unique identifier for the listing
    pub id: i64,

    pub name: String,

    pub description: String,

    /// Floor area in square meters
    pub floor_area: i32,

    /// Monthly rent
    pub rent: i32,

    pub rooms: i32,

    pub address: String,

    /// Photo URL
    pub photo: Option<String>,

    /// Whether the apartment can currently be rented
    pub available: bool,

    pub location: Coordinate,

    /// The account that owns the listing
    pub owner_id: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Checks if the listing belongs to the given account
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }

    /// Apply a partial update, leaving ownership untouched
    pub fn apply(&mut self, changes: &ListingChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(floor_area) = changes.floor_area {
            self.floor_area = floor_area;
        }
        if let Some(rent) = changes.rent {
            self.rent = rent;
        }
        if let Some(rooms) = changes.rooms {
            self.rooms = rooms;
        }
        if let Some(address) = &changes.address {
            self.address = address.clone();
        }
        if let Some(photo) = &changes.photo {
            self.photo = Some(photo.clone());
        }
        if let Some(available) = changes.available {
            self.available = available;
        }
        if let Some(location) = changes.location {
            self.location = location;
        }
        self.updated_at = Utc::now();
    }
}

/// Listing input as submitted by a client
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub floor_area: i32,
    pub rent: i32,
    pub rooms: i32,
    pub address: String,
    pub photo: Option<String>,
    pub available: Option<bool>,
    pub location: Coordinate,
    /// Explicit owner; defaults to the creating account
    pub owner_id: Option<i64>,
}

impl ListingDraft {
    /// Resolve the draft into a persistable listing owned by `owner_id`
    pub fn into_new_listing(self, owner_id: i64) -> NewListing {
        NewListing {
            name: self.name,
            description: self.description,
            floor_area: self.floor_area,
            rent: self.rent,
            rooms: self.rooms,
            address: self.address,
            photo: self.photo,
            available: self.available.unwrap_or(true),
            location: self.location,
            owner_id,
        }
    }
}

/// Data required to persist a new listing
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub name: String,
    pub description: String,
    pub floor_area: i32,
    pub rent: i32,
    pub rooms: i32,
    pub address: String,
    pub photo: Option<String>,
    pub available: bool,
    pub location: Coordinate,
    pub owner_id: i64,
}

/// Partial listing update
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListingChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub floor_area: Option<i32>,
    pub rent: Option<i32>,
    pub rooms: Option<i32>,
    pub address: Option<String>,
    pub photo: Option<String>,
    pub available: Option<bool>,
    pub location: Option<Coordinate>,
    /// Reassign ownership (administrators only)
    pub owner_id: Option<i64>,
}

/// Search filter for the public listing catalogue
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListingFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Lower rent bound, only applied together with `rent_max`
    pub rent_min: Option<i32>,
    /// Upper rent bound, only applied together with `rent_min`
    pub rent_max: Option<i32>,
    /// Exact room count below 4, minimum room count from 4 upwards
    pub rooms: Option<i32>,
    /// Exact floor area
    pub floor_area: Option<i32>,
}

impl ListingFilter {
    /// Inclusive rent range, present only when both bounds are set
    pub fn rent_range(&self) -> Option<(i32, i32)> {
        match (self.rent_min, self.rent_max) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    /// Checks a listing against the filter
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(name) = &self.name {
            if !listing.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some((min, max)) = self.rent_range() {
            if listing.rent < min || listing.rent > max {
                return false;
            }
        }
        if let Some(rooms) = self.rooms {
            let ok = if rooms < ROOMS_AT_LEAST_THRESHOLD {
                listing.rooms == rooms
            } else {
                listing.rooms >= rooms
            };
            if !ok {
                return false;
            }
        }
        if let Some(floor_area) = self.floor_area {
            if listing.floor_area != floor_area {
                return false;
            }
        }
        true
    }
}
