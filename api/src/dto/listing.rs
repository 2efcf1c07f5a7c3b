use rentals_core::domain::entities::{ListingChanges, ListingDraft, ListingFilter};
use rentals_shared::{Coordinate, Pagination};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct LocationDto {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub long: f64,
}

impl From<LocationDto> for Coordinate {
    fn from(location: LocationDto) -> Self {
        Coordinate::new(location.lat, location.long)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(alias = "floorArea")]
    #[validate(range(min = 1))]
    pub floor_area: i32,
    #[validate(range(min = 0))]
    pub rent: i32,
    #[validate(range(min = 1))]
    pub rooms: i32,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(url)]
    pub photo: Option<String>,
    pub available: Option<bool>,
    #[validate(nested)]
    pub location: LocationDto,
    /// Owner chosen by an administrator
    #[serde(alias = "realtorId")]
    pub owner_id: Option<i64>,
}

impl From<CreateListingRequest> for ListingDraft {
    fn from(request: CreateListingRequest) -> Self {
        ListingDraft {
            name: request.name,
            description: request.description,
            floor_area: request.floor_area,
            rent: request.rent,
            rooms: request.rooms,
            address: request.address,
            photo: request.photo,
            available: request.available,
            location: request.location.into(),
            owner_id: request.owner_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateListingRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[serde(alias = "floorArea")]
    #[validate(range(min = 1))]
    pub floor_area: Option<i32>,
    #[validate(range(min = 0))]
    pub rent: Option<i32>,
    #[validate(range(min = 1))]
    pub rooms: Option<i32>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(url)]
    pub photo: Option<String>,
    pub available: Option<bool>,
    #[validate(nested)]
    pub location: Option<LocationDto>,
    #[serde(alias = "realtorId")]
    pub owner_id: Option<i64>,
}

impl From<UpdateListingRequest> for ListingChanges {
    fn from(request: UpdateListingRequest) -> Self {
        ListingChanges {
            name: request.name,
            description: request.description,
            floor_area: request.floor_area,
            rent: request.rent,
            rooms: request.rooms,
            address: request.address,
            photo: request.photo,
            available: request.available,
            location: request.location.map(Into::into),
            owner_id: request.owner_id,
        }
    }
}

/// Query string of `GET /listings`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingQuery {
    pub name: Option<String>,
    #[serde(alias = "rentMin")]
    pub rent_min: Option<i32>,
    #[serde(alias = "rentMax")]
    pub rent_max: Option<i32>,
    pub rooms: Option<i32>,
    #[serde(alias = "floorArea")]
    pub floor_area: Option<i32>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListingQuery {
    pub fn filter(&self) -> ListingFilter {
        ListingFilter {
            name: self.name.clone().filter(|n| !n.is_empty()),
            rent_min: self.rent_min,
            rent_max: self.rent_max,
            rooms: self.rooms,
            floor_area: self.floor_area,
        }
    }

    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.per_page),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_out_of_range_fails_validation() {
        let request: CreateListingRequest = serde_json::from_value(serde_json::json!({
            "name": "Loft",
            "description": "Bright loft",
            "floorArea": 50,
            "rent": 900,
            "rooms": 2,
            "address": "1 Main St",
            "location": { "lat": 120.0, "long": 10.0 }
        }))
        .unwrap();

        assert_eq!(request.floor_area, 50);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_query_defaults() {
        let query = ListingQuery::default();
        let pagination = query.pagination();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.per_page, 4);
        assert_eq!(query.filter(), ListingFilter::default());
    }

    #[test]
    fn test_update_request_maps_to_changes() {
        let request = UpdateListingRequest {
            rent: Some(700),
            owner_id: Some(3),
            ..Default::default()
        };
        let changes: ListingChanges = request.into();
        assert_eq!(changes.rent, Some(700));
        assert_eq!(changes.owner_id, Some(3));
        assert!(changes.name.is_none());
    }
}
