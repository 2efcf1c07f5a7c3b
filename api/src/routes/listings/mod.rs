//! Listing route handlers
//!
//! Browsing is public; creating, editing and deleting require a session and
//! are checked against the caller's permissions by the listing service.

use actix_web::{web, HttpResponse};
use validator::Validate;

use rentals_core::repositories::{ListingRepository, UserRepository};

use crate::app::AppState;
use crate::dto::{CreateListingRequest, ListingQuery, UpdateListingRequest};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/listings
///
/// Query parameters: `name`, `rent_min`, `rent_max`, `rooms`, `floor_area`,
/// `page`, `limit`.
pub async fn list<L, U>(
    state: web::Data<AppState<L, U>>,
    query: web::Query<ListingQuery>,
) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    match state
        .listing_service
        .list(&query.filter(), query.pagination())
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/listings/{id}
pub async fn get<L, U>(state: web::Data<AppState<L, U>>, path: web::Path<i64>) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    match state.listing_service.get(path.into_inner()).await {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/listings
pub async fn create<L, U>(
    state: web::Data<AppState<L, U>>,
    auth: AuthContext,
    request: web::Json<CreateListingRequest>,
) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.listing_service.create(&auth.user, request.into()).await {
        Ok(listing) => HttpResponse::Created().json(listing),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PATCH /api/v1/listings/{id}
pub async fn update<L, U>(
    state: web::Data<AppState<L, U>>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateListingRequest>,
) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .listing_service
        .update(&auth.user, path.into_inner(), request.into())
        .await
    {
        Ok(listing) => HttpResponse::Ok().json(listing),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for DELETE /api/v1/listings/{id}
pub async fn delete<L, U>(
    state: web::Data<AppState<L, U>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    match state.listing_service.delete(&auth.user, path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(&error),
    }
}
