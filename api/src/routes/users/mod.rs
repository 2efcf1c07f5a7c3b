//! Account management route handlers
//!
//! Every route requires a session. Listing and creating accounts is for
//! administrators; other accounts may read and edit themselves.

use actix_web::{web, HttpResponse};
use validator::Validate;

use rentals_core::repositories::{ListingRepository, UserRepository};

use crate::app::AppState;
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserQuery};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/users
pub async fn list<L, U>(
    state: web::Data<AppState<L, U>>,
    auth: AuthContext,
    query: web::Query<UserQuery>,
) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    match state
        .user_service
        .list(&auth.user, &query.filter(), query.pagination())
        .await
    {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/users/{id}
pub async fn get<L, U>(
    state: web::Data<AppState<L, U>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    match state.user_service.get(&auth.user, path.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/users
pub async fn create<L, U>(
    state: web::Data<AppState<L, U>>,
    auth: AuthContext,
    request: web::Json<CreateUserRequest>,
) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.user_service.create(&auth.user, request.into()).await {
        Ok(user) => HttpResponse::Created().json(user),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PATCH /api/v1/users/{id}
pub async fn update<L, U>(
    state: web::Data<AppState<L, U>>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateUserRequest>,
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
        .user_service
        .update(&auth.user, path.into_inner(), request.into())
        .await
    {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for DELETE /api/v1/users/{id}
///
/// The account's listings are removed with it.
pub async fn delete<L, U>(
    state: web::Data<AppState<L, U>>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    L: ListingRepository + 'static,
    U: UserRepository + 'static,
{
    match state.user_service.delete(&auth.user, path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error(&error),
    }
}
