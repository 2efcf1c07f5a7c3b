//! Dynamic WHERE / ORDER / LIMIT construction for list queries

use rentals_core::domain::entities::{ListingFilter, UserFilter, ROOMS_AT_LEAST_THRESHOLD};
use rentals_shared::Pagination;
use sqlx::{Postgres, QueryBuilder};

pub const LISTING_COLUMNS: &str = "id, name, description, floor_area, rent, rooms, address, photo, \
     available, latitude, longitude, owner_id, created_at, updated_at";

pub const USER_COLUMNS: &str =
    "id, email, name, password_hash, role, photo, refresh_token_hash, created_at, updated_at";

/// Joins conditions with WHERE for the first one and AND afterwards
struct Conditions {
    any: bool,
}

impl Conditions {
    fn new() -> Self {
        Self { any: false }
    }

    fn next(&mut self, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(if self.any { " AND " } else { " WHERE " });
        self.any = true;
    }
}

/// Escape LIKE wildcards and wrap the term for a substring match
pub fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

pub fn push_listing_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ListingFilter) {
    let mut conditions = Conditions::new();

    if let Some(name) = &filter.name {
        conditions.next(builder);
        builder.push("name ILIKE ").push_bind(contains_pattern(name));
    }
    if let Some((min, max)) = filter.rent_range() {
        conditions.next(builder);
        builder
            .push("rent BETWEEN ")
            .push_bind(min)
            .push(" AND ")
            .push_bind(max);
    }
    if let Some(rooms) = filter.rooms {
        conditions.next(builder);
        if rooms < ROOMS_AT_LEAST_THRESHOLD {
            builder.push("rooms = ").push_bind(rooms);
        } else {
            builder.push("rooms >= ").push_bind(rooms);
        }
    }
    if let Some(floor_area) = filter.floor_area {
        conditions.next(builder);
        builder.push("floor_area = ").push_bind(floor_area);
    }
}

pub fn push_user_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    let mut conditions = Conditions::new();

    if let Some(name) = &filter.name {
        conditions.next(builder);
        builder.push("name ILIKE ").push_bind(contains_pattern(name));
    }
}

/// Newest first, then the requested page
pub fn push_page(builder: &mut QueryBuilder<'_, Postgres>, pagination: Pagination) {
    builder
        .push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(pagination.limit_i64())
        .push(" OFFSET ")
        .push_bind(pagination.offset_i64());
}

pub fn listing_page_query(filter: &ListingFilter, pagination: Pagination) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM listings", LISTING_COLUMNS));
    push_listing_filter(&mut builder, filter);
    push_page(&mut builder, pagination);
    builder
}

pub fn listing_count_query(filter: &ListingFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM listings");
    push_listing_filter(&mut builder, filter);
    builder
}

pub fn user_page_query(filter: &UserFilter, pagination: Pagination) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM users", USER_COLUMNS));
    push_user_filter(&mut builder, filter);
    push_page(&mut builder, pagination);
    builder
}

pub fn user_count_query(filter: &UserFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM users");
    push_user_filter(&mut builder, filter);
    builder
}
