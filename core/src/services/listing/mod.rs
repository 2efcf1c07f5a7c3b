//! Listing service module
//!
//! Public browsing of the catalogue plus policy-checked creation, update and
//! deletion of listings.

mod service;


pub use service::ListingService;
