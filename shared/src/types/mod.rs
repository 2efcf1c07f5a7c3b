//! Type definitions module with domain-specific sub-modules
//!
//! - `common` - Common value types like coordinates
//! - `pagination` - Pagination for list endpoints

pub mod common;
pub mod pagination;

pub use common::{Coordinate, Timestamp};
pub use pagination::{PaginatedResponse, Pagination};
