//! User service module: account administration and self-service profile
//! management, all checked against the acting account's rule set.

mod service;


pub use service::UserService;
