//! Role-based access policy.
//!
//! A [`RuleSet`] is derived from the acting account's role on every request and
//! answers whether an [`Action`] may be performed on a [`Target`]. Rules only
//! ever grant; anything not granted is denied.
//!
//! Type-level checks (`Target::Kind`) are for "may this account create /
//! list this kind of resource at all". Instance checks (`Target::Listing`,
//! `Target::User`) must be made after the instance has been loaded, because
//! ownership rules are evaluated against the concrete record.

mod rule_set;
mod types;


pub use rule_set::{build_rules, RuleSet};
pub use types::{Action, Condition, PermissionRule, ResourceKind, ResourceScope, Target};
