//! Policy vocabulary: actions, resource scopes, conditions and targets

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Listing, User};

/// Operation requested on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Wildcard that covers every other action
    Manage,
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    /// Whether a rule granting `self` covers a request for `requested`
    pub fn covers(self, requested: Action) -> bool {
        self == Action::Manage || self == requested
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Manage => write!(f, "manage"),
            Action::Create => write!(f, "create"),
            Action::Read => write!(f, "read"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// Kinds of resources guarded by the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Listing,
    User,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Listing => write!(f, "listing"),
            ResourceKind::User => write!(f, "user"),
        }
    }
}

/// Which resources a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceScope {
    /// Every resource kind
    All,
    Kind(ResourceKind),
}

impl ResourceScope {
    pub fn includes(self, kind: ResourceKind) -> bool {
        match self {
            ResourceScope::All => true,
            ResourceScope::Kind(scoped) => scoped == kind,
        }
    }
}

/// Ownership predicate attached to a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// The listing's owner is the given account
    OwnedBy(i64),
    /// The target account is the given account
    IsSelf(i64),
}

impl Condition {
    /// Evaluate against a target; a bare kind never satisfies a condition
    pub fn holds_for(self, target: &Target<'_>) -> bool {
        match (self, target) {
            (Condition::OwnedBy(subject_id), Target::Listing(listing)) => {
                listing.is_owned_by(subject_id)
            }
            (Condition::IsSelf(subject_id), Target::User(user)) => user.id == subject_id,
            _ => false,
        }
    }
}

/// A single grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionRule {
    pub action: Action,
    pub scope: ResourceScope,
    pub condition: Option<Condition>,
}

impl PermissionRule {
    /// Unconditional grant
    pub fn allow(action: Action, scope: ResourceScope) -> Self {
        Self {
            action,
            scope,
            condition: None,
        }
    }

    /// Grant restricted by an ownership predicate
    pub fn allow_if(action: Action, scope: ResourceScope, condition: Condition) -> Self {
        Self {
            action,
            scope,
            condition: Some(condition),
        }
    }

    /// Whether this rule grants `action` on `target`
    pub fn permits(&self, action: Action, target: &Target<'_>) -> bool {
        if !self.action.covers(action) || !self.scope.includes(target.kind()) {
            return false;
        }
        match self.condition {
            None => true,
            Some(condition) => condition.holds_for(target),
        }
    }
}

/// What a permission check is made against
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// The resource type as a whole
    Kind(ResourceKind),
    Listing(&'a Listing),
    User(&'a User),
}

impl Target<'_> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Target::Kind(kind) => *kind,
            Target::Listing(_) => ResourceKind::Listing,
            Target::User(_) => ResourceKind::User,
        }
    }
}

impl<'a> From<&'a Listing> for Target<'a> {
    fn from(listing: &'a Listing) -> Self {
        Target::Listing(listing)
    }
}

impl<'a> From<&'a User> for Target<'a> {
    fn from(user: &'a User) -> Self {
        Target::User(user)
    }
}

impl From<ResourceKind> for Target<'_> {
    fn from(kind: ResourceKind) -> Self {
        Target::Kind(kind)
    }
}
