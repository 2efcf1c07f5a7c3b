//! Rule construction per role and permission evaluation

use tracing::debug;

use crate::domain::entities::{Role, User};
use crate::errors::DomainError;

use super::types::{Action, Condition, PermissionRule, ResourceKind, ResourceScope, Target};

const LISTING: ResourceScope = ResourceScope::Kind(ResourceKind::Listing);
const USER: ResourceScope = ResourceScope::Kind(ResourceKind::User);

/// Ordered collection of grants for one subject
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<PermissionRule>,
}

/// Build the rule set for a subject
///
/// `None` stands for a role code the system does not recognize and yields an
/// empty rule set, so every check is denied.
pub fn build_rules(subject_id: i64, role: Option<Role>) -> RuleSet {
    let rules = match role {
        Some(Role::Admin) => vec![PermissionRule::allow(Action::Manage, ResourceScope::All)],
        Some(Role::Realtor) => vec![
            PermissionRule::allow(Action::Read, LISTING),
            PermissionRule::allow(Action::Create, LISTING),
            PermissionRule::allow_if(Action::Update, LISTING, Condition::OwnedBy(subject_id)),
            PermissionRule::allow_if(Action::Delete, LISTING, Condition::OwnedBy(subject_id)),
            PermissionRule::allow_if(Action::Read, USER, Condition::IsSelf(subject_id)),
            PermissionRule::allow_if(Action::Update, USER, Condition::IsSelf(subject_id)),
        ],
        Some(Role::Client) => vec![
            PermissionRule::allow(Action::Read, LISTING),
            PermissionRule::allow_if(Action::Read, USER, Condition::IsSelf(subject_id)),
            PermissionRule::allow_if(Action::Update, USER, Condition::IsSelf(subject_id)),
        ],
        None => Vec::new(),
    };

    RuleSet { rules }
}

impl RuleSet {
    /// Rule set for a persisted account
    pub fn for_user(user: &User) -> Self {
        build_rules(user.id, Some(user.role))
    }

    /// Whether `action` on `target` is granted
    pub fn can<'a>(&self, action: Action, target: impl Into<Target<'a>>) -> bool {
        let target = target.into();
        self.rules.iter().any(|rule| rule.permits(action, &target))
    }

    /// Like [`RuleSet::can`] but fails with `DomainError::Forbidden`
    pub fn ensure<'a>(
        &self,
        action: Action,
        target: impl Into<Target<'a>>,
    ) -> Result<(), DomainError> {
        let target = target.into();
        if self.can(action, target) {
            Ok(())
        } else {
            debug!(%action, kind = %target.kind(), "permission denied");
            Err(DomainError::Forbidden)
        }
    }

    pub fn rules(&self) -> &[PermissionRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
