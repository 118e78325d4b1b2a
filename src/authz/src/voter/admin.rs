//! Administrative privilege voter

use super::{Vote, Voter};
use crate::attribute::Attribute;
use crate::types::{Resource, RoleId, RoleSet};

/// Default administrative role
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Grants anything to holders of the admin role, abstains otherwise
///
/// Never denies, so adding it to a voter list can only turn a decision
/// into a grant.
#[derive(Debug, Clone)]
pub struct AdminVoter {
    admin_role: RoleId,
}

impl AdminVoter {
    /// Voter keyed on `ROLE_ADMIN`
    pub fn new() -> Self {
        Self::with_role(ROLE_ADMIN)
    }

    /// Voter keyed on a custom role
    pub fn with_role(admin_role: impl Into<RoleId>) -> Self {
        Self {
            admin_role: admin_role.into(),
        }
    }

    pub fn admin_role(&self) -> &str {
        &self.admin_role
    }
}

impl Default for AdminVoter {
    fn default() -> Self {
        Self::new()
    }
}

impl Voter for AdminVoter {
    fn name(&self) -> &str {
        "admin"
    }

    fn vote(&self, roles: &RoleSet, _attribute: Attribute, _subject: Option<&Resource>) -> Vote {
        if roles.contains(&self.admin_role) {
            Vote::Grant
        } else {
            Vote::Abstain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::role_set;

    #[test]
    fn test_admin_grants_every_attribute() {
        let voter = AdminVoter::new();
        let roles = role_set(["ROLE_ADMIN", "ROLE_USER"]);
        let movie = Resource::new("movie:1");

        for attribute in Attribute::ALL {
            assert_eq!(voter.vote(&roles, attribute, None), Vote::Grant);
            assert_eq!(voter.vote(&roles, attribute, Some(&movie)), Vote::Grant);
        }
    }

    #[test]
    fn test_non_admin_abstains() {
        let voter = AdminVoter::new();
        let roles = role_set(["ROLE_USER"]);

        assert_eq!(voter.vote(&roles, Attribute::Admin, None), Vote::Abstain);
        assert_eq!(voter.vote(&RoleSet::new(), Attribute::Underage, None), Vote::Abstain);
    }

    #[test]
    fn test_custom_admin_role() {
        let voter = AdminVoter::with_role("ROLE_OPERATOR");

        assert_eq!(voter.admin_role(), "ROLE_OPERATOR");
        assert_eq!(
            voter.vote(&role_set(["ROLE_OPERATOR"]), Attribute::Admin, None),
            Vote::Grant
        );
        assert_eq!(
            voter.vote(&role_set(["ROLE_ADMIN"]), Attribute::Admin, None),
            Vote::Abstain
        );
    }
}
