//! Voters
//!
//! A voter looks at one attribute for one subject and one requester and
//! answers grant, deny or abstain. Voters are pure: no I/O, no writes, and
//! no errors. Anything a voter does not understand gets an abstention.

pub mod admin;
pub mod content;

pub use admin::AdminVoter;
pub use content::{AgeRestriction, ContentSuitabilityVoter, MaturityPredicate, MaturityRule};

use crate::attribute::Attribute;
use crate::types::{Resource, RoleSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One voter's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    /// Access granted
    Grant,
    /// Access denied
    Deny,
    /// No opinion
    Abstain,
}

impl Vote {
    pub fn is_grant(&self) -> bool {
        matches!(self, Vote::Grant)
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Vote::Deny)
    }

    pub fn is_abstain(&self) -> bool {
        matches!(self, Vote::Abstain)
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Grant => f.write_str("grant"),
            Vote::Deny => f.write_str("deny"),
            Vote::Abstain => f.write_str("abstain"),
        }
    }
}

/// Single-purpose policy check
pub trait Voter: Send + Sync {
    /// Short name used in decision diagnostics
    fn name(&self) -> &str;

    /// Whether this voter has anything to say about `attribute`
    ///
    /// The manager records an abstention for unsupported attributes without
    /// calling [`Voter::vote`].
    fn supports(&self, attribute: Attribute) -> bool {
        let _ = attribute;
        true
    }

    /// Vote on `attribute` for `subject`
    ///
    /// `roles` is the requester's hierarchy-expanded role set. `subject` is
    /// `None` for list-level checks.
    fn vote(&self, roles: &RoleSet, attribute: Attribute, subject: Option<&Resource>) -> Vote;
}
