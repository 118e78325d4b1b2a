//! Content suitability voter
//!
//! Answers the `UNDERAGE` attribute: may this requester see this title?
//! Two pieces are configurable. [`AgeRestriction`] says which requesters
//! are age-restricted, and a [`MaturityPredicate`] says which subjects are
//! mature.

use super::{Vote, Voter};
use crate::attribute::Attribute;
use crate::types::{Resource, RoleId, RoleSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Default role flagging an age-restricted requester
pub const ROLE_UNDERAGE: &str = "ROLE_UNDERAGE";

/// Default subject attribute read by the rating rule
pub const CONTENT_AGE_ATTRIBUTE: &str = "content_age";

/// Decides whether a subject is mature content
///
/// Returns `None` when the subject carries no age-relevant value, which
/// makes the voter abstain.
pub trait MaturityPredicate: Send + Sync {
    fn is_mature(&self, subject: &Resource) -> Option<bool>;
}

impl<F> MaturityPredicate for F
where
    F: Fn(&Resource) -> Option<bool> + Send + Sync,
{
    fn is_mature(&self, subject: &Resource) -> Option<bool> {
        self(subject)
    }
}

/// Built-in maturity rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityRule {
    /// Mature when `attribute` holds one of the `restricted` ratings
    /// (compared case-insensitively)
    Rating {
        attribute: String,
        restricted: BTreeSet<String>,
    },

    /// Mature when the year in `attribute` is `restricted_from` or later
    ReleaseYear {
        attribute: String,
        restricted_from: i64,
    },
}

impl MaturityRule {
    /// Rating rule over `attribute`
    pub fn rating<I, S>(attribute: impl Into<String>, restricted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MaturityRule::Rating {
            attribute: attribute.into(),
            restricted: restricted.into_iter().map(Into::into).collect(),
        }
    }

    /// Release-year cutoff over `attribute`
    pub fn release_year(attribute: impl Into<String>, restricted_from: i64) -> Self {
        MaturityRule::ReleaseYear {
            attribute: attribute.into(),
            restricted_from,
        }
    }
}

impl Default for MaturityRule {
    fn default() -> Self {
        MaturityRule::rating(CONTENT_AGE_ATTRIBUTE, ["mature"])
    }
}

impl MaturityPredicate for MaturityRule {
    fn is_mature(&self, subject: &Resource) -> Option<bool> {
        match self {
            MaturityRule::Rating {
                attribute,
                restricted,
            } => {
                let rating = subject.attribute(attribute)?.trim();
                if rating.is_empty() {
                    return None;
                }
                Some(
                    restricted
                        .iter()
                        .any(|r| r.eq_ignore_ascii_case(rating)),
                )
            }
            MaturityRule::ReleaseYear {
                attribute,
                restricted_from,
            } => subject
                .attribute_i64(attribute)
                .map(|year| year >= *restricted_from),
        }
    }
}

/// Which requesters count as age-restricted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeRestriction {
    /// Restricted when holding this role (e.g., "ROLE_UNDERAGE")
    HasRole(RoleId),
    /// Restricted unless holding this role (e.g., "ROLE_ADULT")
    LacksRole(RoleId),
}

impl AgeRestriction {
    pub fn applies_to(&self, roles: &RoleSet) -> bool {
        match self {
            AgeRestriction::HasRole(role) => roles.contains(role),
            AgeRestriction::LacksRole(role) => !roles.contains(role),
        }
    }
}

impl Default for AgeRestriction {
    fn default() -> Self {
        AgeRestriction::HasRole(ROLE_UNDERAGE.to_string())
    }
}

/// Denies mature subjects to age-restricted requesters
///
/// Abstains on other attributes, on a missing subject, and on subjects the
/// maturity predicate cannot rate. Grants everything else.
#[derive(Clone)]
pub struct ContentSuitabilityVoter {
    restriction: AgeRestriction,
    maturity: Arc<dyn MaturityPredicate>,
}

impl ContentSuitabilityVoter {
    /// Voter with the default restriction and maturity rule
    pub fn new() -> Self {
        Self::with_policy(AgeRestriction::default(), MaturityRule::default())
    }

    /// Voter with a custom restriction and maturity predicate
    pub fn with_policy(
        restriction: AgeRestriction,
        maturity: impl MaturityPredicate + 'static,
    ) -> Self {
        Self {
            restriction,
            maturity: Arc::new(maturity),
        }
    }

    pub fn restriction(&self) -> &AgeRestriction {
        &self.restriction
    }
}

impl Default for ContentSuitabilityVoter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContentSuitabilityVoter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSuitabilityVoter")
            .field("restriction", &self.restriction)
            .finish_non_exhaustive()
    }
}

impl Voter for ContentSuitabilityVoter {
    fn name(&self) -> &str {
        "content"
    }

    fn supports(&self, attribute: Attribute) -> bool {
        attribute == Attribute::Underage
    }

    fn vote(&self, roles: &RoleSet, attribute: Attribute, subject: Option<&Resource>) -> Vote {
        if !self.supports(attribute) {
            return Vote::Abstain;
        }

        // List-level checks have no subject
        let Some(subject) = subject else {
            return Vote::Abstain;
        };

        let Some(mature) = self.maturity.is_mature(subject) else {
            return Vote::Abstain;
        };

        if mature && self.restriction.applies_to(roles) {
            Vote::Deny
        } else {
            Vote::Grant
        }
    }
}
