//! Access control configuration
//!
//! Everything is validated in [`AccessControlConfig::build`]; a manager that
//! was built never reports configuration errors at decision time.
//!
//! ```json
//! {
//!   "role_hierarchy": { "ROLE_ADMIN": ["ROLE_USER"] },
//!   "default_strategy": "affirmative",
//!   "allow_if_all_abstain": false,
//!   "voters": [
//!     { "type": "admin", "admin_role": "ROLE_ADMIN" },
//!     {
//!       "type": "content",
//!       "restriction": { "has_role": "ROLE_UNDERAGE" },
//!       "maturity": { "rating": { "attribute": "content_age", "restricted": ["mature"] } }
//!     }
//!   ]
//! }
//! ```

use crate::error::{AuthzError, Result};
use crate::hierarchy::RoleHierarchyBuilder;
use crate::manager::{AccessDecisionManager, CombinationStrategy, ManagerConfig, StrategyConfig};
use crate::types::RoleId;
use crate::voter::admin::ROLE_ADMIN;
use crate::voter::{AdminVoter, AgeRestriction, ContentSuitabilityVoter, MaturityRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// One entry of the ordered voter list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoterConfig {
    /// [`AdminVoter`]
    Admin {
        #[serde(default = "default_admin_role")]
        admin_role: RoleId,
    },

    /// [`ContentSuitabilityVoter`]
    Content {
        #[serde(default)]
        restriction: AgeRestriction,
        #[serde(default)]
        maturity: MaturityRule,
    },
}

fn default_admin_role() -> RoleId {
    ROLE_ADMIN.to_string()
}

impl VoterConfig {
    fn validate(&self) -> Result<()> {
        match self {
            VoterConfig::Admin { admin_role } => {
                if admin_role.trim().is_empty() {
                    return Err(AuthzError::InvalidPolicy(
                        "Admin voter role cannot be empty".to_string(),
                    ));
                }
            }
            VoterConfig::Content {
                restriction,
                maturity,
            } => {
                let (AgeRestriction::HasRole(role) | AgeRestriction::LacksRole(role)) = restriction;
                if role.trim().is_empty() {
                    return Err(AuthzError::InvalidPolicy(
                        "Content voter restriction role cannot be empty".to_string(),
                    ));
                }

                match maturity {
                    MaturityRule::Rating {
                        attribute,
                        restricted,
                    } => {
                        if attribute.trim().is_empty() {
                            return Err(AuthzError::InvalidPolicy(
                                "Rating rule attribute cannot be empty".to_string(),
                            ));
                        }
                        if restricted.is_empty() {
                            return Err(AuthzError::InvalidPolicy(format!(
                                "Rating rule on '{}' restricts no ratings",
                                attribute
                            )));
                        }
                        for rating in restricted {
                            if rating.trim().is_empty() || rating.trim() != rating {
                                return Err(AuthzError::InvalidPolicy(format!(
                                    "Rating rule on '{}' has a blank or padded rating '{}'",
                                    attribute, rating
                                )));
                            }
                        }
                    }
                    MaturityRule::ReleaseYear { attribute, .. } => {
                        if attribute.trim().is_empty() {
                            return Err(AuthzError::InvalidPolicy(
                                "Release year rule attribute cannot be empty".to_string(),
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Full configuration surface of the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessControlConfig {
    /// Role -> implied roles
    pub role_hierarchy: BTreeMap<RoleId, Vec<RoleId>>,

    /// Reject cyclic implications instead of logging them
    pub strict_hierarchy: bool,

    /// Strategy for `decide_default` / `enforce_default`
    pub default_strategy: CombinationStrategy,

    /// Outcome when every voter abstains
    pub allow_if_all_abstain: bool,

    /// Outcome of a consensus tie
    pub allow_if_equal_granted_denied: bool,

    /// Voters, in polling order
    pub voters: Vec<VoterConfig>,
}

impl Default for AccessControlConfig {
    fn default() -> Self {
        let mut role_hierarchy = BTreeMap::new();
        role_hierarchy.insert(ROLE_ADMIN.to_string(), vec!["ROLE_USER".to_string()]);

        Self {
            role_hierarchy,
            strict_hierarchy: false,
            default_strategy: CombinationStrategy::Affirmative,
            allow_if_all_abstain: false,
            allow_if_equal_granted_denied: false,
            voters: vec![
                VoterConfig::Admin {
                    admin_role: default_admin_role(),
                },
                VoterConfig::Content {
                    restriction: AgeRestriction::default(),
                    maturity: MaturityRule::default(),
                },
            ],
        }
    }
}

impl AccessControlConfig {
    /// Parse a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!("Loaded access control config from {}", path.display());
        Ok(config)
    }

    /// Manager settings carried by this configuration
    pub fn manager_config(&self) -> ManagerConfig {
        ManagerConfig {
            default_strategy: self.default_strategy,
            strategy: StrategyConfig {
                allow_if_all_abstain: self.allow_if_all_abstain,
                allow_if_equal_granted_denied: self.allow_if_equal_granted_denied,
            },
        }
    }

    /// Validate and build a ready-to-share manager
    ///
    /// # Errors
    ///
    /// Returns `InvalidPolicy` for malformed hierarchy rules, cycles in
    /// strict mode, or malformed voter entries.
    pub fn build(&self) -> Result<AccessDecisionManager> {
        let mut builder = RoleHierarchyBuilder::new().strict(self.strict_hierarchy);
        builder.add_rules(self.role_hierarchy.clone())?;
        let hierarchy = builder.build()?;

        for voter in &self.voters {
            voter.validate()?;
        }

        if self.voters.is_empty() {
            warn!("No voters configured; every check falls back to the all-abstain default");
        }

        let mut manager = AccessDecisionManager::new(self.manager_config(), hierarchy);
        for voter in &self.voters {
            manager = match voter {
                VoterConfig::Admin { admin_role } => {
                    manager.with_voter(AdminVoter::with_role(admin_role.clone()))
                }
                VoterConfig::Content {
                    restriction,
                    maturity,
                } => manager.with_voter(ContentSuitabilityVoter::with_policy(
                    restriction.clone(),
                    maturity.clone(),
                )),
            };
        }

        Ok(manager)
    }
}
