//! Role implication rule definitions

use crate::error::{AuthzError, Result};
use crate::types::RoleId;
use serde::{Deserialize, Serialize};

/// One implication rule: holding `role` also grants every role in `implies`
///
/// Self references and cycles are legal here; expansion tolerates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleImplication {
    /// Role carrying the implication (e.g., "ROLE_ADMIN")
    pub role: RoleId,

    /// Roles implied, in configuration order
    #[serde(default)]
    pub implies: Vec<RoleId>,
}

impl RoleImplication {
    /// Create a new implication rule
    pub fn new<I, S>(role: impl Into<RoleId>, implies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<RoleId>,
    {
        Self {
            role: role.into(),
            implies: implies.into_iter().map(Into::into).collect(),
        }
    }

    /// Validate the rule definition
    pub fn validate(&self) -> Result<()> {
        if self.role.trim().is_empty() {
            return Err(AuthzError::InvalidInput(
                "Role name cannot be empty".to_string(),
            ));
        }

        if self.role.trim() != self.role {
            return Err(AuthzError::InvalidInput(format!(
                "Role '{}' has surrounding whitespace",
                self.role
            )));
        }

        for implied in &self.implies {
            if implied.trim().is_empty() {
                return Err(AuthzError::InvalidInput(format!(
                    "Role '{}' implies an empty role name",
                    self.role
                )));
            }

            if implied.trim() != implied {
                return Err(AuthzError::InvalidInput(format!(
                    "Role '{}' implies '{}' with surrounding whitespace",
                    self.role, implied
                )));
            }
        }

        Ok(())
    }

    /// Whether the rule lists its own role among the implied ones
    pub fn is_self_referential(&self) -> bool {
        self.implies.iter().any(|implied| implied == &self.role)
    }
}
