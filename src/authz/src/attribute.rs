//! Checkable attributes
//!
//! The set is closed: a new permission means a new variant here and a voter
//! that understands it, registered when the manager is built.

use crate::error::AuthzError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named permission being checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Attribute {
    /// Administrative access
    Admin,
    /// Content suitability for the requester's age group
    Underage,
}

impl Attribute {
    /// All known attributes
    pub const ALL: [Attribute; 2] = [Attribute::Admin, Attribute::Underage];

    /// Tag used in configuration and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Admin => "ADMIN",
            Attribute::Underage => "UNDERAGE",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|attribute| attribute.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AuthzError::UnknownAttribute(s.to_string()))
    }
}
