//! # Catalog Access Decision Engine
//!
//! Decides whether a requester may perform an action on a catalogue entry
//! (a movie, a book, ...), given the roles an identity subsystem assigned
//! to them.
//!
//! ## Features
//!
//! - **Role hierarchy** with transitive, cycle-safe expansion
//! - **Voters** casting grant / deny / abstain per attribute
//! - **Combination strategies**: affirmative, unanimous, consensus, priority
//! - **Fail-closed** default when every voter abstains
//! - **JSON configuration** validated once at startup
//!
//! ## Example
//!
//! ```rust
//! use catalog_authz::{AccessControlConfig, Attribute, Resource};
//!
//! # fn main() -> catalog_authz::Result<()> {
//! let manager = AccessControlConfig::default().build()?;
//!
//! let movie = Resource::new("movie:42").with_attribute("content_age", "mature");
//!
//! assert!(manager.decide_default(["ROLE_USER"], Attribute::Underage, Some(&movie)));
//! assert!(manager
//!     .enforce_default(["ROLE_UNDERAGE"], Attribute::Underage, Some(&movie))
//!     .is_err());
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod manager;
pub mod types;
pub mod voter;

// Re-export commonly used types
pub use attribute::Attribute;
pub use config::{AccessControlConfig, VoterConfig};
pub use error::{AuthzError, Result};
pub use hierarchy::{RoleHierarchy, RoleHierarchyBuilder, RoleImplication};
pub use manager::{
    AccessDecision, AccessDecisionManager, CombinationStrategy, ManagerConfig, StrategyConfig,
};
pub use types::{Resource, RoleId, RoleSet};
pub use voter::{AdminVoter, ContentSuitabilityVoter, Vote, Voter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
