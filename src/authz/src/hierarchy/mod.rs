//! Role hierarchy module
//!
//! Static role implication rules and their transitive expansion.
//!
//! # Features
//!
//! - **Transitive closure**: worklist traversal over the implication table
//! - **Cycle tolerance**: cycles and self references terminate without duplicates
//! - **Strict mode**: optionally reject cyclic configurations at build time
//! - **Deterministic output**: reachable roles come back as an ordered set
//!
//! # Example
//!
//! ```rust
//! use catalog_authz::hierarchy::RoleHierarchy;
//!
//! # fn example() -> catalog_authz::Result<()> {
//! let hierarchy = RoleHierarchy::from_rules([
//!     ("ROLE_ADMIN", vec!["ROLE_USER"]),
//!     ("ROLE_SUPER_ADMIN", vec!["ROLE_ADMIN"]),
//! ])?;
//!
//! let reachable = hierarchy.reachable_roles(["ROLE_SUPER_ADMIN"]);
//! assert_eq!(reachable.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod graph;
pub mod types;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use graph::{GraphError, ImplicationGraph};
pub use types::RoleImplication;
pub use resolver::{RoleHierarchy, RoleHierarchyBuilder};
