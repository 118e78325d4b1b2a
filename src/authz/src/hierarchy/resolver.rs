//! Role hierarchy resolver
//!
//! Expands a requester's directly assigned roles into every role they imply,
//! transitively. The implication table is fixed once the hierarchy is built,
//! so a `RoleHierarchy` can be shared across threads behind an `Arc` (or
//! cloned cheaply) without locking.
//!
//! # Example
//!
//! ```rust
//! use catalog_authz::hierarchy::{RoleHierarchyBuilder, RoleImplication};
//! use catalog_authz::types::role_set;
//!
//! # fn example() -> catalog_authz::Result<()> {
//! let hierarchy = RoleHierarchyBuilder::new()
//!     .rule(RoleImplication::new("ROLE_ADMIN", ["ROLE_EDITOR"]))?
//!     .rule(RoleImplication::new("ROLE_EDITOR", ["ROLE_USER"]))?
//!     .build()?;
//!
//! let reachable = hierarchy.reachable_roles(&role_set(["ROLE_ADMIN"]));
//! assert!(reachable.contains("ROLE_USER"));
//! # Ok(())
//! # }
//! ```

use super::graph::{GraphError, ImplicationGraph};
use super::types::RoleImplication;
use crate::error::{AuthzError, Result};
use crate::types::{RoleId, RoleSet};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, warn};

/// Builder for [`RoleHierarchy`]
///
/// Rules for the same role are merged in the order they are added.
#[derive(Debug, Clone, Default)]
pub struct RoleHierarchyBuilder {
    rules: BTreeMap<RoleId, Vec<RoleId>>,
    strict: bool,
}

impl RoleHierarchyBuilder {
    /// Create a new, lenient builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject cyclic implications at build time instead of only logging them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Add an implication rule
    ///
    /// # Errors
    ///
    /// Returns `InvalidPolicy` if the rule has empty or padded role names.
    pub fn rule(mut self, rule: RoleImplication) -> Result<Self> {
        self.add_rule(rule)?;
        Ok(self)
    }

    /// Add an implication rule in place
    pub fn add_rule(&mut self, rule: RoleImplication) -> Result<()> {
        rule.validate()
            .map_err(|e| AuthzError::InvalidPolicy(e.to_string()))?;

        let implied = self.rules.entry(rule.role).or_default();
        for role in rule.implies {
            if !implied.contains(&role) {
                implied.push(role);
            }
        }

        Ok(())
    }

    /// Add every entry of an implication table
    pub fn add_rules<I, R, V, S>(&mut self, rules: I) -> Result<()>
    where
        I: IntoIterator<Item = (R, V)>,
        R: Into<RoleId>,
        V: IntoIterator<Item = S>,
        S: Into<RoleId>,
    {
        for (role, implies) in rules {
            self.add_rule(RoleImplication::new(role, implies))?;
        }
        Ok(())
    }

    /// Build the hierarchy
    ///
    /// # Errors
    ///
    /// In strict mode, returns `InvalidPolicy` naming the first cycle found.
    pub fn build(self) -> Result<RoleHierarchy> {
        let graph = ImplicationGraph::from_rules(&self.rules);

        if self.strict {
            graph.ensure_acyclic().map_err(|e| match e {
                GraphError::CircularImplication(msg) => {
                    AuthzError::InvalidPolicy(format!("Circular role implication: {}", msg))
                }
            })?;
        } else if let Some(cycle) = graph.find_cycle() {
            warn!("Role hierarchy contains a cycle: {}", cycle.join(" -> "));
        }

        debug!("Role hierarchy built with {} rules", self.rules.len());

        Ok(RoleHierarchy {
            rules: Arc::new(self.rules),
        })
    }
}

/// Static role implication table with transitive expansion
#[derive(Debug, Clone, Default)]
pub struct RoleHierarchy {
    rules: Arc<BTreeMap<RoleId, Vec<RoleId>>>,
}

impl RoleHierarchy {
    /// Hierarchy with no implications; every role reaches only itself
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a lenient hierarchy from an implication table
    pub fn from_rules<I, R, V, S>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (R, V)>,
        R: Into<RoleId>,
        V: IntoIterator<Item = S>,
        S: Into<RoleId>,
    {
        let mut builder = RoleHierarchyBuilder::new();
        builder.add_rules(rules)?;
        builder.build()
    }

    /// Every role reachable from `assigned`, including `assigned` itself
    ///
    /// Worklist traversal with a visited set: each role is expanded at most
    /// once, so cycles and diamonds terminate without duplicates. Unknown
    /// roles contribute only themselves. Output is sorted.
    pub fn reachable_roles<I>(&self, assigned: I) -> RoleSet
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut reachable = RoleSet::new();
        let mut worklist: VecDeque<RoleId> = VecDeque::new();

        for role in assigned {
            let role = role.as_ref();
            if reachable.insert(role.to_string()) {
                worklist.push_back(role.to_string());
            }
        }

        while let Some(role) = worklist.pop_front() {
            for implied in self.implied_by(&role) {
                if reachable.insert(implied.clone()) {
                    worklist.push_back(implied.clone());
                }
            }
        }

        reachable
    }

    /// Whether `role` is reachable from `assigned`
    pub fn is_granted<I>(&self, assigned: I, role: &str) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.reachable_roles(assigned).contains(role)
    }

    /// Roles directly implied by `role`, in configuration order
    pub fn implied_by(&self, role: &str) -> &[RoleId] {
        self.rules.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of roles carrying implication rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The implication table
    pub fn rules(&self) -> &BTreeMap<RoleId, Vec<RoleId>> {
        &self.rules
    }
}
