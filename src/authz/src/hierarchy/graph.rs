//! Implication graph analysis
//!
//! Expansion never needs this to terminate. It exists so that cycles can be
//! reported (or rejected in strict mode) once, when the hierarchy is built.

use crate::types::RoleId;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Graph-related errors
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// Implication chain leads back to its start
    #[error("Circular implication detected: {0}")]
    CircularImplication(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    /// On the current DFS path
    Visiting,
    /// Fully explored
    Done,
}

/// Directed graph of role implications (role -> implied role)
#[derive(Debug, Clone, Default)]
pub struct ImplicationGraph {
    edges: BTreeMap<RoleId, Vec<RoleId>>,
}

impl ImplicationGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an implication table
    pub fn from_rules(rules: &BTreeMap<RoleId, Vec<RoleId>>) -> Self {
        Self {
            edges: rules.clone(),
        }
    }

    /// Add a single implication edge
    pub fn add_edge(&mut self, from: impl Into<RoleId>, to: impl Into<RoleId>) {
        let to = to.into();
        let targets = self.edges.entry(from.into()).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    fn children(&self, role: &str) -> &[RoleId] {
        self.edges.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Find the first cycle, in role order
    ///
    /// Depth-first search with an explicit stack, so deep chains cannot
    /// overflow. Returns the cycle path with its start repeated at the end,
    /// e.g. `["A", "B", "A"]`.
    pub fn find_cycle(&self) -> Option<Vec<RoleId>> {
        let mut state: HashMap<&str, VisitState> = HashMap::new();

        for start in self.edges.keys() {
            if state.contains_key(start.as_str()) {
                continue;
            }

            // (role, index of the next child to visit)
            let mut stack: Vec<(&str, usize)> = vec![(start.as_str(), 0)];
            state.insert(start.as_str(), VisitState::Visiting);

            while let Some(frame) = stack.last_mut() {
                let role = frame.0;
                let children = self.children(role);

                if frame.1 >= children.len() {
                    state.insert(role, VisitState::Done);
                    stack.pop();
                    continue;
                }

                let child = children[frame.1].as_str();
                frame.1 += 1;

                match state.get(child) {
                    Some(VisitState::Visiting) => {
                        let begin = stack.iter().position(|(r, _)| *r == child).unwrap_or(0);
                        let mut cycle: Vec<RoleId> =
                            stack[begin..].iter().map(|(r, _)| r.to_string()).collect();
                        cycle.push(child.to_string());
                        return Some(cycle);
                    }
                    Some(VisitState::Done) => {}
                    None => {
                        state.insert(child, VisitState::Visiting);
                        stack.push((child, 0));
                    }
                }
            }
        }

        None
    }

    /// Fail with `CircularImplication` if the graph has a cycle
    pub fn ensure_acyclic(&self) -> Result<(), GraphError> {
        match self.find_cycle() {
            Some(cycle) => Err(GraphError::CircularImplication(cycle.join(" -> "))),
            None => Ok(()),
        }
    }
}
