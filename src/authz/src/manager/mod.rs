//! Access decision manager
//!
//! Expands the requester's roles, polls every registered voter and combines
//! the votes.
//!
//! ```text
//! roles → RoleHierarchy → [Voter, Voter, ...] → CombinationStrategy → bool
//!                                                        ↓
//!                                              enforce → AccessDenied
//! ```
//!
//! The hierarchy and the voter list are fixed once the manager is built;
//! every call is a pure function of its inputs, so one manager can serve
//! concurrent requests behind an `Arc`.

pub mod decision;
pub mod strategy;

pub use decision::{AccessDecision, CastVote, VoteTally};
pub use strategy::{CombinationStrategy, StrategyConfig};

use crate::attribute::Attribute;
use crate::error::{AuthzError, Result};
use crate::hierarchy::RoleHierarchy;
use crate::types::Resource;
use crate::voter::{AdminVoter, ContentSuitabilityVoter, Vote, Voter};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Manager configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Strategy used by `decide_default` / `enforce_default`
    #[serde(default)]
    pub default_strategy: CombinationStrategy,

    /// All-abstain and tie defaults
    #[serde(flatten)]
    pub strategy: StrategyConfig,
}

/// Orchestrates role expansion, voting and vote combination
#[derive(Clone)]
pub struct AccessDecisionManager {
    /// Static role implication table
    hierarchy: Arc<RoleHierarchy>,

    /// Voters in registration order
    voters: Arc<Vec<Arc<dyn Voter>>>,

    config: ManagerConfig,
}

impl AccessDecisionManager {
    /// Create a manager over `hierarchy` with no voters yet
    pub fn new(config: ManagerConfig, hierarchy: RoleHierarchy) -> Self {
        info!(
            "AccessDecisionManager initialized with strategy={}, allow_if_all_abstain={}",
            config.default_strategy, config.strategy.allow_if_all_abstain
        );

        Self {
            hierarchy: Arc::new(hierarchy),
            voters: Arc::new(Vec::new()),
            config,
        }
    }

    /// Manager with the stock voters: admin first, then content suitability
    pub fn with_default_voters(config: ManagerConfig, hierarchy: RoleHierarchy) -> Self {
        Self::new(config, hierarchy)
            .with_voter(AdminVoter::new())
            .with_voter(ContentSuitabilityVoter::new())
    }

    /// Register a voter after the existing ones
    pub fn with_voter(mut self, voter: impl Voter + 'static) -> Self {
        self.register(Arc::new(voter));
        self
    }

    /// Register a shared voter after the existing ones
    pub fn register(&mut self, voter: Arc<dyn Voter>) {
        debug!("Registering voter '{}'", voter.name());
        Arc::make_mut(&mut self.voters).push(voter);
    }

    /// Check `attribute` on `subject` and return the full decision
    pub fn evaluate<I>(
        &self,
        roles: I,
        attribute: Attribute,
        subject: Option<&Resource>,
        strategy: CombinationStrategy,
    ) -> AccessDecision
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let reachable_roles = self.hierarchy.reachable_roles(roles);

        let votes: Vec<CastVote> = self
            .voters
            .iter()
            .map(|voter| {
                let vote = if voter.supports(attribute) {
                    voter.vote(&reachable_roles, attribute, subject)
                } else {
                    Vote::Abstain
                };
                CastVote {
                    voter: voter.name().to_string(),
                    vote,
                }
            })
            .collect();

        let sequence: Vec<Vote> = votes.iter().map(|cast| cast.vote).collect();
        let tally = VoteTally::from_votes(&sequence);
        let granted = strategy.combine_tallied(&sequence, &tally, &self.config.strategy);

        debug!(
            "Decision: {} for attribute={}, subject={}, strategy={}, grants={}, denies={}, abstains={}",
            if granted { "GRANT" } else { "DENY" },
            attribute,
            subject.map(|s| s.id.as_str()).unwrap_or("<none>"),
            strategy,
            tally.grants,
            tally.denies,
            tally.abstains
        );

        AccessDecision {
            granted,
            attribute,
            subject: subject.map(|s| s.id.clone()),
            strategy,
            tally,
            votes,
            reachable_roles,
        }
    }

    /// May a requester holding `roles` perform `attribute` on `subject`?
    pub fn decide<I>(
        &self,
        roles: I,
        attribute: Attribute,
        subject: Option<&Resource>,
        strategy: CombinationStrategy,
    ) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.evaluate(roles, attribute, subject, strategy).granted
    }

    /// [`decide`](Self::decide) with the configured default strategy
    pub fn decide_default<I>(&self, roles: I, attribute: Attribute, subject: Option<&Resource>) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.decide(roles, attribute, subject, self.config.default_strategy)
    }

    /// Deny unless granted
    ///
    /// # Errors
    ///
    /// Returns `AccessDenied` carrying the attribute and subject id when the
    /// decision is negative.
    pub fn enforce<I>(
        &self,
        roles: I,
        attribute: Attribute,
        subject: Option<&Resource>,
        strategy: CombinationStrategy,
    ) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if self.decide(roles, attribute, subject, strategy) {
            return Ok(());
        }

        let subject = subject.map(|s| s.id.clone());
        info!(
            "Access denied: attribute={}, subject={}",
            attribute,
            subject.as_deref().unwrap_or("<none>")
        );

        Err(AuthzError::AccessDenied { attribute, subject })
    }

    /// [`enforce`](Self::enforce) with the configured default strategy
    pub fn enforce_default<I>(&self, roles: I, attribute: Attribute, subject: Option<&Resource>) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.enforce(roles, attribute, subject, self.config.default_strategy)
    }

    /// Role hierarchy in use
    pub fn hierarchy(&self) -> &RoleHierarchy {
        &self.hierarchy
    }

    /// Registered voter names, in order
    pub fn voter_names(&self) -> Vec<String> {
        self.voters.iter().map(|v| v.name().to_string()).collect()
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }
}
