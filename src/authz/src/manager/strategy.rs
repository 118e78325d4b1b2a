//! Vote combination strategies

use super::decision::VoteTally;
use crate::error::AuthzError;
use crate::voter::Vote;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule for reducing a vote sequence to one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinationStrategy {
    /// Grant if any voter grants
    #[default]
    Affirmative,
    /// Grant if at least one voter grants and none deny
    Unanimous,
    /// Grant if grants strictly outnumber denies; ties use the configured default
    Consensus,
    /// The first voter with an opinion, in registration order, decides
    Priority,
}

/// Defaults applied when votes do not settle the outcome
///
/// Both default to deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Outcome when every voter abstains, for any strategy
    #[serde(default)]
    pub allow_if_all_abstain: bool,

    /// Outcome of a consensus tie
    #[serde(default)]
    pub allow_if_equal_granted_denied: bool,
}

impl CombinationStrategy {
    /// All strategies, in declaration order
    pub const ALL: [CombinationStrategy; 4] = [
        CombinationStrategy::Affirmative,
        CombinationStrategy::Unanimous,
        CombinationStrategy::Consensus,
        CombinationStrategy::Priority,
    ];

    /// Combine `votes` (in voter registration order) into a decision
    pub fn combine(&self, votes: &[Vote], config: &StrategyConfig) -> bool {
        self.combine_tallied(votes, &VoteTally::from_votes(votes), config)
    }

    /// [`combine`](Self::combine) with `tally` already counted from `votes`
    pub fn combine_tallied(&self, votes: &[Vote], tally: &VoteTally, config: &StrategyConfig) -> bool {
        if tally.all_abstained() {
            return config.allow_if_all_abstain;
        }

        match self {
            CombinationStrategy::Affirmative => tally.grants > 0,
            CombinationStrategy::Unanimous => tally.denies == 0 && tally.grants > 0,
            CombinationStrategy::Consensus => {
                if tally.grants == tally.denies {
                    config.allow_if_equal_granted_denied
                } else {
                    tally.grants > tally.denies
                }
            }
            CombinationStrategy::Priority => votes
                .iter()
                .find(|vote| !vote.is_abstain())
                .is_some_and(Vote::is_grant),
        }
    }
}

impl fmt::Display for CombinationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CombinationStrategy::Affirmative => "affirmative",
            CombinationStrategy::Unanimous => "unanimous",
            CombinationStrategy::Consensus => "consensus",
            CombinationStrategy::Priority => "priority",
        };
        f.write_str(name)
    }
}

impl FromStr for CombinationStrategy {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CombinationStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AuthzError::InvalidInput(format!("Unknown combination strategy: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Vote::{Abstain, Deny, Grant};

    const ALL: [CombinationStrategy; 4] = CombinationStrategy::ALL;

    #[test]
    fn test_all_abstain_fails_closed() {
        let config = StrategyConfig::default();
        for strategy in ALL {
            assert!(!strategy.combine(&[Abstain, Abstain], &config), "{}", strategy);
            assert!(!strategy.combine(&[], &config), "{}", strategy);
        }
    }

    #[test]
    fn test_all_abstain_can_be_allowed() {
        let config = StrategyConfig {
            allow_if_all_abstain: true,
            ..Default::default()
        };
        for strategy in ALL {
            assert!(strategy.combine(&[Abstain], &config), "{}", strategy);
        }
    }

    #[test]
    fn test_affirmative() {
        let config = StrategyConfig::default();
        let strategy = CombinationStrategy::Affirmative;

        assert!(strategy.combine(&[Deny, Grant], &config));
        assert!(strategy.combine(&[Abstain, Grant], &config));
        assert!(!strategy.combine(&[Deny, Abstain], &config));
    }

    #[test]
    fn test_unanimous() {
        let config = StrategyConfig::default();
        let strategy = CombinationStrategy::Unanimous;

        assert!(strategy.combine(&[Grant, Abstain, Grant], &config));
        assert!(!strategy.combine(&[Grant, Deny], &config));
        assert!(!strategy.combine(&[Deny], &config));
    }

    #[test]
    fn test_consensus() {
        let config = StrategyConfig::default();
        let strategy = CombinationStrategy::Consensus;

        assert!(strategy.combine(&[Grant, Grant, Deny], &config));
        assert!(!strategy.combine(&[Grant, Deny, Deny], &config));

        // Tie
        assert!(!strategy.combine(&[Grant, Deny, Abstain], &config));
        let lenient = StrategyConfig {
            allow_if_equal_granted_denied: true,
            ..Default::default()
        };
        assert!(strategy.combine(&[Grant, Deny, Abstain], &lenient));
    }

    #[test]
    fn test_priority() {
        let config = StrategyConfig::default();
        let strategy = CombinationStrategy::Priority;

        assert!(strategy.combine(&[Abstain, Grant, Deny], &config));
        assert!(!strategy.combine(&[Abstain, Deny, Grant, Grant], &config));
    }

    #[test]
    fn test_strategy_serde() {
        let parsed: CombinationStrategy = serde_json::from_str("\"consensus\"").unwrap();
        assert_eq!(parsed, CombinationStrategy::Consensus);
        assert_eq!(CombinationStrategy::default(), CombinationStrategy::Affirmative);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("unanimous".parse::<CombinationStrategy>().unwrap(), CombinationStrategy::Unanimous);
        assert_eq!(" Priority ".parse::<CombinationStrategy>().unwrap(), CombinationStrategy::Priority);
        for strategy in ALL {
            assert_eq!(strategy.to_string().parse::<CombinationStrategy>().unwrap(), strategy);
        }

        assert!(matches!(
            "majority".parse::<CombinationStrategy>(),
            Err(AuthzError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_combine_tallied_matches_combine() {
        let config = StrategyConfig::default();
        let votes = [Abstain, Grant, Deny, Deny];
        let tally = VoteTally::from_votes(&votes);

        for strategy in ALL {
            assert_eq!(
                strategy.combine_tallied(&votes, &tally, &config),
                strategy.combine(&votes, &config),
                "{}",
                strategy
            );
        }
    }
}
