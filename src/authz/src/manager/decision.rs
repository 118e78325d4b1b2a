//! Decision diagnostics

use super::strategy::CombinationStrategy;
use crate::attribute::Attribute;
use crate::types::RoleSet;
use crate::voter::Vote;
use serde::{Deserialize, Serialize};

/// Vote counts for one decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub grants: usize,
    pub denies: usize,
    pub abstains: usize,
}

impl VoteTally {
    /// Count a vote sequence
    pub fn from_votes(votes: &[Vote]) -> Self {
        votes.iter().fold(Self::default(), |mut tally, vote| {
            match vote {
                Vote::Grant => tally.grants += 1,
                Vote::Deny => tally.denies += 1,
                Vote::Abstain => tally.abstains += 1,
            }
            tally
        })
    }

    /// No voter had an opinion (also true for an empty sequence)
    pub fn all_abstained(&self) -> bool {
        self.grants == 0 && self.denies == 0
    }

    pub fn total(&self) -> usize {
        self.grants + self.denies + self.abstains
    }
}

/// One voter's contribution to a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastVote {
    /// Voter name
    pub voter: String,
    pub vote: Vote,
}

/// Outcome of one access check, with diagnostics for logs
///
/// Intended for operators. Callers facing end users should expose only
/// `granted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether access is granted
    pub granted: bool,

    /// Attribute checked
    pub attribute: Attribute,

    /// Subject id, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Strategy applied
    pub strategy: CombinationStrategy,

    /// Vote counts
    pub tally: VoteTally,

    /// Votes in registration order
    pub votes: Vec<CastVote>,

    /// Requester roles after hierarchy expansion
    pub reachable_roles: RoleSet,
}

impl AccessDecision {
    /// Votes as a plain sequence
    pub fn vote_sequence(&self) -> Vec<Vote> {
        self.votes.iter().map(|cast| cast.vote).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally() {
        let tally = VoteTally::from_votes(&[Vote::Grant, Vote::Abstain, Vote::Deny, Vote::Grant]);

        assert_eq!(tally.grants, 2);
        assert_eq!(tally.denies, 1);
        assert_eq!(tally.abstains, 1);
        assert_eq!(tally.total(), 4);
        assert!(!tally.all_abstained());
    }

    #[test]
    fn test_empty_tally_is_all_abstain() {
        let tally = VoteTally::from_votes(&[]);
        assert!(tally.all_abstained());
        assert_eq!(tally.total(), 0);
    }

    #[test]
    fn test_decision_serializes_without_empty_subject() {
        let decision = AccessDecision {
            granted: false,
            attribute: Attribute::Underage,
            subject: None,
            strategy: CombinationStrategy::Affirmative,
            tally: VoteTally::from_votes(&[Vote::Abstain]),
            votes: vec![CastVote {
                voter: "content".to_string(),
                vote: Vote::Abstain,
            }],
            reachable_roles: RoleSet::new(),
        };

        let json = serde_json::to_value(&decision).unwrap();
        assert!(json.get("subject").is_none());
        assert_eq!(json["attribute"], "UNDERAGE");
        assert_eq!(json["votes"][0]["vote"], "abstain");
        assert_eq!(decision.vote_sequence(), vec![Vote::Abstain]);
    }
}
