//! Session-local vote overlay for solutions
//!
//! Votes are kept as per-solution deltas next to the corpus. Reading a
//! solution through the ledger adds the deltas to a copy; the corpus record
//! itself is never touched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared_types::Solution;

/// Direction of a single vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Up,
    Down,
}

/// Votes cast on one solution during this session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteDelta {
    pub upvotes: u64,
    pub downvotes: u64,
}

#[derive(Debug, Default)]
pub struct VoteLedger {
    deltas: HashMap<String, VoteDelta>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote and return the updated delta for that solution
    pub fn cast(&mut self, solution_id: &str, vote: Vote) -> VoteDelta {
        let delta = self.deltas.entry(solution_id.to_string()).or_default();
        match vote {
            Vote::Up => delta.upvotes = delta.upvotes.saturating_add(1),
            Vote::Down => delta.downvotes = delta.downvotes.saturating_add(1),
        }
        *delta
    }

    pub fn upvote(&mut self, solution_id: &str) -> VoteDelta {
        self.cast(solution_id, Vote::Up)
    }

    pub fn downvote(&mut self, solution_id: &str) -> VoteDelta {
        self.cast(solution_id, Vote::Down)
    }

    pub fn delta(&self, solution_id: &str) -> VoteDelta {
        self.deltas.get(solution_id).copied().unwrap_or_default()
    }

    /// Copy of `solution` with this session's votes added
    pub fn apply(&self, solution: &Solution) -> Solution {
        let delta = self.delta(&solution.id);
        Solution {
            upvotes: solution.upvotes.saturating_add(delta.upvotes),
            downvotes: solution.downvotes.saturating_add(delta.downvotes),
            ..solution.clone()
        }
    }
}
