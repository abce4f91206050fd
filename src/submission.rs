//! Outcome delivery and the backend submission payload
//!
//! The simulation hands each finished run to an [`OutcomeSink`] and moves on.
//! Transport, retries, and reward claims happen elsewhere.

use std::collections::VecDeque;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::sim::Outcome;

/// Seed tag sent with every run: the zero-padded ISO date it was played on
pub fn submission_seed(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Receives finished runs. Must not call back into the simulation.
pub trait OutcomeSink {
    fn emit(&mut self, outcome: Outcome);
}

/// FIFO of outcomes waiting for an asynchronous consumer
#[derive(Debug, Clone, Default)]
pub struct OutcomeQueue {
    pending: VecDeque<Outcome>,
}

impl OutcomeQueue {
    pub fn pop(&mut self) -> Option<Outcome> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl OutcomeSink for OutcomeQueue {
    fn emit(&mut self, outcome: Outcome) {
        self.pending.push_back(outcome);
    }
}

/// Win or loss, as the backend spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunResultKind {
    Win,
    Loss,
}

/// Score submission body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub level: u32,
    pub score: u64,
    pub duration_s: i64,
    pub errors: u32,
    /// ISO date the run was played on
    pub seed: String,
    pub result: RunResultKind,
}

impl RunResult {
    pub fn from_outcome(level: u32, seed: &str, outcome: &Outcome) -> Self {
        Self {
            level,
            score: outcome.score,
            duration_s: outcome.duration_s,
            errors: outcome.errors,
            seed: if seed.is_empty() { "n/a".to_string() } else { seed.to_string() },
            result: if outcome.win {
                RunResultKind::Win
            } else {
                RunResultKind::Loss
            },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(win: bool) -> Outcome {
        Outcome {
            score: 2450,
            duration_s: 31,
            errors: 4,
            win,
        }
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = OutcomeQueue::default();
        queue.emit(outcome(true));
        queue.emit(outcome(false));
        assert_eq!(queue.len(), 2);
        assert!(queue.pop().unwrap().win);
        assert!(!queue.pop().unwrap().win);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_run_result_payload() {
        let seed = submission_seed(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let payload = RunResult::from_outcome(8, &seed, &outcome(false));
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "level": 8,
                "score": 2450,
                "duration_s": 31,
                "errors": 4,
                "seed": "2025-06-01",
                "result": "loss"
            })
        );
    }

    #[test]
    fn test_submission_seed_is_padded_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(submission_seed(date), "2025-12-31");
        let date = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
        assert_eq!(submission_seed(date), "2026-01-09");
    }

    #[test]
    fn test_missing_seed_placeholder() {
        let payload = RunResult::from_outcome(1, "", &outcome(true));
        assert_eq!(payload.seed, "n/a");
        assert_eq!(payload.result, RunResultKind::Win);
    }
}
