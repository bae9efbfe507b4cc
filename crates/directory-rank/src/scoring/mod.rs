//! Explainable 0..=100 scorers built from weighted reasons.

pub mod lead;
pub mod quiz;

use serde::{Deserialize, Serialize};

pub const BASE_SCORE: i32 = 50;
pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

/// Discrete contribution to a score, kept for transparency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReason {
    pub code: String,
    pub message: String,
    pub weight: i32,
}

impl ScoreReason {
    pub fn new(code: &str, message: impl Into<String>, weight: i32) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            weight,
        }
    }
}

/// Bounded score plus the reasons that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub reasons: Vec<ScoreReason>,
}

impl ScoreResult {
    pub fn reason_codes(&self) -> Vec<&str> {
        self.reasons.iter().map(|reason| reason.code.as_str()).collect()
    }

    pub fn has_reason(&self, code: &str) -> bool {
        self.reasons.iter().any(|reason| reason.code == code)
    }
}

/// Accumulates reasons on top of [`BASE_SCORE`].
#[derive(Debug, Default)]
pub(crate) struct ReasonLedger {
    reasons: Vec<ScoreReason>,
}

impl ReasonLedger {
    pub(crate) fn award(&mut self, code: &str, message: impl Into<String>, weight: i32) {
        self.reasons.push(ScoreReason::new(code, message, weight));
    }

    pub(crate) fn raw_total(&self) -> i32 {
        BASE_SCORE + self.reasons.iter().map(|reason| reason.weight).sum::<i32>()
    }

    /// Reasons in evaluation order.
    pub(crate) fn finish(self) -> ScoreResult {
        ScoreResult {
            score: clamp_score(self.raw_total()),
            reasons: self.reasons,
        }
    }

    /// Reasons ordered by weight, heaviest first; equal weights keep evaluation order.
    pub(crate) fn finish_by_weight(self) -> ScoreResult {
        let mut result = self.finish();
        result.reasons.sort_by(|a, b| b.weight.cmp(&a.weight));
        result
    }
}

pub(crate) fn clamp_score(raw: i32) -> u8 {
    raw.clamp(MIN_SCORE, MAX_SCORE) as u8
}
