//! Hand scoring and expected-value evaluation.
//!
//! Scores a complete hand under the upper-section rule and averages that
//! score over every outcome of re-rolling the free dice.

pub mod expected;
pub(crate) mod score;

pub use expected::{expected_value, CacheStats, Evaluator};
pub use score::{face_counts, score};
