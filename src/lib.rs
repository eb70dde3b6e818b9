//! Holdplanner library.
//!
//! Finds the set of dice to keep that maximizes the expected upper-section
//! score after one re-roll, by exhaustive enumeration. Exposes the
//! enumerators, scorer, evaluator and search for tests, benches and the
//! binary entry point.

pub mod dice;
pub mod enumerate;
pub mod eval;
pub mod planner;
pub mod search;

pub use dice::{Face, Hand, HandError, Hold};
pub use planner::{PlanError, Planner, PlannerConfig};
pub use search::{strategy, StrategyResult};
