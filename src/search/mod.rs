//! Hold search.
//!
//! Enumerates every distinct subset of the hand that could be kept,
//! evaluates each one exactly, and selects the best.

pub mod strategy;

pub use strategy::{
    gen_all_holds, rank_holds, rank_holds_with, ranking, strategy, strategy_parallel,
    strategy_with, StrategyResult,
};
