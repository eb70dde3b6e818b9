//! Exhaustive search over holds.
//!
//! Holds are generated from combinations of dice positions rather than face
//! values, so repeated faces in the hand are still separate dice. Each
//! position set is mapped to its canonical (sorted) faces and collected into
//! a set, which collapses holds that differ only in which equal die was kept.
//!
//! Selection uses [`ranking`]: higher expected score first, then fewer dice
//! held, then the lexicographically smallest hold. Because that is a total
//! order the sequential and parallel searches always agree.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use rayon::prelude::*;
use rayon::ThreadPool;
use serde::Serialize;
use tracing::debug;

use crate::dice::{Hand, Hold};
use crate::enumerate::combinations;
use crate::eval::Evaluator;

/// A hold and the exact expected score of keeping it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyResult {
    pub expected_score: f64,
    pub hold: Hold,
}

/// Orders results best-first.
pub fn ranking(a: &StrategyResult, b: &StrategyResult) -> Ordering {
    b.expected_score
        .total_cmp(&a.expected_score)
        .then_with(|| a.hold.len().cmp(&b.hold.len()))
        .then_with(|| a.hold.cmp(&b.hold))
}

fn prefer(a: StrategyResult, b: StrategyResult) -> StrategyResult {
    if ranking(&b, &a) == Ordering::Less {
        b
    } else {
        a
    }
}

/// Every distinct hold obtainable from `hand`, from keeping nothing to
/// keeping every die.
pub fn gen_all_holds(hand: &Hand) -> BTreeSet<Hold> {
    let positions: Vec<usize> = (0..hand.len()).collect();
    let mut holds = BTreeSet::new();
    for num_held in 0..=hand.len() {
        for indices in combinations(&positions, num_held) {
            holds.insert(hand.hold_at(&indices));
        }
    }
    holds
}

fn evaluate_hold(hand: &Hand, evaluator: &Evaluator, hold: Hold) -> StrategyResult {
    let expected_score = evaluator.evaluate(&hold, hand.free_dice(&hold));
    StrategyResult {
        expected_score,
        hold,
    }
}

fn no_hold() -> StrategyResult {
    StrategyResult {
        expected_score: 0.0,
        hold: Hold::new(),
    }
}

/// Best hold for `hand`, evaluated without caching.
pub fn strategy(hand: &Hand) -> StrategyResult {
    strategy_with(hand, &Evaluator::new(hand.num_sides()))
}

/// Best hold for `hand`, evaluated through `evaluator` on the current thread.
pub fn strategy_with(hand: &Hand, evaluator: &Evaluator) -> StrategyResult {
    debug_assert_eq!(hand.num_sides(), evaluator.num_sides());
    let holds = gen_all_holds(hand);
    let candidates = holds.len();

    let best = holds
        .into_iter()
        .map(|hold| evaluate_hold(hand, evaluator, hold))
        .fold(no_hold(), prefer);

    debug!(
        hand = %hand,
        candidates,
        best_hold = ?best.hold,
        expected_score = best.expected_score,
        "sequential hold search finished"
    );
    best
}

/// Best hold for `hand`, fanning the candidate holds out across `pool`.
pub fn strategy_parallel(hand: &Hand, evaluator: &Evaluator, pool: &ThreadPool) -> StrategyResult {
    debug_assert_eq!(hand.num_sides(), evaluator.num_sides());
    let holds: Vec<Hold> = gen_all_holds(hand).into_iter().collect();
    let candidates = holds.len();

    let best = pool.install(|| {
        holds
            .into_par_iter()
            .map(|hold| evaluate_hold(hand, evaluator, hold))
            .reduce(no_hold, prefer)
    });

    debug!(
        hand = %hand,
        candidates,
        threads = pool.current_num_threads(),
        best_hold = ?best.hold,
        expected_score = best.expected_score,
        "parallel hold search finished"
    );
    best
}

/// Every distinct hold with its expected score, best first.
pub fn rank_holds(hand: &Hand) -> Vec<StrategyResult> {
    rank_holds_with(hand, &Evaluator::new(hand.num_sides()))
}

/// Like [`rank_holds`], evaluating through `evaluator`.
pub fn rank_holds_with(hand: &Hand, evaluator: &Evaluator) -> Vec<StrategyResult> {
    let mut ranked: Vec<StrategyResult> = gen_all_holds(hand)
        .into_iter()
        .map(|hold| evaluate_hold(hand, evaluator, hold))
        .collect();
    ranked.sort_by(ranking);
    ranked
}
