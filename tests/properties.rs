//! Property-based tests for enumeration, scoring and the hold search.

use proptest::prelude::*;

use holdplanner::enumerate::{combinations, permutations, sequences};
use holdplanner::eval::{expected_value, score};
use holdplanner::search::{gen_all_holds, rank_holds, strategy};
use holdplanner::Hand;

/// Strategy: a small alphabet of distinct symbols.
fn alphabet_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(1..=9u32, 0..=4).prop_map(|s| s.into_iter().collect())
}

/// Strategy: a hand of 1-4 six-sided dice.
fn hand_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1..=6u32, 1..=4)
}

fn falling_factorial(n: usize, k: usize) -> usize {
    (0..k).map(|i| n - i).product()
}

proptest! {
    // 1. |sequences| = |alphabet| ^ length
    #[test]
    fn sequence_count(alphabet in alphabet_strategy(), length in 0..=3usize) {
        let seqs = sequences(&alphabet, length);
        prop_assert_eq!(seqs.len(), alphabet.len().pow(length as u32));
        prop_assert!(seqs.iter().all(|s| s.len() == length));
    }

    // 2. |permutations| = n! / (n - k)!, empty when k > n
    #[test]
    fn permutation_count(alphabet in alphabet_strategy(), length in 0..=5usize) {
        let perms = permutations(&alphabet, length);
        if length > alphabet.len() {
            prop_assert!(perms.is_empty());
        } else {
            prop_assert_eq!(perms.len(), falling_factorial(alphabet.len(), length));
        }
    }

    // 3. Combinations are sorted tuples of distinct alphabet symbols
    #[test]
    fn combinations_are_sorted_subsets(alphabet in alphabet_strategy(), length in 0..=4usize) {
        for combo in combinations(&alphabet, length) {
            prop_assert_eq!(combo.len(), length);
            prop_assert!(combo.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(combo.iter().all(|s| alphabet.contains(s)));
        }
    }

    // 4. Scoring ignores order
    #[test]
    fn score_is_order_invariant(hand in hand_strategy(), rotation in 0..4usize) {
        let mut shuffled = hand.clone();
        shuffled.reverse();
        let shift = rotation % shuffled.len();
        shuffled.rotate_left(shift);
        prop_assert_eq!(score(&hand), score(&shuffled));
    }

    // 5. No free dice means no uncertainty
    #[test]
    fn zero_free_dice_is_score(hand in hand_strategy()) {
        prop_assert_eq!(expected_value(&hand, 6, 0), score(&hand) as f64);
    }

    // 6. Search is deterministic and returns a sub-multiset of the hand
    #[test]
    fn strategy_is_stable(faces in hand_strategy()) {
        let hand = Hand::new(faces.clone(), 6).unwrap();
        let first = strategy(&hand);
        let second = strategy(&hand);
        prop_assert_eq!(&first, &second);

        let mut remaining = faces;
        for face in &first.hold {
            let pos = remaining.iter().position(|f| f == face);
            prop_assert!(pos.is_some(), "hold {:?} not in hand", first.hold);
            remaining.remove(pos.unwrap());
        }
    }

    // 7. The chosen hold is at least as good as every other hold
    #[test]
    fn strategy_dominates_all_holds(faces in hand_strategy()) {
        let hand = Hand::new(faces, 6).unwrap();
        let best = strategy(&hand);
        for hold in gen_all_holds(&hand) {
            let ev = expected_value(&hold, 6, hand.free_dice(&hold));
            prop_assert!(ev <= best.expected_score);
        }
        prop_assert_eq!(&rank_holds(&hand)[0], &best);
    }
}

// Spot check: adding a higher face to a dominant group raises the expectation.
#[test]
fn higher_held_face_raises_expectation() {
    let low = expected_value(&[5, 5], 6, 2);
    let high = expected_value(&[5, 5, 5], 6, 2);
    assert!(high >= low, "low={low} high={high}");

    let sixes = expected_value(&[6, 6], 6, 2);
    assert!(sixes >= low, "fives={low} sixes={sixes}");
}

#[test]
fn triple_ones_scenario() {
    let hand = Hand::new(vec![1, 1, 1, 5, 6], 6).unwrap();
    let best = strategy(&hand);
    assert!(best.expected_score >= 3.0);
    let triple = expected_value(&[1, 1, 1], 6, 2);
    assert!(best.expected_score >= triple);
}
