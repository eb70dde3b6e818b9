//! Combinatorial enumeration over a small outcome alphabet.
//!
//! Sequences, permutations and combinations are built iteratively, one
//! level at a time, starting from the empty sequence. Results are ordered
//! sets so that iteration order is stable across runs.

use std::collections::BTreeSet;

/// Extends every partial sequence by every symbol accepted by `keep`.
fn extend_level<T, F>(level: &BTreeSet<Vec<T>>, alphabet: &[T], keep: F) -> BTreeSet<Vec<T>>
where
    T: Ord + Clone,
    F: Fn(&[T], &T) -> bool,
{
    let mut next = BTreeSet::new();
    for partial in level {
        for symbol in alphabet {
            if !keep(partial, symbol) {
                continue;
            }
            let mut extended = Vec::with_capacity(partial.len() + 1);
            extended.extend_from_slice(partial);
            extended.push(symbol.clone());
            next.insert(extended);
        }
    }
    next
}

fn build<T, F>(alphabet: &[T], length: usize, keep: F) -> BTreeSet<Vec<T>>
where
    T: Ord + Clone,
    F: Fn(&[T], &T) -> bool,
{
    let mut answer = BTreeSet::from([Vec::new()]);
    for _ in 0..length {
        answer = extend_level(&answer, alphabet, &keep);
    }
    answer
}

/// Returns every ordered sequence of `length` symbols drawn from `alphabet`,
/// repetition allowed.
pub fn sequences<T: Ord + Clone>(alphabet: &[T], length: usize) -> BTreeSet<Vec<T>> {
    build(alphabet, length, |_, _| true)
}

/// Returns every ordered, repetition-free sequence of `length` symbols.
///
/// Equal values in `alphabet` are the same symbol: a value is never placed
/// twice in one sequence, however many times it appears in the input.
pub fn permutations<T: Ord + Clone>(alphabet: &[T], length: usize) -> BTreeSet<Vec<T>> {
    build(alphabet, length, |partial, symbol| !partial.contains(symbol))
}

/// Returns every `length`-sized combination as an ascending tuple.
pub fn combinations<T: Ord + Clone>(alphabet: &[T], length: usize) -> BTreeSet<Vec<T>> {
    permutations(alphabet, length)
        .into_iter()
        .map(|mut perm| {
            perm.sort();
            perm
        })
        .collect()
}

/// Returns `alphabet_len ^ length`, or `None` on overflow.
pub fn count_sequences(alphabet_len: usize, length: usize) -> Option<u64> {
    let exp = u32::try_from(length).ok()?;
    (alphabet_len as u64).checked_pow(exp)
}

/// Number of ordered, repetition-free selections of any length from `n`
/// distinct symbols: the sum over `k` of `n! / (n - k)!`. This is the number
/// of permutations built when enumerating every combination of `n` positions.
/// Returns `None` on overflow.
pub fn count_arrangements(n: usize) -> Option<u64> {
    let n = u64::try_from(n).ok()?;
    let mut total: u64 = 1;
    let mut term: u64 = 1;
    for k in 0..n {
        term = term.checked_mul(n - k)?;
        total = total.checked_add(term)?;
    }
    Some(total)
}

/// Lazy odometer over all sequences of a fixed length.
///
/// Yields the same elements as [`sequences`] for an alphabet of distinct
/// values, in lexicographic order of alphabet position, without
/// materializing the whole set.
pub struct SequenceIter<'a, T> {
    alphabet: &'a [T],
    digits: Vec<usize>,
    done: bool,
}

impl<'a, T: Clone> SequenceIter<'a, T> {
    pub fn new(alphabet: &'a [T], length: usize) -> Self {
        SequenceIter {
            alphabet,
            digits: vec![0; length],
            done: alphabet.is_empty() && length > 0,
        }
    }

    /// Advances the digit vector. Returns false once every slot wrapped.
    fn advance(&mut self) -> bool {
        for i in (0..self.digits.len()).rev() {
            self.digits[i] += 1;
            if self.digits[i] < self.alphabet.len() {
                return true;
            }
            self.digits[i] = 0;
        }
        false
    }
}

impl<T: Clone> Iterator for SequenceIter<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        let current = self
            .digits
            .iter()
            .map(|&d| self.alphabet[d].clone())
            .collect();
        if !self.advance() {
            self.done = true;
        }
        Some(current)
    }
}
