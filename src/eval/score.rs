//! Upper-section scoring.

use std::collections::BTreeMap;

use crate::dice::Face;

/// Counts occurrences of each face present in `faces`.
pub fn face_counts(faces: &[Face]) -> BTreeMap<Face, u32> {
    let mut counts = BTreeMap::new();
    for &face in faces {
        *counts.entry(face).or_insert(0) += 1;
    }
    counts
}

/// Best `count * face` over the distinct faces in `faces`.
///
/// Order of `faces` does not matter. An empty slice scores 0. The product is
/// taken in `u64`, so no face and count within `u32` can overflow it.
pub fn score(faces: &[Face]) -> u64 {
    face_counts(faces)
        .into_iter()
        .map(|(face, count)| u64::from(face) * u64::from(count))
        .max()
        .unwrap_or(0)
}
