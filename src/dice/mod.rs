//! Dice, hands and holds.
//!
//! A hand is validated once at construction; everything downstream of it
//! assumes faces are in range and the hand is non-empty.

pub mod hand;

pub use hand::{format_faces, parse_faces, Face, Hand, HandError, Hold};
