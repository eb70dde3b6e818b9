//! Validated hands and canonical holds.

use std::fmt;

/// A single die face, `1..=num_sides`.
pub type Face = u32;

/// Dice kept from a hand, in ascending (canonical) order.
pub type Hold = Vec<Face>;

/// Errors raised when a hand violates its contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandError {
    #[error("hand must contain at least one die")]
    EmptyHand,

    #[error("a die needs at least one side, got {0}")]
    InvalidSides(u32),

    #[error("face {face} is outside 1..={sides}")]
    FaceOutOfRange { face: Face, sides: u32 },

    #[error("invalid face value: '{0}'")]
    ParseFace(String),
}

/// The dice rolled this turn, in the order they were rolled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hand {
    faces: Vec<Face>,
    num_sides: u32,
}

impl Hand {
    /// Builds a hand, rejecting empty hands, zero-sided dice and faces
    /// outside `1..=num_sides`.
    pub fn new(faces: Vec<Face>, num_sides: u32) -> Result<Hand, HandError> {
        if num_sides == 0 {
            return Err(HandError::InvalidSides(num_sides));
        }
        if faces.is_empty() {
            return Err(HandError::EmptyHand);
        }
        if let Some(&face) = faces.iter().find(|&&f| f == 0 || f > num_sides) {
            return Err(HandError::FaceOutOfRange {
                face,
                sides: num_sides,
            });
        }
        Ok(Hand { faces, num_sides })
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn num_sides(&self) -> u32 {
        self.num_sides
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false for a constructed hand.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Faces at the given positions, sorted into canonical hold order.
    pub fn hold_at(&self, positions: &[usize]) -> Hold {
        let mut hold: Hold = positions.iter().map(|&i| self.faces[i]).collect();
        hold.sort_unstable();
        hold
    }

    /// Number of dice left to roll when `hold` is kept.
    pub fn free_dice(&self, hold: &[Face]) -> usize {
        self.faces.len() - hold.len()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_faces(&self.faces))
    }
}

/// Parses a comma- or whitespace-separated list of faces, e.g. `"1,1,5"`.
pub fn parse_faces(s: &str) -> Result<Vec<Face>, HandError> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<Face>()
                .map_err(|_| HandError::ParseFace(tok.to_string()))
        })
        .collect()
}

/// Renders faces as a parenthesised list, e.g. `(1, 1, 5)`.
pub fn format_faces(faces: &[Face]) -> String {
    let inner: Vec<String> = faces.iter().map(|f| f.to_string()).collect();
    format!("({})", inner.join(", "))
}
