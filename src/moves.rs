use std::{fmt, str::FromStr};

use self::Move::*;
use crate::constants::{ALL_FACES, ALL_MOVES};
use crate::error::Error;

/// The six faces of the cube. The numbering is part of the solver contract:
/// it indexes the rotation cycle tables and the move-adjacency table, and the
/// axis priority is `UD > LR > FB`.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Eq, Hash)]
pub enum Face {
    U,
    D,
    F,
    B,
    L,
    R,
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Face {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Face::U),
            1 => Ok(Face::D),
            2 => Ok(Face::F),
            3 => Ok(Face::B),
            4 => Ok(Face::L),
            5 => Ok(Face::R),
            _ => Err(Error::InvalidFace),
        }
    }
}

/// Face turns of the outer layers: `$` clockwise, `$2` double, `$3`
/// counter-clockwise. Variants are ordered by face then turn count, so
/// `face * 3 + (turns - 1)` is the move index.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    U, U2, U3,
    D, D2, D3,
    F, F2, F3,
    B, B2, B3,
    L, L2, L3,
    R, R2, R3,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            U3 => write!(f, "U'"),
            D3 => write!(f, "D'"),
            F3 => write!(f, "F'"),
            B3 => write!(f, "B'"),
            L3 => write!(f, "L'"),
            R3 => write!(f, "R'"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "U" => Ok(U),
            "U2" => Ok(U2),
            "U'" => Ok(U3),
            "D" => Ok(D),
            "D2" => Ok(D2),
            "D'" => Ok(D3),
            "F" => Ok(F),
            "F2" => Ok(F2),
            "F'" => Ok(F3),
            "B" => Ok(B),
            "B2" => Ok(B2),
            "B'" => Ok(B3),
            "L" => Ok(L),
            "L2" => Ok(L2),
            "L'" => Ok(L3),
            "R" => Ok(R),
            "R2" => Ok(R2),
            "R'" => Ok(R3),
            _ => Err(Error::InvalidScramble),
        }
    }
}

impl Move {
    /// Build a move from a face and a clockwise quarter-turn count in `1..=3`.
    pub fn from_face_turns(face: Face, turns: u8) -> Move {
        debug_assert!((1..=3).contains(&turns));
        ALL_MOVES[face as usize * 3 + (turns as usize - 1)]
    }

    pub fn face(self) -> Face {
        ALL_FACES[self as usize / 3]
    }

    /// Clockwise quarter-turn count, `1..=3`.
    pub fn turns(self) -> u8 {
        self as u8 % 3 + 1
    }

    /// Signed turn count for display: three clockwise quarter turns are one
    /// counter-clockwise turn.
    pub fn count(self) -> i8 {
        match self.turns() {
            3 => -1,
            t => t as i8,
        }
    }

    pub fn inverse(self) -> Move {
        Move::from_face_turns(self.face(), 4 - self.turns())
    }
}

/// Invert a move sequence.
pub fn inverse_moves(moves: &[Move]) -> Vec<Move> {
    moves.iter().rev().map(|m| m.inverse()).collect()
}

/// Render a move sequence the way scramble sheets do.
pub fn format_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
