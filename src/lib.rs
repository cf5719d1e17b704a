//! # Krof
//! `krof` - optimal and near-optimal solvers for the 3x3x3 Rubik's cube:
//! Korf's IDA* over pattern databases and Kociemba's two-phase algorithm.

pub mod error;
/// Module containing 3x3 cube constants.
pub mod constants;
/// Module for represent moves.
pub mod moves;
/// Module for represent a cube on the cubie level.
pub mod cubie;
/// Module for the permutation codec and the pattern database builder.
pub mod search;
/// Module for Solvers.
pub mod solver;
#[cfg(feature = "term")]
/// Module for print a cube on terminal with color.
pub mod printer;

use rand::random;

use constants::ALL_FACES;
use moves::Move;

/// Generate a random scramble formula.
pub fn scramble() -> Vec<Move> {
    let mut r = Vec::new();
    let mut p = 6;
    for _ in 0..25 {
        let f = random::<u32>() as usize % 6;
        if f == p {
            continue;
        }
        let turns = random::<u32>() as u8 % 3 + 1;
        r.push(Move::from_face_turns(ALL_FACES[f], turns));
        p = f;
    }
    r
}
