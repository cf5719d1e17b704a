use std::fmt;

use self::{Corner::*, Edge::*};
use crate::constants::ALL_FACES;
use crate::error::Error;
use crate::moves::{Face, Move};

/// Represents the 8 corners on the cube, described by the faces they touch.
///
/// Slots 0..4 sit on the D layer, 4..8 on the U layer; the discriminants
/// index the rotation cycle tables.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Eq, Hash)]
pub enum Corner {
    DBL, DRB, DFR, DLF, ULB, UBR, URF, UFL,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Corner {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(DBL),
            1 => Ok(DRB),
            2 => Ok(DFR),
            3 => Ok(DLF),
            4 => Ok(ULB),
            5 => Ok(UBR),
            6 => Ok(URF),
            7 => Ok(UFL),
            _ => Err(Error::InvalidCorner),
        }
    }
}

/// Represents the 12 edges on the cube, described by the faces they touch.
///
/// Slots 0..4 are the UD-slice (equator) edges, 4..8 the U-layer edges and
/// 8..12 the D-layer edges. Phase 2 of the two-phase solver relies on this
/// split: its move set never takes an edge out of its group.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Eq, Hash)]
pub enum Edge {
    BL, BR, FR, FL, UB, UR, UF, UL, DB, DR, DF, DL,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Edge {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BL),
            1 => Ok(BR),
            2 => Ok(FR),
            3 => Ok(FL),
            4 => Ok(UB),
            5 => Ok(UR),
            6 => Ok(UF),
            7 => Ok(UL),
            8 => Ok(DB),
            9 => Ok(DR),
            10 => Ok(DF),
            11 => Ok(DL),
            _ => Err(Error::InvalidEdge),
        }
    }
}

/// The four corner slots touched by each face, in clockwise and
/// counter-clockwise cycle order. Indexed by `[direction][face]` with
/// direction 0 = clockwise.
#[rustfmt::skip]
const CORNER_CYCLES: [[[usize; 4]; 6]; 2] = [
    [
        [4, 5, 6, 7],
        [3, 2, 1, 0],
        [7, 6, 2, 3],
        [5, 4, 0, 1],
        [4, 7, 3, 0],
        [6, 5, 1, 2],
    ],
    [
        [7, 6, 5, 4],
        [0, 1, 2, 3],
        [7, 3, 2, 6],
        [5, 1, 0, 4],
        [4, 0, 3, 7],
        [6, 2, 1, 5],
    ],
];

/// The four edge slots touched by each face, same layout as `CORNER_CYCLES`.
#[rustfmt::skip]
const EDGE_CYCLES: [[[usize; 4]; 6]; 2] = [
    [
        [4, 5, 6, 7],
        [11, 10, 9, 8],
        [6, 2, 10, 3],
        [4, 0, 8, 1],
        [7, 3, 11, 0],
        [5, 1, 9, 2],
    ],
    [
        [7, 6, 5, 4],
        [8, 9, 10, 11],
        [3, 10, 2, 6],
        [1, 8, 0, 4],
        [0, 11, 3, 7],
        [2, 9, 1, 5],
    ],
];

/// Faces carrying a sticker of each corner slot: the U/D face first, then the
/// two side faces in twist order.
#[rustfmt::skip]
const CORNER_FACES: [[usize; 3]; 8] = [
    [1, 3, 4], [1, 5, 3], [1, 2, 5], [1, 4, 2],
    [0, 4, 3], [0, 3, 5], [0, 5, 2], [0, 2, 4],
];

/// Faces carrying a sticker of each edge slot, higher-priority axis first.
#[rustfmt::skip]
const EDGE_FACES: [[usize; 2]; 12] = [
    [4, 3], [5, 3], [5, 2], [4, 2],
    [0, 3], [0, 5], [0, 2], [0, 4],
    [1, 3], [1, 5], [1, 2], [1, 4],
];

/// Where each sticker of a face sits in the model, row-major as printed.
#[derive(Clone, Copy)]
enum Sticker {
    Corner(usize),
    Edge(usize),
    Center,
}

#[rustfmt::skip]
const FACE_LAYOUT: [[Sticker; 9]; 6] = {
    use Sticker::{Center, Corner as C, Edge as E};
    [
        [C(4), E(4),  C(5), E(7),  Center, E(5), C(7), E(6),  C(6)], // U
        [C(3), E(10), C(2), E(11), Center, E(9), C(0), E(8),  C(1)], // D
        [C(7), E(6),  C(6), E(3),  Center, E(2), C(3), E(10), C(2)], // F
        [C(5), E(4),  C(4), E(1),  Center, E(0), C(1), E(8),  C(0)], // B
        [C(4), E(7),  C(7), E(0),  Center, E(3), C(0), E(11), C(3)], // L
        [C(6), E(5),  C(5), E(2),  Center, E(1), C(2), E(9),  C(1)], // R
    ]
};

/// Cube on the cubie level.
///
/// `cp[i] = j` means the slot whose home is `i` currently holds the cubie
/// whose home is `j`; orientations are counted relative to the `UD > LR > FB`
/// axis priority. Centers are fixed and implicit.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CubieCube {
    /// Corner permutation, relative to SOLVED_CUBIE_CUBE.
    pub cp: [Corner; 8],
    /// Corner orientation, 3 possible values: 0 (correctly oriented), 1 (twisted clockwise), 2 (twisted counter-clockwise).
    pub co: [u8; 8],
    /// Edge permutation, relative to SOLVED_CUBIE_CUBE.
    pub ep: [Edge; 12],
    /// Edge orientation, 2 possible values: 0 (correctly oriented), 1 (flipped).
    pub eo: [u8; 12],
}

/// Solved cube on the cubie level.
pub const SOLVED_CUBIE_CUBE: CubieCube = CubieCube {
    cp: [DBL, DRB, DFR, DLF, ULB, UBR, URF, UFL],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [BL, BR, FR, FL, UB, UR, UF, UL, DB, DR, DF, DL],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

impl Default for CubieCube {
    fn default() -> Self {
        SOLVED_CUBIE_CUBE
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        for i in 0..8 {
            s.push_str(&format!("({},{})", self.cp[i], self.co[i]));
        }
        for i in 0..12 {
            s.push_str(&format!("({},{})", self.ep[i], self.eo[i]));
        }
        write!(f, "{s}")
    }
}

/// Cycle the four entries at `idx` one step: `idx[0]` moves to `idx[1]` and
/// so on around.
fn cycle4<T: Copy>(arr: &mut [T], idx: &[usize; 4]) {
    let t = arr[idx[3]];
    arr[idx[3]] = arr[idx[2]];
    arr[idx[2]] = arr[idx[1]];
    arr[idx[1]] = arr[idx[0]];
    arr[idx[0]] = t;
}

impl CubieCube {
    /// Turn `face` clockwise `count` quarter turns, in place and in O(1).
    ///
    /// `count` may be any integer; it is reduced modulo 4, so `-1` is a
    /// counter-clockwise turn and multiples of 4 are no-ops. Half turns swap
    /// opposite slots pairwise and never change orientation.
    pub fn rotate(&mut self, face: Face, count: i32) {
        let count = (count % 4 + 4) as usize & 3;
        let f = face as usize;

        if count == 0 {
            return;
        }

        if count == 2 {
            let c = &CORNER_CYCLES[0][f];
            self.cp.swap(c[0], c[2]);
            self.cp.swap(c[1], c[3]);
            self.co.swap(c[0], c[2]);
            self.co.swap(c[1], c[3]);

            let e = &EDGE_CYCLES[0][f];
            self.ep.swap(e[0], e[2]);
            self.ep.swap(e[1], e[3]);
            self.eo.swap(e[0], e[2]);
            self.eo.swap(e[1], e[3]);
            return;
        }

        let dir = count >> 1;
        let c = &CORNER_CYCLES[dir][f];
        cycle4(&mut self.cp, c);
        cycle4(&mut self.co, c);

        // U and D quarter turns leave corner orientation unchanged; the four
        // side faces twist diagonal corner pairs in opposite directions.
        if f >= 2 {
            self.co[c[0]] = (self.co[c[0]] + 1) % 3;
            self.co[c[2]] = (self.co[c[2]] + 1) % 3;
            self.co[c[1]] = (self.co[c[1]] + 2) % 3;
            self.co[c[3]] = (self.co[c[3]] + 2) % 3;
        }

        let e = &EDGE_CYCLES[dir][f];
        // Only L and R quarter turns flip edges.
        if f >= 4 {
            self.eo[e[0]] ^= 1;
            self.eo[e[1]] ^= 1;
            self.eo[e[2]] ^= 1;
            self.eo[e[3]] ^= 1;
        }
        cycle4(&mut self.ep, e);
        cycle4(&mut self.eo, e);
    }

    /// Applies a move to the current state.
    pub fn apply_move(self, m: Move) -> Self {
        let mut cube = self;
        cube.rotate(m.face(), m.turns() as i32);
        cube
    }

    /// Applies the sequence of moves to the current state.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |acc, &m| acc.apply_move(m))
    }

    /// Corner permutation and orientation, read-only.
    pub fn corner_view(&self) -> (&[Corner; 8], &[u8; 8]) {
        (&self.cp, &self.co)
    }

    /// Edge permutation and orientation, read-only.
    pub fn edge_view(&self) -> (&[Edge; 12], &[u8; 12]) {
        (&self.ep, &self.eo)
    }

    /// Give the parity of the corner permutation.
    pub fn corner_parity(&self) -> bool {
        let mut s = 0;
        for i in 1..8 {
            for j in 0..i {
                if self.cp[j] > self.cp[i] {
                    s += 1;
                }
            }
        }
        s % 2 == 0
    }

    /// Give the parity of the edge permutation. A solvable cube has the same
    /// corner and edge parity.
    pub fn edge_parity(&self) -> bool {
        let mut s = 0;
        for i in 1..12 {
            for j in 0..i {
                if self.ep[j] > self.ep[i] {
                    s += 1;
                }
            }
        }
        s % 2 == 0
    }

    /// Check that this state lies in the cube group: every cubie present
    /// exactly once, orientation sums zero modulo 3 and 2, matching
    /// permutation parities. No state outside the group can be solved, so
    /// the solvers reject them up front.
    pub fn verify(&self) -> Result<(), Error> {
        let mut edge_count = [0; 12];
        for e in self.ep {
            edge_count[e as usize] += 1;
        }
        if edge_count.iter().any(|&n| n != 1) {
            return Err(Error::InvalidEdge);
        }

        let mut corner_count = [0; 8];
        for c in self.cp {
            corner_count[c as usize] += 1;
        }
        if corner_count.iter().any(|&n| n != 1) {
            return Err(Error::InvalidCorner);
        }

        if self.co.iter().any(|&o| o >= 3)
            || self.co.iter().map(|&o| o as u32).sum::<u32>() % 3 != 0
        {
            return Err(Error::UnsolvableCube);
        }
        if self.eo.iter().any(|&o| o >= 2)
            || self.eo.iter().map(|&o| o as u32).sum::<u32>() % 2 != 0
        {
            return Err(Error::UnsolvableCube);
        }
        if self.corner_parity() != self.edge_parity() {
            return Err(Error::UnsolvableCube);
        }
        Ok(())
    }

    fn corner_sticker(&self, slot: usize, on: Face) -> Face {
        let k = CORNER_FACES[slot]
            .iter()
            .position(|&f| f == on as usize)
            .unwrap();
        let cubie = self.cp[slot] as usize;
        ALL_FACES[CORNER_FACES[cubie][(k + self.co[slot] as usize) % 3]]
    }

    fn edge_sticker(&self, slot: usize, on: Face) -> Face {
        let k = EDGE_FACES[slot]
            .iter()
            .position(|&f| f == on as usize)
            .unwrap();
        let cubie = self.ep[slot] as usize;
        ALL_FACES[EDGE_FACES[cubie][(k + self.eo[slot] as usize) % 2]]
    }

    /// The nine sticker colors of a face, row-major, each named by the face
    /// it belongs to on a solved cube. Read-only viewer projection, not on
    /// the solver hot path.
    pub fn face_colors(&self, face: Face) -> [Face; 9] {
        let mut out = [face; 9];
        for (i, sticker) in FACE_LAYOUT[face as usize].iter().enumerate() {
            out[i] = match *sticker {
                Sticker::Corner(slot) => self.corner_sticker(slot, face),
                Sticker::Edge(slot) => self.edge_sticker(slot, face),
                Sticker::Center => face,
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::moves::Move::{self, *};
    use crate::moves::{inverse_moves, Face};
    use crate::scramble;

    #[test]
    fn test_eq() {
        assert_eq!(CubieCube::default(), CubieCube::default());
        assert_eq!(CubieCube::default(), SOLVED_CUBIE_CUBE);
    }

    #[test]
    fn test_views() {
        let cube = CubieCube::default().apply_move(R);
        let (cp, co) = cube.corner_view();
        let (ep, eo) = cube.edge_view();
        assert_eq!((cp, co), (&cube.cp, &cube.co));
        assert_eq!((ep, eo), (&cube.ep, &cube.eo));
        assert!(cube.to_string().starts_with("(DBL,0)"));
    }

    #[test]
    fn test_cubie_conversions() {
        for i in 0..8u8 {
            assert_eq!(Corner::try_from(i).unwrap() as u8, i);
        }
        for i in 0..12u8 {
            assert_eq!(Edge::try_from(i).unwrap() as u8, i);
        }
        assert!(Corner::try_from(8).is_err());
        assert!(Edge::try_from(12).is_err());
    }

    #[test]
    fn test_rotate_u() {
        let mut cube = CubieCube::default();
        cube.rotate(Face::U, 1);
        let expected = CubieCube {
            cp: [DBL, DRB, DFR, DLF, UFL, ULB, UBR, URF],
            co: [0; 8],
            ep: [BL, BR, FR, FL, UL, UB, UR, UF, DB, DR, DF, DL],
            eo: [0; 12],
        };
        assert_eq!(cube, expected);
    }

    #[test]
    fn test_rotate_f() {
        let mut cube = CubieCube::default();
        cube.rotate(Face::F, 1);
        let expected = CubieCube {
            cp: [DBL, DRB, URF, DFR, ULB, UBR, UFL, DLF],
            co: [0, 0, 1, 2, 0, 0, 2, 1],
            ep: [BL, BR, UF, DF, UB, UR, FL, UL, DB, DR, FR, DL],
            eo: [0; 12],
        };
        assert_eq!(cube, expected);
    }

    #[test]
    fn test_rotate_r_flips_edges() {
        let mut cube = CubieCube::default();
        cube.rotate(Face::R, 1);
        // exactly the four cycled edges flip
        assert_eq!(cube.eo, [0, 1, 1, 0, 0, 1, 0, 0, 0, 1, 0, 0]);
        cube.rotate(Face::R, -1);
        assert_eq!(cube, CubieCube::default());
    }

    #[test]
    fn test_rotate_full_turn() {
        for face in crate::constants::ALL_FACES {
            let mut cube = CubieCube::default();
            cube.rotate(face, 4);
            assert_eq!(cube, CubieCube::default());
            for _ in 0..4 {
                cube.rotate(face, 1);
            }
            assert_eq!(cube, CubieCube::default());
            cube.rotate(face, 2);
            cube.rotate(face, 2);
            assert_eq!(cube, CubieCube::default());
        }
    }

    #[test]
    fn test_rotate_additivity() {
        for face in crate::constants::ALL_FACES {
            for a in -4..=4 {
                for b in -4..=4 {
                    let mut split = CubieCube::default();
                    split.rotate(face, a);
                    split.rotate(face, b);
                    let mut joined = CubieCube::default();
                    joined.rotate(face, a + b);
                    assert_eq!(split, joined, "{face} {a} {b}");
                }
            }
        }
    }

    #[test]
    fn test_move_sequence() {
        // (R U R' U') * 6
        let sexy = vec![R, U, R3, U3];
        let mut cube = CubieCube::default();
        for _ in 0..6 {
            cube = cube.apply_moves(&sexy);
        }
        assert_eq!(cube, SOLVED_CUBIE_CUBE);
    }

    #[test]
    fn test_scramble_state() {
        // U F' D' F2 D B2 D' R2 U' F2 R2
        let moves: Vec<Move> = "U F' D' F2 D B2 D' R2 U' F2 R2"
            .split_whitespace()
            .map(|s| Move::from_str(s).unwrap())
            .collect();
        let cube = CubieCube::default().apply_moves(&moves);
        assert!(cube.verify().is_ok());
        let back = cube.apply_moves(&inverse_moves(&moves));
        assert_eq!(back, CubieCube::default());
    }

    #[test]
    fn test_invariants_random() {
        for _ in 0..50 {
            let moves = scramble();
            let mut cube = CubieCube::default();
            for m in moves {
                cube = cube.apply_move(m);
                assert!(cube.verify().is_ok());
            }
        }
    }

    #[test]
    fn test_verify_rejects() {
        let mut cube = CubieCube::default();
        cube.co[0] = 1;
        assert!(matches!(cube.verify(), Err(Error::UnsolvableCube)));

        let mut cube = CubieCube::default();
        cube.eo[3] = 1;
        assert!(matches!(cube.verify(), Err(Error::UnsolvableCube)));

        let mut cube = CubieCube::default();
        cube.cp[0] = cube.cp[1];
        assert!(matches!(cube.verify(), Err(Error::InvalidCorner)));

        let mut cube = CubieCube::default();
        cube.ep[0] = cube.ep[1];
        assert!(matches!(cube.verify(), Err(Error::InvalidEdge)));

        // corner swap without a matching edge swap breaks parity
        let mut cube = CubieCube::default();
        cube.cp.swap(0, 1);
        assert!(matches!(cube.verify(), Err(Error::UnsolvableCube)));
    }

    #[test]
    fn test_face_colors() {
        let cube = CubieCube::default();
        for face in crate::constants::ALL_FACES {
            assert_eq!(cube.face_colors(face), [face; 9]);
        }

        let cube = cube.apply_move(U);
        assert_eq!(cube.face_colors(Face::U), [Face::U; 9]);
        assert_eq!(cube.face_colors(Face::D), [Face::D; 9]);
        // the top rows of the side faces rotate F <- R <- B <- L
        let f = cube.face_colors(Face::F);
        assert_eq!(&f[0..3], &[Face::R; 3]);
        assert_eq!(&f[3..9], &[Face::F; 6]);
        let r = cube.face_colors(Face::R);
        assert_eq!(&r[0..3], &[Face::B; 3]);
        let b = cube.face_colors(Face::B);
        assert_eq!(&b[0..3], &[Face::L; 3]);
        let l = cube.face_colors(Face::L);
        assert_eq!(&l[0..3], &[Face::F; 3]);
    }
}
