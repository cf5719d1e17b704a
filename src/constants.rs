use crate::cubie::Corner::{self, *};
use crate::cubie::Edge::{self, *};
use crate::moves::Face;
use crate::moves::Move::{self, *};

pub const ALL_FACES: [Face; 6] = [Face::U, Face::D, Face::F, Face::B, Face::L, Face::R];
pub const ALL_CORNERS: [Corner; 8] = [DBL, DRB, DFR, DLF, ULB, UBR, URF, UFL];
pub const ALL_EDGES: [Edge; 12] = [BL, BR, FR, FL, UB, UR, UF, UL, DB, DR, DF, DL];
pub const ALL_MOVES: [Move; 18] = [
    U, U2, U3, D, D2, D3, F, F2, F3, B, B2, B3, L, L2, L3, R, R2, R3,
];

/// 3^7 * 8! corner states (permutation times orientation) in the Korf corner table
pub const N_CORNER_PATTERNS: usize = 88_179_840;
/// 2^6 * 12!/6! placements of a tracked half of the edges in each Korf edge table
pub const N_EDGE_PATTERNS: usize = 42_577_920;
/// 3^7 possible corner orientations in phase 1
pub const N_TWIST: usize = 2187;
/// 2^11 possible edge orientations in phase 1
pub const N_FLIP: usize = 2048;
/// 12*11*10*9 possible positions of the four UD-slice edges in phase 1
pub const N_SLICE_SORTED: usize = 11_880;
/// slice positions combined with the four slice-edge orientation bits
pub const N_SLICE_FLIP: usize = N_SLICE_SORTED * 16;
/// 8! corner permutations in phase 2
pub const N_CORNERS: usize = 40_320;
/// 8! permutations of the edges in the U-face and D-face in phase 2
pub const N_UD_EDGES: usize = 40_320;
/// 4! permutations of the UD-slice edges in phase 2
pub const N_PERM_4: usize = 24;
