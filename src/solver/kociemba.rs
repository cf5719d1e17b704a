use std::path::Path;

use static_init::dynamic;

use super::Solver;
use crate::constants::{
    ALL_FACES, N_CORNERS, N_FLIP, N_PERM_4, N_SLICE_FLIP, N_TWIST, N_UD_EDGES,
};
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::Move;
use crate::search::{
    build_heuristic, encode_perm, DISALLOW_FACES, FACTORIAL_12, FACTORIAL_4, FACTORIAL_8, NO_FACE,
};

/// Kociemba's two-phase algorithm. Phase 1 brings the cube into the subgroup
/// ⟨U, D, L², R², F², B²⟩ (slice edges home and every orientation zero),
/// phase 2 solves it without leaving the subgroup. Each phase is optimal on
/// its own but the concatenation usually is not; this is the near-optimal
/// counterpart of [`super::KorfSolver`].
///
/// The worker budget is validated for interface parity with the Korf solver;
/// both phases search shallow enough that the two-phase search itself runs
/// single-threaded.
pub struct KociembaSolver;

/// The six phase tables together are under a quarter megabyte and rebuild in
/// well under a second, so they are never persisted: one process-wide set,
/// built on first use, shared read-only by every solver instance.
struct PhaseTables {
    phase1_edges: Vec<u8>,
    phase1_twist: Vec<u8>,
    phase1_flip: Vec<u8>,
    phase2_corners: Vec<u8>,
    phase2_edges: Vec<u8>,
    phase2_slice: Vec<u8>,
}

#[dynamic(lazy)]
static PHASE_TABLES: PhaseTables = PhaseTables::build();

/// Positions of the four slice edges plus their orientation bits.
fn encode_phase1_edges(cube: &CubieCube) -> usize {
    let mut p = [0usize; 4];
    let mut v = 0;
    for i in 0..12 {
        let e = cube.ep[i] as usize;
        if e < 4 {
            p[e] = i;
            v |= (cube.eo[i] as usize) << e;
        }
    }
    (encode_perm::<12, 4>(&p, &FACTORIAL_12) << 4) | v
}

/// Corner orientations as base-3 digits; the eighth is fixed by parity.
fn encode_twist(cube: &CubieCube) -> usize {
    cube.co[..7].iter().rev().fold(0, |v, &o| v * 3 + o as usize)
}

/// Edge orientations as a bitmap; the twelfth is fixed by parity.
fn encode_flip(cube: &CubieCube) -> usize {
    cube.eo[..11]
        .iter()
        .enumerate()
        .fold(0, |v, (i, &o)| v | (o as usize) << i)
}

fn encode_phase2_corners(cube: &CubieCube) -> usize {
    let mut p = [0usize; 7];
    for i in 0..7 {
        p[i] = cube.cp[i] as usize;
    }
    encode_perm::<8, 7>(&p, &FACTORIAL_8)
}

/// Permutation of the U- and D-layer edges over slots 4..12. Only valid
/// inside the subgroup, where those slots hold exactly those edges.
fn encode_phase2_edges(cube: &CubieCube) -> usize {
    let mut p = [0usize; 7];
    for i in 0..7 {
        p[i] = cube.ep[i + 4] as usize - 4;
    }
    encode_perm::<8, 7>(&p, &FACTORIAL_8)
}

fn encode_phase2_slice(cube: &CubieCube) -> usize {
    let mut p = [0usize; 3];
    for i in 0..3 {
        p[i] = cube.ep[i] as usize;
    }
    encode_perm::<4, 3>(&p, &FACTORIAL_4)
}

impl PhaseTables {
    fn build() -> Self {
        let identity = [CubieCube::default()];

        let mut phase2_corners = vec![0u8; N_CORNERS];
        build_heuristic(&mut phase2_corners, encode_phase2_corners, true, &identity, None);
        let mut phase2_edges = vec![0u8; N_UD_EDGES];
        build_heuristic(&mut phase2_edges, encode_phase2_edges, true, &identity, None);

        // Every state enqueued while closing the 24 slice permutations is a
        // subgroup member, and together they hit each phase-1 goal pattern
        // exactly once; they seed the phase-1 edge table.
        let mut subgroup = Vec::new();
        let mut phase2_slice = vec![0u8; N_PERM_4];
        build_heuristic(
            &mut phase2_slice,
            encode_phase2_slice,
            true,
            &identity,
            Some(&mut subgroup),
        );

        let mut phase1_edges = vec![0u8; N_SLICE_FLIP];
        build_heuristic(&mut phase1_edges, encode_phase1_edges, false, &subgroup, None);
        let mut phase1_twist = vec![0u8; N_TWIST];
        build_heuristic(&mut phase1_twist, encode_twist, false, &identity, None);
        let mut phase1_flip = vec![0u8; N_FLIP];
        build_heuristic(&mut phase1_flip, encode_flip, false, &identity, None);

        PhaseTables {
            phase1_edges,
            phase1_twist,
            phase1_flip,
            phase2_corners,
            phase2_edges,
            phase2_slice,
        }
    }

    /// Lower bound on the moves needed to reach the subgroup. Zero exactly on
    /// subgroup members.
    fn estimate_phase1(&self, cube: &CubieCube) -> usize {
        let e = self.phase1_edges[encode_phase1_edges(cube)];
        let t = self.phase1_twist[encode_twist(cube)];
        let f = self.phase1_flip[encode_flip(cube)];
        e.max(t).max(f) as usize
    }

    /// Lower bound on the subgroup moves needed to solve. Zero exactly on the
    /// solved state.
    fn estimate_phase2(&self, cube: &CubieCube) -> usize {
        let c = self.phase2_corners[encode_phase2_corners(cube)];
        let e = self.phase2_edges[encode_phase2_edges(cube)];
        let s = self.phase2_slice[encode_phase2_slice(cube)];
        c.max(e).max(s) as usize
    }
}

fn search_phase1(
    tables: &PhaseTables,
    cb: &CubieCube,
    g: usize,
    last: usize,
    depth: usize,
    seq: &mut [Move],
) -> bool {
    for i in 0..6 {
        if i == last || DISALLOW_FACES[i] == last as i8 {
            continue;
        }

        let mut cube = *cb;
        for j in 1..=3u8 {
            cube.rotate(ALL_FACES[i], 1);
            let h = tables.estimate_phase1(&cube);
            if h + g + 1 <= depth {
                seq[g] = Move::from_face_turns(ALL_FACES[i], j);
                if h == 0 && g + 1 == depth {
                    return true;
                }
                if search_phase1(tables, &cube, g + 1, i, depth, seq) {
                    return true;
                }
            }
        }
    }

    false
}

/// Phase 2 generates only subgroup moves: quarter turns of U and D, half
/// turns of the other four faces.
fn search_phase2(
    tables: &PhaseTables,
    cb: &CubieCube,
    g: usize,
    last: usize,
    depth: usize,
    seq: &mut [Move],
) -> bool {
    for i in 0..6 {
        if i == last || DISALLOW_FACES[i] == last as i8 {
            continue;
        }

        let mut cube = *cb;
        for j in 1..=3u8 {
            if i < 2 {
                cube.rotate(ALL_FACES[i], 1);
            } else {
                if j != 2 {
                    continue;
                }
                cube.rotate(ALL_FACES[i], 2);
            }

            let h = tables.estimate_phase2(&cube);
            if h + g + 1 <= depth {
                seq[g] = Move::from_face_turns(ALL_FACES[i], j);
                if h == 0 && g + 1 == depth && cube == CubieCube::default() {
                    return true;
                }
                if search_phase2(tables, &cube, g + 1, i, depth, seq) {
                    return true;
                }
            }
        }
    }

    false
}

impl KociembaSolver {
    /// Create a solver with the given worker budget; budgets outside `1..=32`
    /// are rejected.
    pub fn new(workers: usize) -> Result<Self, Error> {
        super::check_workers(workers)?;
        Ok(KociembaSolver)
    }
}

impl Solver for KociembaSolver {
    fn init(&mut self, _path: Option<&Path>) -> Result<(), Error> {
        let _ = &*PHASE_TABLES;
        Ok(())
    }

    fn save(&self, _path: &Path) -> Result<(), Error> {
        Ok(())
    }

    fn solve(&self, cube: &CubieCube) -> Result<Vec<Move>, Error> {
        cube.verify()?;
        let tables = &*PHASE_TABLES;

        let mut cb = *cube;
        let mut solution = Vec::new();
        if tables.estimate_phase1(&cb) > 0 {
            let mut depth = 1;
            loop {
                let mut seq = vec![Move::U; depth];
                if search_phase1(tables, &cb, 0, NO_FACE, depth, &mut seq) {
                    solution = seq;
                    break;
                }
                depth += 1;
            }
        }
        for &m in &solution {
            cb.rotate(m.face(), m.turns() as i32);
        }

        let mut phase2 = Vec::new();
        if tables.estimate_phase2(&cb) > 0 {
            let mut depth = 1;
            loop {
                let mut seq = vec![Move::U; depth];
                if search_phase2(tables, &cb, 0, NO_FACE, depth, &mut seq) {
                    phase2 = seq;
                    break;
                }
                depth += 1;
            }
        }

        // merge a shared face across the phase boundary
        if let (Some(&last), Some(&first)) = (solution.last(), phase2.first()) {
            if last.face() == first.face() {
                let turns = (last.turns() + first.turns()) % 4;
                solution.pop();
                phase2.remove(0);
                if turns > 0 {
                    solution.push(Move::from_face_turns(last.face(), turns));
                }
            }
        }
        solution.extend(phase2);
        Ok(solution)
    }
}
