use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Condvar, Mutex};
use std::thread;

use super::Solver;
use crate::constants::{ALL_FACES, ALL_MOVES, N_CORNER_PATTERNS, N_EDGE_PATTERNS, N_TWIST};
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::Move;
use crate::search::{
    build_heuristic, encode_perm, DISALLOW_FACES, FACTORIAL_12, FACTORIAL_8, NO_FACE,
};

/// Depth bound from which the 18 first-ply branches run on worker threads.
const PARALLEL_DEPTH: usize = 11;

/// Korf's algorithm: iterative-deepening A* over three pattern databases,
/// one covering all eight corners and one for each half of the edges. The
/// databases are exact BFS distances of their projections, so the `max` of
/// the three lookups is an admissible estimate and the first sequence found
/// is optimal.
///
/// The three tables occupy about 173 MB and take minutes to build; `init`
/// with a path loads them from a file written by [`KorfSolver::save`]
/// (byte-concatenated `edges_a`, `edges_b`, `corners`, no header). `init`
/// must run before `solve`.
pub struct KorfSolver {
    edges_a: Vec<u8>,
    edges_b: Vec<u8>,
    corners: Vec<u8>,
    workers: usize,
}

fn encode_corners(cube: &CubieCube) -> usize {
    let mut p = [0usize; 7];
    for i in 0..7 {
        p[i] = cube.cp[i] as usize;
    }
    let mut v = 0;
    for i in (0..7).rev() {
        v = v * 3 + cube.co[i] as usize;
    }
    encode_perm::<8, 7>(&p, &FACTORIAL_8) * N_TWIST + v
}

fn encode_edges_a(cube: &CubieCube) -> usize {
    let mut p = [0usize; 6];
    let mut v = 0;
    for i in 0..12 {
        let e = cube.ep[i] as usize;
        if e < 6 {
            p[e] = i;
            v |= (cube.eo[i] as usize) << e;
        }
    }
    (encode_perm::<12, 6>(&p, &FACTORIAL_12) << 6) | v
}

fn encode_edges_b(cube: &CubieCube) -> usize {
    let mut p = [0usize; 6];
    let mut v = 0;
    for i in 0..12 {
        let e = cube.ep[i] as usize;
        if e >= 6 {
            p[e - 6] = i;
            v |= (cube.eo[i] as usize) << (e - 6);
        }
    }
    (encode_perm::<12, 6>(&p, &FACTORIAL_12) << 6) | v
}

impl KorfSolver {
    /// Create a solver with the given worker budget. Budgets outside `1..=32`
    /// are rejected. Depths below the parallel threshold always search
    /// single-threaded regardless of the budget.
    pub fn new(workers: usize) -> Result<Self, Error> {
        Ok(KorfSolver {
            edges_a: Vec::new(),
            edges_b: Vec::new(),
            corners: Vec::new(),
            workers: super::check_workers(workers)?,
        })
    }

    fn estimate(&self, cube: &CubieCube) -> usize {
        let c = self.corners[encode_corners(cube)];
        let a = self.edges_a[encode_edges_a(cube)];
        let b = self.edges_b[encode_edges_b(cube)];
        c.max(a).max(b) as usize
    }

    /// Depth-bounded DFS. `seq[g]` records the move taken at depth `g`;
    /// `last` is the face of the previous move (`NO_FACE` at the root). When
    /// `winner` is set the search runs under a parallel root and bails out as
    /// soon as some task has published a solution; the caller discards the
    /// buffer of every task that loses the winner race.
    fn search(
        &self,
        cb: &CubieCube,
        g: usize,
        last: usize,
        depth: usize,
        seq: &mut [Move],
        winner: Option<&AtomicI32>,
    ) -> bool {
        if let Some(w) = winner {
            if w.load(Ordering::SeqCst) >= 0 {
                return true;
            }
        }

        for i in 0..6 {
            if i == last || DISALLOW_FACES[i] == last as i8 {
                continue;
            }

            let mut cube = *cb;
            for j in 1..=3u8 {
                cube.rotate(ALL_FACES[i], 1);
                let h = self.estimate(&cube);
                if h + g + 1 <= depth {
                    seq[g] = Move::from_face_turns(ALL_FACES[i], j);
                    if h == 0 && g + 1 == depth && cube == CubieCube::default() {
                        return true;
                    }
                    if self.search(&cube, g + 1, i, depth, seq, winner) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Explore the 18 first moves concurrently, at most `workers` at a time,
    /// and return the winning task's sequence. Tasks queue on a
    /// mutex/condvar admission gate, never holding the mutex while
    /// searching; the first task to find a solution wins the atomic and the
    /// rest cancel cooperatively at their next poll.
    fn search_parallel(&self, cube: &CubieCube, depth: usize) -> Option<Vec<Move>> {
        let winner = AtomicI32::new(-1);
        let running = Mutex::new(0usize);
        let admitted = Condvar::new();

        let mut seqs = thread::scope(|s| {
            let winner = &winner;
            let running = &running;
            let admitted = &admitted;
            let handles: Vec<_> = ALL_MOVES
                .iter()
                .enumerate()
                .map(|(id, &first)| {
                    s.spawn(move || {
                        {
                            let mut active = running.lock().unwrap();
                            while *active >= self.workers {
                                active = admitted.wait(active).unwrap();
                            }
                            *active += 1;
                        }

                        let mut cb = *cube;
                        cb.rotate(first.face(), first.turns() as i32);
                        let mut seq = vec![Move::U; depth];
                        seq[0] = first;
                        let h = self.estimate(&cb);
                        let found = h + 1 <= depth
                            && self.search(&cb, 1, first.face() as usize, depth, &mut seq, Some(winner));
                        if found {
                            let _ = winner.compare_exchange(
                                -1,
                                id as i32,
                                Ordering::SeqCst,
                                Ordering::SeqCst,
                            );
                        }

                        *running.lock().unwrap() -= 1;
                        admitted.notify_one();
                        seq
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| Some(h.join().unwrap()))
                .collect::<Vec<_>>()
        });

        match winner.load(Ordering::SeqCst) {
            id if id >= 0 => seqs[id as usize].take(),
            _ => None,
        }
    }
}

impl Solver for KorfSolver {
    fn init(&mut self, path: Option<&Path>) -> Result<(), Error> {
        match path {
            Some(path) => {
                let mut file = File::open(path).map_err(Error::TableLoad)?;
                let mut edges_a = vec![0u8; N_EDGE_PATTERNS];
                file.read_exact(&mut edges_a).map_err(Error::TableLoad)?;
                let mut edges_b = vec![0u8; N_EDGE_PATTERNS];
                file.read_exact(&mut edges_b).map_err(Error::TableLoad)?;
                let mut corners = vec![0u8; N_CORNER_PATTERNS];
                file.read_exact(&mut corners).map_err(Error::TableLoad)?;
                self.edges_a = edges_a;
                self.edges_b = edges_b;
                self.corners = corners;
            }
            None => {
                let roots = [CubieCube::default()];
                let mut edges_a = vec![0u8; N_EDGE_PATTERNS];
                build_heuristic(&mut edges_a, encode_edges_a, false, &roots, None);
                let mut edges_b = vec![0u8; N_EDGE_PATTERNS];
                build_heuristic(&mut edges_b, encode_edges_b, false, &roots, None);
                let mut corners = vec![0u8; N_CORNER_PATTERNS];
                build_heuristic(&mut corners, encode_corners, false, &roots, None);
                self.edges_a = edges_a;
                self.edges_b = edges_b;
                self.corners = corners;
            }
        }
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<(), Error> {
        let mut file = File::create(path).map_err(Error::TableSave)?;
        file.write_all(&self.edges_a).map_err(Error::TableSave)?;
        file.write_all(&self.edges_b).map_err(Error::TableSave)?;
        file.write_all(&self.corners).map_err(Error::TableSave)?;
        Ok(())
    }

    fn solve(&self, cube: &CubieCube) -> Result<Vec<Move>, Error> {
        cube.verify()?;
        if *cube == CubieCube::default() {
            return Ok(Vec::new());
        }

        let mut depth = 1;
        loop {
            let solution = if depth >= PARALLEL_DEPTH && self.workers > 1 {
                self.search_parallel(cube, depth)
            } else {
                let mut seq = vec![Move::U; depth];
                self.search(cube, 0, NO_FACE, depth, &mut seq, None)
                    .then_some(seq)
            };
            if let Some(seq) = solution {
                return Ok(seq);
            }
            depth += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::moves::Move::*;

    fn parse(s: &str) -> Vec<Move> {
        s.split_whitespace()
            .map(|m| Move::from_str(m).unwrap())
            .collect()
    }

    #[test]
    fn test_worker_budget() {
        assert!(KorfSolver::new(1).is_ok());
        assert!(KorfSolver::new(32).is_ok());
        assert!(matches!(
            KorfSolver::new(0),
            Err(Error::InvalidWorkerCount)
        ));
        assert!(matches!(
            KorfSolver::new(33),
            Err(Error::InvalidWorkerCount)
        ));
    }

    #[test]
    fn test_encoder_ranges() {
        let mut cube = CubieCube::default();
        for m in parse("R U R' U' F2 L B D' R2 U F' B2 L' D") {
            let before = (
                encode_corners(&cube),
                encode_edges_a(&cube),
                encode_edges_b(&cube),
            );
            cube = cube.apply_move(m);
            let after = (
                encode_corners(&cube),
                encode_edges_a(&cube),
                encode_edges_b(&cube),
            );
            assert!(after.0 < N_CORNER_PATTERNS);
            assert!(after.1 < N_EDGE_PATTERNS && after.2 < N_EDGE_PATTERNS);
            // the three patterns together pin down the whole state, and no
            // face turn fixes the whole state
            assert_ne!(before, after);
        }
    }

    #[test]
    fn test_solved_cube_needs_no_tables() {
        let solver = KorfSolver::new(1).unwrap();
        assert_eq!(solver.solve(&CubieCube::default()).unwrap(), vec![]);
    }

    #[test]
    fn test_reject_unsolvable() {
        let solver = KorfSolver::new(1).unwrap();
        let mut cube = CubieCube::default();
        cube.co[0] = 1;
        assert!(matches!(
            solver.solve(&cube),
            Err(Error::UnsolvableCube)
        ));
    }

    #[test]
    fn test_missing_table_file() {
        let mut solver = KorfSolver::new(1).unwrap();
        let missing = Path::new("no-such-dir/krof.dat");
        assert!(matches!(
            solver.init(Some(missing)),
            Err(Error::TableLoad(_))
        ));
    }

    // Builds the full 173 MB pattern-database triple; takes minutes.
    #[test]
    #[ignore = "builds the 173 MB Korf pattern databases"]
    fn test_build_and_solve_optimal() {
        let mut solver = KorfSolver::new(1).unwrap();
        solver.init(None).unwrap();

        let solved = CubieCube::default();
        assert_eq!(solver.estimate(&solved), 0);
        assert!(solver.corners.iter().all(|&d| d != 0xFF));
        assert!(solver.edges_a.iter().all(|&d| d != 0xFF));
        assert!(solver.edges_b.iter().all(|&d| d != 0xFF));
        assert!(solver.corners.iter().all(|&d| d <= 11));
        assert!(solver.edges_a.iter().all(|&d| d <= 10));

        // one quarter turn undone with the opposite turn
        let cube = solved.apply_move(U);
        assert_eq!(solver.solve(&cube).unwrap(), vec![U3]);

        // four half-independent moves stay depth four
        let cube = solved.apply_moves(&parse("F B U2 D2"));
        let seq = solver.solve(&cube).unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(cube.apply_moves(&seq), solved);

        // ten-move scramble with no cancellations: optimal cannot exceed it
        let scramble = parse("R U F' D2 L' B U2 R' F L2");
        let cube = solved.apply_moves(&scramble);
        let estimate = solver.estimate(&cube);
        let seq = solver.solve(&cube).unwrap();
        assert!(seq.len() <= 10);
        assert!(estimate <= seq.len());
        assert_eq!(cube.apply_moves(&seq), solved);

        // persistence round-trip feeds an 8-worker solver; both budgets must
        // agree on the optimal length
        let file = std::env::temp_dir().join("krof-test.dat");
        solver.save(&file).unwrap();
        let mut parallel = KorfSolver::new(8).unwrap();
        parallel.init(Some(&file)).unwrap();
        let _ = std::fs::remove_file(&file);
        assert_eq!(parallel.corners, solver.corners);

        let scramble = parse("R U F' D2 L' B U2 R' F L2 D B2");
        let cube = solved.apply_moves(&scramble);
        let serial = solver.solve(&cube).unwrap();
        let threaded = parallel.solve(&cube).unwrap();
        assert!(serial.len() <= 12);
        assert_eq!(serial.len(), threaded.len());
        assert_eq!(cube.apply_moves(&serial), solved);
        assert_eq!(cube.apply_moves(&threaded), solved);
    }
}
