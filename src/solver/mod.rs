use std::path::Path;

use crate::cubie::CubieCube;
use crate::error::Error;
use crate::moves::Move;

/// Module for Kociemba's two-phase solver.
pub mod kociemba;
/// Module for Korf's optimal IDA* solver.
pub mod korf;

pub use kociemba::KociembaSolver;
pub use korf::KorfSolver;

/// Common contract of the solvers. `solve` is called once per cube, so the
/// dynamic dispatch never sits on a hot path.
pub trait Solver {
    /// Build the heuristic tables, or load them from `path` when given.
    fn init(&mut self, path: Option<&Path>) -> Result<(), Error>;
    /// Persist the heuristic tables to `path`. Solvers whose tables are cheap
    /// to rebuild treat this as a no-op.
    fn save(&self, path: &Path) -> Result<(), Error>;
    /// Find a move sequence bringing `cube` to the solved state. The empty
    /// sequence is returned for a cube that is already solved.
    fn solve(&self, cube: &CubieCube) -> Result<Vec<Move>, Error>;
}

/// Create a [`KorfSolver`] behind the common interface.
pub fn create_korf_solver(workers: usize) -> Result<Box<dyn Solver>, Error> {
    Ok(Box::new(KorfSolver::new(workers)?))
}

/// Create a [`KociembaSolver`] behind the common interface.
pub fn create_kociemba_solver(workers: usize) -> Result<Box<dyn Solver>, Error> {
    Ok(Box::new(KociembaSolver::new(workers)?))
}

pub(crate) fn check_workers(workers: usize) -> Result<usize, Error> {
    match workers {
        1..=32 => Ok(workers),
        _ => Err(Error::InvalidWorkerCount),
    }
}
