use thiserror::Error;

/// Errors surfaced by the cube model and the solvers. Nothing is retried
/// internally; every failure goes back to the caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid corner value")]
    InvalidCorner,
    #[error("Invalid edge value")]
    InvalidEdge,
    #[error("Invalid face value")]
    InvalidFace,
    #[error("Invalid scramble string")]
    InvalidScramble,
    #[error("Cube state violates a solvability invariant")]
    UnsolvableCube,
    #[error("Worker budget must be between 1 and 32")]
    InvalidWorkerCount,
    #[error("Failed to load heuristic table file: {0}")]
    TableLoad(#[source] std::io::Error),
    #[error("Failed to save heuristic table file: {0}")]
    TableSave(#[source] std::io::Error),
}
