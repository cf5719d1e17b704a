use krof::cubie::CubieCube;
use krof::moves::format_moves;
#[cfg(feature = "term")]
use krof::printer::print_cube;
use krof::scramble;
use krof::solver::{KociembaSolver, Solver};

fn main() {
    let moves = scramble();
    println!("Scramble: {}", format_moves(&moves));
    let cube = CubieCube::default().apply_moves(&moves);
    #[cfg(feature = "term")]
    print_cube(&cube);

    let mut solver = KociembaSolver::new(1).unwrap();
    solver.init(None).unwrap();
    let solution = solver.solve(&cube).unwrap();
    println!(
        "Solution ({} moves): {}",
        solution.len(),
        format_moves(&solution)
    );
}
