use crossterm::style::{Color as TermColor, SetBackgroundColor};

use crate::constants::ALL_FACES;
use crate::cubie::CubieCube;
use crate::moves::Face;

fn face_to_termcolor(face: Face) -> TermColor {
    match face {
        Face::U => TermColor::DarkYellow,
        Face::D => TermColor::White,
        Face::F => TermColor::Green,
        Face::B => TermColor::Blue,
        Face::L => TermColor::Red,
        Face::R => TermColor::Magenta,
    }
}

fn row_chunk(row: &[Face]) -> String {
    format!(
        "{}  {}  {}  {}",
        SetBackgroundColor(face_to_termcolor(row[0])),
        SetBackgroundColor(face_to_termcolor(row[1])),
        SetBackgroundColor(face_to_termcolor(row[2])),
        SetBackgroundColor(TermColor::Reset)
    )
}

/// Print the cube unfolded as a cross, one colored cell per sticker.
pub fn print_cube(cube: &CubieCube) {
    let faces: Vec<[Face; 9]> = ALL_FACES.iter().map(|&f| cube.face_colors(f)).collect();
    let (u, d, f, b, l, r) = (
        &faces[0], &faces[1], &faces[2], &faces[3], &faces[4], &faces[5],
    );

    println!();
    for row in 0..3 {
        println!("      {}", row_chunk(&u[3 * row..3 * row + 3]));
    }
    for row in 0..3 {
        println!(
            "{}{}{}{}",
            row_chunk(&l[3 * row..3 * row + 3]),
            row_chunk(&f[3 * row..3 * row + 3]),
            row_chunk(&r[3 * row..3 * row + 3]),
            row_chunk(&b[3 * row..3 * row + 3])
        );
    }
    for row in 0..3 {
        println!("      {}", row_chunk(&d[3 * row..3 * row + 3]));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scramble;

    #[test]
    fn test_printer() {
        let cube = CubieCube::default().apply_moves(&scramble());
        print_cube(&cube);
    }
}
