use anyhow::{bail, ensure};
use image::{DynamicImage, GenericImageView};
use rand::Rng;

use crate::grid::{Cell, Grid, Point};

/// Build a grid from an image: dark pixels (luminance below 128) become
/// blocked cells, light pixels open ones.
pub fn parse_img(img: &DynamicImage) -> Result<Grid, anyhow::Error> {
    let columns = img.width() as usize;
    let rows = img.height() as usize;
    ensure!(rows > 0 && columns > 0, "image has no pixels");

    let mut grid = Grid::new(rows, columns);

    for row in 0..rows {
        for col in 0..columns {
            let p = img.get_pixel(col as u32, row as u32);

            if p.0[0] < 128 {
                grid.set(Point { row, col }, Cell::Blocked);
            }
        }
    }

    Ok(grid)
}

/// Build a grid from an ASCII sketch: `X` marks a blocked cell, `.` or a
/// space an open one. All lines must be equally long; blank lines are
/// skipped. The format matches what [Grid]'s `Display` prints.
pub fn parse_ascii(input: &str) -> Result<Grid, anyhow::Error> {
    let lines: Vec<&str> = input.lines().filter(|line| !line.is_empty()).collect();
    ensure!(!lines.is_empty(), "ascii grid has no rows");

    let columns = lines[0].chars().count();
    let mut grid = Grid::new(lines.len(), columns);

    for (row, line) in lines.iter().enumerate() {
        ensure!(
            line.chars().count() == columns,
            "row {} has {} cells, expected {}",
            row,
            line.chars().count(),
            columns
        );
        for (col, c) in line.chars().enumerate() {
            match c {
                'X' => grid.set(Point { row, col }, Cell::Blocked),
                '.' | ' ' => {}
                _ => bail!("unexpected character {:?} at {}:{}", c, row, col),
            }
        }
    }

    Ok(grid)
}

/// Generate a random obstacle map where each cell is independently blocked
/// with probability `density` (which must lie in `0.0..=1.0`). The caller is
/// responsible for re-opening any cells that must stay traversable, such as
/// the search endpoints.
pub fn random_grid<R: Rng>(rows: usize, columns: usize, density: f64, rng: &mut R) -> Grid {
    let mut grid = Grid::new(rows, columns);

    for row in 0..rows {
        for col in 0..columns {
            if rng.gen_bool(density) {
                grid.set(Point { row, col }, Cell::Blocked);
            }
        }
    }

    grid
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn p(row: usize, col: usize) -> Point {
        Point { row, col }
    }

    #[test]
    fn parse_ascii_maps_characters_to_cells() {
        let grid = parse_ascii(".X.\n ..\nXX.").unwrap();

        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.get(p(0, 1)), Cell::Blocked);
        assert_eq!(grid.get(p(1, 0)), Cell::Open);
        assert_eq!(grid.get(p(2, 0)), Cell::Blocked);
        assert_eq!(grid.get(p(2, 2)), Cell::Open);
    }

    #[test]
    fn parse_ascii_rejects_bad_input() {
        assert!(parse_ascii("").is_err());
        assert!(parse_ascii("..\n...").is_err());
        assert!(parse_ascii(".#.").is_err());
    }

    #[test]
    fn random_grid_density_extremes() {
        let mut rng = StdRng::seed_from_u64(0);

        let open = random_grid(4, 4, 0.0, &mut rng);
        let blocked = random_grid(4, 4, 1.0, &mut rng);

        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(open.get(p(row, col)), Cell::Open);
                assert_eq!(blocked.get(p(row, col)), Cell::Blocked);
            }
        }
    }

    #[test]
    fn parse_img_thresholds_luminance() {
        let img = DynamicImage::ImageLuma8(image::GrayImage::from_fn(3, 2, |x, y| {
            if (x + y) % 2 == 0 {
                image::Luma([0u8])
            } else {
                image::Luma([255u8])
            }
        }));

        let grid = parse_img(&img).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.get(p(0, 0)), Cell::Blocked);
        assert_eq!(grid.get(p(0, 1)), Cell::Open);
        assert_eq!(grid.get(p(1, 0)), Cell::Open);
        assert_eq!(grid.get(p(1, 1)), Cell::Blocked);
    }
}
