use pathfind::find::{find_path, MapStorage, MapTrait, PathFinderState};
use pathfind::grid::{Cell, Grid, Point};
use pathfind::util::{parse_ascii, parse_img};

const DEMO_MAZE: &str = "\
..X.......
..X.XXXX..
..X.X..X..
....X..X..
XXXXX..X..
.......X..
.XXXXXXX..
..........
.XXXX.XXXX
..........";

fn load_grid() -> Result<Grid, anyhow::Error> {
    match std::env::args().nth(1) {
        Some(path) => {
            let img = image::open(path)?;
            parse_img(&img)
        }
        None => parse_ascii(DEMO_MAZE),
    }
}

fn main() -> Result<(), anyhow::Error> {
    let grid = load_grid()?;

    println!("{}", grid);

    let start = Point { row: 0, col: 0 };
    let goal = Point {
        row: grid.rows() - 1,
        col: grid.columns() - 1,
    };

    match find_path(&grid, start, goal)? {
        PathFinderState::PathFound(result) => {
            println!(
                "found a path of {} cells ({} steps):",
                result.path.len(),
                result.distance
            );

            let mut on_path = grid.create_storage::<bool>();
            for point in &result.path {
                *on_path.get_mut(*point) = true;
            }

            for row in 0..grid.rows() {
                for col in 0..grid.columns() {
                    let point = Point { row, col };
                    let c = if point == start {
                        'S'
                    } else if point == goal {
                        'G'
                    } else if on_path.get(point) {
                        '*'
                    } else if grid.get(point) == Cell::Blocked {
                        'X'
                    } else {
                        '.'
                    };
                    print!("{}", c);
                }
                println!();
            }
        }
        PathFinderState::NoPathFound => println!("no path found"),
        PathFinderState::Computing => unreachable!("find_path runs to completion"),
    }

    Ok(())
}
