use crate::find::{MapStorage, MapTrait, NodeReference};
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Occupancy state of a single grid cell
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Open,
    Blocked,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cell::Blocked => "X",
                Cell::Open => ".",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl NodeReference for Point {}

/// A MapTrait implementation that uses a rectangular grid of cells, stored in
/// a single flattened vector indexed by `row * columns + col`.
///
/// Cells only change through [Grid::set] and [Grid::toggle]; the dimensions
/// are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with all cells open
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![Cell::Open; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, node: Point) -> usize {
        debug_assert!(self.is_valid(node));
        node.row * self.columns + node.col
    }

    pub fn get(&self, node: Point) -> Cell {
        self.cells[self.index(node)]
    }

    pub fn set(&mut self, node: Point, cell: Cell) {
        let index = self.index(node);
        self.cells[index] = cell;
    }

    /// Flip the state of a single cell
    pub fn toggle(&mut self, node: Point) {
        let cell = match self.get(node) {
            Cell::Open => Cell::Blocked,
            Cell::Blocked => Cell::Open,
        };
        self.set(node, cell);
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.columns) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl MapTrait for Grid {
    type Reference = Point;
    type Storage<T: Default + Copy + Clone + 'static> = CellStorage<T>;

    fn is_valid(&self, node: Point) -> bool {
        node.row < self.rows && node.col < self.columns
    }

    fn is_open(&self, node: Point) -> bool {
        self.is_valid(node) && self.get(node) == Cell::Open
    }

    fn neighbors_of(&self, node: Point) -> impl Iterator<Item = Point> {
        // fixed expansion order (down, right, up, left) so that ties between
        // equally short paths always resolve the same way
        let mut points = Vec::with_capacity(4);

        if !self.is_open(node) {
            return points.into_iter();
        }

        if node.row < self.rows - 1 {
            points.push(Point {
                row: node.row + 1,
                col: node.col,
            });
        }
        if node.col < self.columns - 1 {
            points.push(Point {
                row: node.row,
                col: node.col + 1,
            });
        }
        if node.row > 0 {
            points.push(Point {
                row: node.row - 1,
                col: node.col,
            });
        }
        if node.col > 0 {
            points.push(Point {
                row: node.row,
                col: node.col - 1,
            });
        }

        // filter to only keep cells that can be entered
        points.retain(|p| self.is_open(*p));

        points.into_iter()
    }

    fn create_storage<T: Default + Copy + Clone + 'static>(&self) -> Self::Storage<T> {
        CellStorage {
            columns: self.columns,
            cells: vec![Default::default(); self.rows * self.columns],
        }
    }
}

/// A MapStorage with the same dimensions and flattened indexing as the grid
/// it was created from
#[derive(Debug, Clone)]
pub struct CellStorage<T> {
    columns: usize,
    cells: Vec<T>,
}

impl<T: Copy + 'static> MapStorage<T> for CellStorage<T> {
    type Reference = Point;

    fn is_valid(&self, node: Point) -> bool {
        node.col < self.columns && node.row * self.columns + node.col < self.cells.len()
    }

    fn get(&self, node: Point) -> T {
        self.cells[node.row * self.columns + node.col]
    }

    fn get_mut(&mut self, node: Point) -> &mut T {
        &mut self.cells[node.row * self.columns + node.col]
    }
}

impl<T: Display> Display for CellStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.columns) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn p(row: usize, col: usize) -> Point {
        Point { row, col }
    }

    #[test]
    fn new_grid_is_all_open() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.columns(), 4);
        for row in 0..3 {
            for col in 0..4 {
                assert_eq!(grid.get(p(row, col)), Cell::Open);
            }
        }
    }

    #[test]
    fn set_and_toggle_change_only_the_addressed_cell() {
        let mut grid = Grid::new(2, 3);

        grid.set(p(1, 0), Cell::Blocked);
        assert_eq!(grid.get(p(1, 0)), Cell::Blocked);
        // neighbors in the flattened vector stay untouched
        assert_eq!(grid.get(p(0, 2)), Cell::Open);
        assert_eq!(grid.get(p(1, 1)), Cell::Open);

        grid.toggle(p(1, 0));
        assert_eq!(grid.get(p(1, 0)), Cell::Open);
        grid.toggle(p(1, 0));
        assert_eq!(grid.get(p(1, 0)), Cell::Blocked);
    }

    #[test]
    fn neighbor_order_is_down_right_up_left() {
        let grid = Grid::new(3, 3);

        let neighbors: Vec<Point> = grid.neighbors_of(p(1, 1)).collect();
        assert_eq!(neighbors, vec![p(2, 1), p(1, 2), p(0, 1), p(1, 0)]);
    }

    #[test]
    fn corner_cells_have_two_neighbors() {
        let grid = Grid::new(3, 3);

        let neighbors: Vec<Point> = grid.neighbors_of(p(0, 0)).collect();
        assert_eq!(neighbors, vec![p(1, 0), p(0, 1)]);

        let neighbors: Vec<Point> = grid.neighbors_of(p(2, 2)).collect();
        assert_eq!(neighbors, vec![p(2, 1), p(1, 2)]);
    }

    #[test]
    fn blocked_cells_are_not_neighbors() {
        let mut grid = Grid::new(3, 3);
        grid.set(p(2, 1), Cell::Blocked);
        grid.set(p(1, 0), Cell::Blocked);

        let neighbors: Vec<Point> = grid.neighbors_of(p(1, 1)).collect();
        assert_eq!(neighbors, vec![p(1, 2), p(0, 1)]);
    }

    #[test]
    fn blocked_cells_have_no_neighbors() {
        let mut grid = Grid::new(3, 3);
        grid.set(p(1, 1), Cell::Blocked);

        assert_eq!(grid.neighbors_of(p(1, 1)).count(), 0);
    }

    #[test]
    fn storage_reads_back_what_was_written() {
        let grid = Grid::new(2, 3);
        let mut storage = grid.create_storage::<usize>();

        *storage.get_mut(p(0, 2)) = 7;
        *storage.get_mut(p(1, 0)) = 9;

        assert_eq!(storage.get(p(0, 2)), 7);
        assert_eq!(storage.get(p(1, 0)), 9);
        assert_eq!(storage.get(p(0, 0)), 0);

        assert!(storage.is_valid(p(1, 2)));
        assert!(!storage.is_valid(p(2, 0)));
        assert!(!storage.is_valid(p(0, 3)));
    }

    #[test]
    fn display_renders_rows() {
        let mut grid = Grid::new(2, 3);
        grid.set(p(0, 1), Cell::Blocked);
        grid.set(p(1, 2), Cell::Blocked);

        assert_eq!(grid.to_string(), ".X.\n..X\n");
    }
}
