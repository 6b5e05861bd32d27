//! Breadth-first pathfinding over a 2D occupancy grid.
//!
//! [grid::Grid] holds the occupancy matrix, [find::PathFinder] walks it, and
//! [util] builds grids from images, ASCII sketches or random noise.

pub mod find;
pub mod grid;
pub mod util;
