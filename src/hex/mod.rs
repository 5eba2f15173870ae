//! Hex geometry: cube coordinates and pathfinding

pub mod cell;
pub mod pathfinding;

pub use cell::{farthest, nearest, Cell, AXIS_DIRECTIONS, NEIGHBOUR_OFFSETS};
pub use pathfinding::{find_path, furthest_free_step};
