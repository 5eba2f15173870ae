//! Greedy best-first pathfinding over a set of walkable cells
//!
//! The hex distance to the goal is the only priority. Equal priorities are
//! expanded in insertion order, so results are reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};

use crate::hex::cell::Cell;

/// Node in the open set
#[derive(Debug, Clone)]
struct PathNode {
    cell: Cell,
    heuristic: u32,
    sequence: u64,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.heuristic == other.heuristic && self.sequence == other.sequence
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .heuristic
            .cmp(&self.heuristic)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a path from `start` to `goal` through `cells`
///
/// The returned path excludes `start` and ends at `goal`; it is empty when
/// `start == goal`. Returns None if the goal cannot be reached. `start`
/// itself does not need to be in `cells`.
pub fn find_path(cells: &AHashSet<Cell>, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if start == goal {
        return Some(Vec::new());
    }

    let mut open_set = BinaryHeap::new();
    let mut open_cells: AHashSet<Cell> = AHashSet::new();
    let mut explored: AHashSet<Cell> = AHashSet::new();
    let mut came_from: AHashMap<Cell, Cell> = AHashMap::new();
    let mut sequence = 0u64;

    open_set.push(PathNode {
        cell: start,
        heuristic: start.distance(&goal),
        sequence,
    });
    open_cells.insert(start);

    while let Some(current) = open_set.pop() {
        if current.cell == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        open_cells.remove(&current.cell);
        explored.insert(current.cell);

        for neighbour in current.cell.neighbours() {
            if explored.contains(&neighbour)
                || open_cells.contains(&neighbour)
                || !cells.contains(&neighbour)
            {
                continue;
            }
            sequence += 1;
            came_from.insert(neighbour, current.cell);
            open_cells.insert(neighbour);
            open_set.push(PathNode {
                cell: neighbour,
                heuristic: neighbour.distance(&goal),
                sequence,
            });
        }
    }

    None
}

/// Walk `came_from` back from the goal, dropping the start cell
fn reconstruct_path(came_from: &AHashMap<Cell, Cell>, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

impl Cell {
    /// Path from self to `goal` over `cells`, see [`find_path`]
    pub fn a_star(&self, cells: &AHashSet<Cell>, goal: Cell) -> Option<Vec<Cell>> {
        find_path(cells, *self, goal)
    }
}

/// Furthest cell along `path` within `budget` steps that is not occupied
///
/// Backs off one step at a time toward the start when the cell at the
/// budget limit is taken.
pub fn furthest_free_step(path: &[Cell], budget: u32, occupied: &AHashSet<Cell>) -> Option<Cell> {
    let reach = (budget as usize).min(path.len());
    path[..reach]
        .iter()
        .rev()
        .find(|cell| !occupied.contains(*cell))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(i32, i32, i32)]) -> Vec<Cell> {
        list.iter().map(|&(x, y, z)| Cell::new(x, y, z)).collect()
    }

    #[test]
    fn test_pathfind_around_ring() {
        let ring = Cell::ORIGIN.in_radius_excl(2, 3);
        let path = Cell::new(0, 3, -3).a_star(&ring, Cell::new(-1, -2, 3));

        let expected = cells(&[
            (-1, 3, -2),
            (-2, 3, -1),
            (-3, 3, 0),
            (-3, 2, 1),
            (-3, 1, 2),
            (-3, 0, 3),
            (-2, -1, 3),
            (-1, -2, 3),
        ]);
        assert_eq!(path, Some(expected));
    }

    #[test]
    fn test_pathfind_around_ring_short_way() {
        let ring = Cell::ORIGIN.in_radius_excl(2, 3);
        let path = Cell::new(0, 3, -3).a_star(&ring, Cell::new(-2, -1, 3));

        let expected = cells(&[
            (-1, 3, -2),
            (-2, 3, -1),
            (-3, 3, 0),
            (-3, 2, 1),
            (-3, 1, 2),
            (-3, 0, 3),
            (-2, -1, 3),
        ]);
        assert_eq!(path, Some(expected));
    }

    #[test]
    fn test_pathfind_open_board() {
        let board = Cell::ORIGIN.in_radius(4);
        let start = Cell::new(-3, 0, 3);
        let path = start.a_star(&board, Cell::ORIGIN).unwrap();

        assert_eq!(path, cells(&[(-2, 0, 2), (-1, 0, 1), (0, 0, 0)]));
    }

    #[test]
    fn test_pathfind_same_start_goal() {
        let board = Cell::ORIGIN.in_radius(2);
        assert_eq!(Cell::ORIGIN.a_star(&board, Cell::ORIGIN), Some(Vec::new()));
    }

    #[test]
    fn test_pathfind_no_path() {
        let mut board = Cell::ORIGIN.in_radius(4);
        let goal = Cell::new(2, -2, 0);
        for neighbour in goal.neighbours() {
            board.remove(&neighbour);
        }
        assert_eq!(Cell::new(-3, 0, 3).a_star(&board, goal), None);
    }

    #[test]
    fn test_goal_outside_cells_unreachable() {
        let board = Cell::ORIGIN.in_radius(2);
        assert_eq!(Cell::ORIGIN.a_star(&board, Cell::new(5, -5, 0)), None);
    }

    #[test]
    fn test_furthest_free_step() {
        let path = cells(&[(1, -1, 0), (2, -2, 0), (3, -3, 0)]);
        let mut occupied = AHashSet::new();

        assert_eq!(furthest_free_step(&path, 2, &occupied), Some(Cell::new(2, -2, 0)));
        assert_eq!(furthest_free_step(&path, 5, &occupied), Some(Cell::new(3, -3, 0)));

        occupied.insert(Cell::new(2, -2, 0));
        assert_eq!(furthest_free_step(&path, 2, &occupied), Some(Cell::new(1, -1, 0)));

        occupied.insert(Cell::new(1, -1, 0));
        assert_eq!(furthest_free_step(&path, 2, &occupied), None);
        assert_eq!(furthest_free_step(&[], 3, &occupied), None);
    }
}
