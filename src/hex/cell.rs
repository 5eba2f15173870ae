//! Cube coordinates for the hex board
//!
//! Every cell satisfies `x + y + z == 0`. The board centre is the origin.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::error::BotError;

/// Offsets of the six neighbours, in the order used for path expansion
pub const NEIGHBOUR_OFFSETS: [(i32, i32, i32); 6] = [
    (-1, 0, 1),
    (-1, 1, 0),
    (0, -1, 1),
    (0, 1, -1),
    (1, -1, 0),
    (1, 0, -1),
];

/// Unit steps of the six straight fire lines: x+, x-, y+, y-, z+, z-
pub const AXIS_DIRECTIONS: [(i32, i32, i32); 6] = [
    (1, 0, -1),
    (-1, 0, 1),
    (-1, 1, 0),
    (1, -1, 0),
    (0, -1, 1),
    (0, 1, -1),
];

/// Cube coordinate of one hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCell")]
pub struct Cell {
    x: i32,
    y: i32,
    z: i32,
}

#[derive(Deserialize)]
struct RawCell {
    x: i32,
    y: i32,
    z: i32,
}

impl TryFrom<RawCell> for Cell {
    type Error = BotError;

    fn try_from(raw: RawCell) -> Result<Self, Self::Error> {
        Cell::try_new(raw.x, raw.y, raw.z)
    }
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0, z: 0 };

    /// Panics when the components do not sum to zero.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        assert!(
            x + y + z == 0,
            "cube coordinate ({x}, {y}, {z}) does not sum to zero"
        );
        Self { x, y, z }
    }

    pub fn try_new(x: i32, y: i32, z: i32) -> Result<Self, BotError> {
        if x + y + z == 0 {
            Ok(Self { x, y, z })
        } else {
            Err(BotError::InvalidCell { x, y, z })
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    /// Hex distance: the largest component difference
    pub fn distance(&self, other: &Self) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        dx.max(dy).max(dz)
    }

    /// Shift by `(dx, dy, dz)`; the offset must itself sum to zero
    pub fn offset(&self, (dx, dy, dz): (i32, i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// The six adjacent cells
    pub fn neighbours(&self) -> [Cell; 6] {
        NEIGHBOUR_OFFSETS.map(|offset| self.offset(offset))
    }

    pub fn is_neighbour(&self, other: &Self) -> bool {
        self.distance(other) == 1
    }

    /// All cells within `radius`, including self
    pub fn in_radius(&self, radius: u32) -> AHashSet<Cell> {
        let radius = radius as i32;
        let mut result = AHashSet::new();
        for dx in -radius..=radius {
            for dy in (-radius).max(-dx - radius)..=radius.min(-dx + radius) {
                result.insert(self.offset((dx, dy, -dx - dy)));
            }
        }
        result
    }

    /// Cells within `big_radius` but farther than `small_radius`
    pub fn in_radius_excl(&self, small_radius: u32, big_radius: u32) -> AHashSet<Cell> {
        let inner = self.in_radius(small_radius);
        self.in_radius(big_radius)
            .into_iter()
            .filter(|cell| !inner.contains(cell))
            .collect()
    }

    /// Six straight rays of `radius` cells, nearest first, in `AXIS_DIRECTIONS` order
    pub fn normal_directions(&self, radius: u32) -> [Vec<Cell>; 6] {
        AXIS_DIRECTIONS.map(|(dx, dy, dz)| {
            (1..=radius as i32)
                .map(|d| self.offset((dx * d, dy * d, dz * d)))
                .collect()
        })
    }

    /// Rays from `normal_directions`, each cut before its first blocked cell
    pub fn clipped_directions(&self, radius: u32, blocked: &AHashSet<Cell>) -> [Vec<Cell>; 6] {
        self.normal_directions(radius).map(|ray| {
            ray.into_iter()
                .take_while(|cell| !blocked.contains(cell))
                .collect()
        })
    }

    /// The clipped ray whose first cell is `through`, empty if none starts there
    pub fn clipped_ray_through(
        &self,
        through: &Cell,
        radius: u32,
        blocked: &AHashSet<Cell>,
    ) -> Vec<Cell> {
        self.clipped_directions(radius, blocked)
            .into_iter()
            .find(|ray| ray.first() == Some(through))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Closest cell to `from`; ties resolve to the lowest cell
pub fn nearest<'a>(cells: impl IntoIterator<Item = &'a Cell>, from: &Cell) -> Option<Cell> {
    cells
        .into_iter()
        .min_by_key(|cell| (cell.distance(from), **cell))
        .copied()
}

/// Most distant cell from `from`; ties resolve to the lowest cell
pub fn farthest<'a>(cells: impl IntoIterator<Item = &'a Cell>, from: &Cell) -> Option<Cell> {
    cells
        .into_iter()
        .min_by_key(|cell| (std::cmp::Reverse(cell.distance(from)), **cell))
        .copied()
}
