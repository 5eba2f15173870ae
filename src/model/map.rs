//! Static map parsed from the MAP response

use std::collections::HashMap;

use ahash::AHashSet;
use serde::Deserialize;
use serde_json::Value;

use crate::core::error::Result;
use crate::hex::Cell;
use crate::model::require;

/// Optional content categories; a missing key is an empty list
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MapContent {
    obstacle: Vec<Cell>,
    base: Vec<Cell>,
    catapult: Vec<Cell>,
    light_repair: Vec<Cell>,
    hard_repair: Vec<Cell>,
}

/// Terrain of one match, immutable after construction
#[derive(Debug, Clone, PartialEq)]
pub struct GameMap {
    /// Board radius plus one; the board is every cell within `size - 1` of the origin
    pub size: u32,
    pub name: String,
    pub cells: AHashSet<Cell>,
    pub obstacles: AHashSet<Cell>,
    pub base: AHashSet<Cell>,
    pub spawn_points: AHashSet<Cell>,
    pub light_repairs: AHashSet<Cell>,
    pub hard_repairs: AHashSet<Cell>,
    pub catapults: AHashSet<Cell>,
    /// Cells a vehicle may enter: the board minus obstacles and spawn points
    pub available_cells: AHashSet<Cell>,
}

impl GameMap {
    pub fn from_value(data: &Value) -> Result<Self> {
        let size: u32 = serde_json::from_value(require(data, "size")?.clone())?;
        let name: String = serde_json::from_value(require(data, "name")?.clone())?;
        let content: MapContent = serde_json::from_value(require(data, "content")?.clone())?;
        let spawn_lists: Vec<HashMap<String, Vec<Cell>>> =
            serde_json::from_value(require(data, "spawn_points")?.clone())?;

        let spawn_points: AHashSet<Cell> = spawn_lists
            .into_iter()
            .flat_map(|player| player.into_values())
            .flatten()
            .collect();

        let cells = Cell::ORIGIN.in_radius(size.saturating_sub(1));
        let obstacles: AHashSet<Cell> = content.obstacle.into_iter().collect();
        let available_cells = cells
            .iter()
            .filter(|cell| !obstacles.contains(*cell) && !spawn_points.contains(*cell))
            .copied()
            .collect();

        Ok(Self {
            size,
            name,
            cells,
            obstacles,
            base: content.base.into_iter().collect(),
            spawn_points,
            light_repairs: content.light_repair.into_iter().collect(),
            hard_repairs: content.hard_repair.into_iter().collect(),
            catapults: content.catapult.into_iter().collect(),
            available_cells,
        })
    }

    pub fn is_base(&self, cell: &Cell) -> bool {
        self.base.contains(cell)
    }
}
