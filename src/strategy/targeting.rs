//! Fire geometry shared by our units and the danger map of enemy units

use ahash::AHashSet;

use crate::hex::Cell;
use crate::model::{GameMap, GameState, TankModel};

/// Cells a ring-firing tank can hit: farther than min range, within max range
pub fn fire_area(tank: &TankModel) -> AHashSet<Cell> {
    tank.coordinates
        .in_radius_excl(tank.stats().min_range, tank.max_range())
}

/// Straight fire lines of a line-firing tank, cut at obstacles
pub fn fire_lines(tank: &TankModel, map: &GameMap) -> [Vec<Cell>; 6] {
    tank.coordinates
        .clipped_directions(tank.max_range(), &map.obstacles)
}

/// Every cell `tank` could hit next turn
pub fn threat_area(tank: &TankModel, map: &GameMap) -> AHashSet<Cell> {
    if tank.vehicle_type.fires_in_lines() {
        fire_lines(tank, map).into_iter().flatten().collect()
    } else {
        fire_area(tank)
    }
}

/// Cells inside the fire area of any living enemy tank
pub fn hot_cells(state: &GameState, map: &GameMap) -> AHashSet<Cell> {
    let mut hot = AHashSet::new();
    for tank in state.enemy_tanks.values().filter(|tank| tank.is_alive()) {
        hot.extend(threat_area(tank, map));
    }
    hot
}
