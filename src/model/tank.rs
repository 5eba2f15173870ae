//! One vehicle as reported by the server

use serde::{Deserialize, Serialize};

use crate::hex::Cell;
use crate::model::vehicle_type::{VehicleStats, VehicleType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankModel {
    pub player_id: u32,
    pub vehicle_type: VehicleType,
    pub health: u32,
    #[serde(rename = "position")]
    pub coordinates: Cell,
    #[serde(rename = "spawn_position")]
    pub spawn_point: Cell,
    #[serde(default)]
    pub capture_points: u32,
    #[serde(default)]
    pub shoot_range_bonus: u32,
}

impl TankModel {
    pub fn stats(&self) -> &'static VehicleStats {
        self.vehicle_type.stats()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_damaged(&self) -> bool {
        self.health < self.stats().max_health
    }

    /// Max range including the catapult bonus
    pub fn max_range(&self) -> u32 {
        self.stats().max_range + self.shoot_range_bonus
    }
}
