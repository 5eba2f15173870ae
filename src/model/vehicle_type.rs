//! Vehicle types and their balance numbers
//!
//! All tunable values in one static table, keyed by type.

use serde::{Deserialize, Serialize};

/// How many times a catapult can be used before it goes inactive
pub const MAX_CATAPULT_USAGE: usize = 3;

/// Capture points a player needs to win by holding the base
pub const MAX_CAPTURE_POINTS: u32 = 6;

/// Kind of vehicle, as named by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Spg,
    LightTank,
    HeavyTank,
    MediumTank,
    AtSpg,
}

/// Fixed per-type characteristics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleStats {
    pub max_health: u32,
    /// Cells per move
    pub speed: u32,
    /// Inner radius that cannot be hit; fire reaches distances above it
    pub min_range: u32,
    pub max_range: u32,
    pub damage: u32,
    /// Position in the server's per-turn move order, 1 moves first
    pub turn_order: u32,
}

const SPG: VehicleStats = VehicleStats {
    max_health: 1,
    speed: 1,
    min_range: 2,
    max_range: 3,
    damage: 1,
    turn_order: 1,
};

const LIGHT_TANK: VehicleStats = VehicleStats {
    max_health: 1,
    speed: 3,
    min_range: 1,
    max_range: 2,
    damage: 1,
    turn_order: 2,
};

const HEAVY_TANK: VehicleStats = VehicleStats {
    max_health: 3,
    speed: 1,
    min_range: 0,
    max_range: 2,
    damage: 1,
    turn_order: 3,
};

const MEDIUM_TANK: VehicleStats = VehicleStats {
    max_health: 2,
    speed: 2,
    min_range: 1,
    max_range: 2,
    damage: 1,
    turn_order: 4,
};

const AT_SPG: VehicleStats = VehicleStats {
    max_health: 2,
    speed: 1,
    min_range: 0,
    max_range: 3,
    damage: 1,
    turn_order: 5,
};

impl VehicleType {
    pub fn stats(&self) -> &'static VehicleStats {
        match self {
            VehicleType::Spg => &SPG,
            VehicleType::LightTank => &LIGHT_TANK,
            VehicleType::HeavyTank => &HEAVY_TANK,
            VehicleType::MediumTank => &MEDIUM_TANK,
            VehicleType::AtSpg => &AT_SPG,
        }
    }

    /// Fires along the six straight lines instead of a ring
    pub fn fires_in_lines(&self) -> bool {
        matches!(self, VehicleType::AtSpg)
    }

    pub fn all() -> [VehicleType; 5] {
        [
            VehicleType::Spg,
            VehicleType::LightTank,
            VehicleType::HeavyTank,
            VehicleType::MediumTank,
            VehicleType::AtSpg,
        ]
    }
}
