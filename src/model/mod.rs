//! Game model: static map, per-turn state and balance data

pub mod action;
pub mod map;
pub mod state;
pub mod tank;
pub mod vehicle_type;

pub use action::{UnitAction, UnitActionKind, UnitActionPayload};
pub use map::GameMap;
pub use state::{non_neutral_players, GameState, PlayerInfo, WinPoints};
pub use tank::TankModel;
pub use vehicle_type::{VehicleStats, VehicleType, MAX_CAPTURE_POINTS, MAX_CATAPULT_USAGE};

use serde_json::Value;

use crate::core::error::{BotError, Result};

/// Look up a key the server must always send
pub(crate) fn require<'a>(data: &'a Value, key: &'static str) -> Result<&'a Value> {
    data.get(key).ok_or(BotError::MissingKey(key))
}
