//! Actions issued by our own units

use serde::{Deserialize, Serialize};

use crate::hex::Cell;
use crate::protocol::codes::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitActionKind {
    Move,
    Shoot,
}

/// MOVE or SHOOT for one vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitAction {
    pub kind: UnitActionKind,
    pub vehicle_id: u32,
    pub target: Cell,
}

/// MOVE/SHOOT request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitActionPayload {
    pub vehicle_id: u32,
    pub target: Cell,
}

impl UnitAction {
    pub fn move_to(vehicle_id: u32, target: Cell) -> Self {
        Self {
            kind: UnitActionKind::Move,
            vehicle_id,
            target,
        }
    }

    pub fn shoot(vehicle_id: u32, target: Cell) -> Self {
        Self {
            kind: UnitActionKind::Shoot,
            vehicle_id,
            target,
        }
    }

    pub fn protocol_action(&self) -> Action {
        match self.kind {
            UnitActionKind::Move => Action::Move,
            UnitActionKind::Shoot => Action::Shoot,
        }
    }

    pub fn payload(&self) -> UnitActionPayload {
        UnitActionPayload {
            vehicle_id: self.vehicle_id,
            target: self.target,
        }
    }
}
