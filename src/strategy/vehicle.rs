//! One controllable unit of any kind

use crate::hex::Cell;
use crate::model::{TankModel, UnitAction, VehicleType};
use crate::strategy::at_spg::AtSpg;
use crate::strategy::behavior::{DecisionContext, TankBehavior, UnitCore};
use crate::strategy::heavy_tank::HeavyTank;
use crate::strategy::light_tank::LightTank;
use crate::strategy::medium_tank::MediumTank;
use crate::strategy::spg::Spg;

#[derive(Debug, Clone)]
pub enum Vehicle {
    Spg(Spg),
    LightTank(LightTank),
    HeavyTank(HeavyTank),
    MediumTank(MediumTank),
    AtSpg(AtSpg),
}

impl Vehicle {
    /// Pick the behavior matching the model's vehicle type
    pub fn build(unit_id: u32, model: TankModel) -> Self {
        let kind = model.vehicle_type;
        let core = UnitCore::new(unit_id, model);
        match kind {
            VehicleType::Spg => Vehicle::Spg(Spg::new(core)),
            VehicleType::LightTank => Vehicle::LightTank(LightTank::new(core)),
            VehicleType::HeavyTank => Vehicle::HeavyTank(HeavyTank::new(core)),
            VehicleType::MediumTank => Vehicle::MediumTank(MediumTank::new(core)),
            VehicleType::AtSpg => Vehicle::AtSpg(AtSpg::new(core)),
        }
    }

    fn behavior(&self) -> &dyn TankBehavior {
        match self {
            Vehicle::Spg(unit) => unit,
            Vehicle::LightTank(unit) => unit,
            Vehicle::HeavyTank(unit) => unit,
            Vehicle::MediumTank(unit) => unit,
            Vehicle::AtSpg(unit) => unit,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn TankBehavior {
        match self {
            Vehicle::Spg(unit) => unit,
            Vehicle::LightTank(unit) => unit,
            Vehicle::HeavyTank(unit) => unit,
            Vehicle::MediumTank(unit) => unit,
            Vehicle::AtSpg(unit) => unit,
        }
    }

    pub fn unit_id(&self) -> u32 {
        self.behavior().core().unit_id
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.behavior().core().model.vehicle_type
    }

    pub fn priority(&self) -> Option<Cell> {
        self.behavior().core().priority
    }

    pub fn make_turn(&mut self, ctx: &mut DecisionContext<'_>) -> Option<UnitAction> {
        self.behavior_mut().make_turn(ctx)
    }
}
