//! Heavy tank: generic play, falls back to hard repair when damaged

use crate::strategy::behavior::{default_priority, seek_repair, DecisionContext, TankBehavior, UnitCore};

#[derive(Debug, Clone)]
pub struct HeavyTank {
    core: UnitCore,
}

impl HeavyTank {
    pub fn new(core: UnitCore) -> Self {
        Self { core }
    }
}

impl TankBehavior for HeavyTank {
    fn core(&self) -> &UnitCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut UnitCore {
        &mut self.core
    }

    fn set_priority(&mut self, ctx: &mut DecisionContext<'_>) {
        if !seek_repair(&mut self.core, &ctx.map.hard_repairs, ctx.state, ctx.map) {
            default_priority(&mut self.core, ctx);
        }
    }
}
