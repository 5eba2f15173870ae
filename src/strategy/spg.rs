//! Self-propelled gun: generic play, but sidesteps cells enemies can hit

use crate::hex::Cell;
use crate::strategy::behavior::{safe_neighbour, step_toward_priority, DecisionContext, TankBehavior, UnitCore};
use crate::strategy::targeting::hot_cells;

#[derive(Debug, Clone)]
pub struct Spg {
    core: UnitCore,
}

impl Spg {
    pub fn new(core: UnitCore) -> Self {
        Self { core }
    }
}

impl TankBehavior for Spg {
    fn core(&self) -> &UnitCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut UnitCore {
        &mut self.core
    }

    fn move_to_priority(&mut self, ctx: &mut DecisionContext<'_>) -> Option<Cell> {
        let step = step_toward_priority(&self.core, ctx.state, ctx.map)?;
        let hot = hot_cells(ctx.state, ctx.map);
        if !hot.contains(&step) {
            return Some(step);
        }
        safe_neighbour(&self.core, ctx.state, ctx.map, &hot).or(Some(step))
    }
}
