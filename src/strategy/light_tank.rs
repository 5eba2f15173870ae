//! Light tank: grabs a catapult for the range bonus, avoids enemy fire

use ahash::AHashSet;

use crate::hex::{nearest, Cell};
use crate::strategy::behavior::{
    default_priority, safe_neighbour, step_toward_priority, DecisionContext, TankBehavior, UnitCore,
};
use crate::strategy::targeting::hot_cells;

#[derive(Debug, Clone)]
pub struct LightTank {
    core: UnitCore,
}

impl LightTank {
    pub fn new(core: UnitCore) -> Self {
        Self { core }
    }
}

impl TankBehavior for LightTank {
    fn core(&self) -> &UnitCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut UnitCore {
        &mut self.core
    }

    fn set_priority(&mut self, ctx: &mut DecisionContext<'_>) {
        if self.core.model.shoot_range_bonus == 0 {
            let active = ctx
                .map
                .catapults
                .iter()
                .filter(|cell| !ctx.state.inactive_catapults.contains(*cell));
            if let Some(catapult) = nearest(active, &self.core.model.spawn_point) {
                self.core.priority = Some(catapult);
                return;
            }
        }
        default_priority(&mut self.core, ctx);
    }

    fn move_to_priority(&mut self, ctx: &mut DecisionContext<'_>) -> Option<Cell> {
        let step = step_toward_priority(&self.core, ctx.state, ctx.map);
        let hot = hot_cells(ctx.state, ctx.map);
        if !step.is_some_and(|cell| hot.contains(&cell)) {
            return step;
        }

        // Retarget to the safe cell in reach closest to the first goal
        let (state, map) = (ctx.state, ctx.map);
        let coordinates = self.core.model.coordinates;
        let reachable_safe: AHashSet<Cell> = coordinates
            .in_radius(self.core.stats.speed)
            .into_iter()
            .filter(|cell| {
                map.available_cells.contains(cell)
                    && !state.tank_cells.contains(cell)
                    && !hot.contains(cell)
            })
            .collect();

        let mut step = step;
        if let Some(goal) = self.core.priority {
            if let Some(safe) = nearest(&reachable_safe, &goal) {
                self.core.priority = Some(safe);
                step = step_toward_priority(&self.core, state, map);
            }
        }

        match step {
            Some(cell) if hot.contains(&cell) => {
                safe_neighbour(&self.core, state, map, &hot).or(Some(cell))
            }
            other => other,
        }
    }
}
