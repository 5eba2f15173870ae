//! Anti-tank SPG: fires along the six straight lines, hitting every tank on
//! the chosen line

use ahash::AHashSet;

use crate::hex::Cell;
use crate::model::{GameMap, GameState};
use crate::strategy::behavior::{default_priority, seek_repair, DecisionContext, TankBehavior, UnitCore};
use crate::strategy::targeting::fire_lines;

#[derive(Debug, Clone)]
pub struct AtSpg {
    core: UnitCore,
}

impl AtSpg {
    pub fn new(core: UnitCore) -> Self {
        Self { core }
    }
}

impl TankBehavior for AtSpg {
    fn core(&self) -> &UnitCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut UnitCore {
        &mut self.core
    }

    /// Every cell of each line that holds at least one attackable tank
    fn targets_in_range(&self, state: &GameState, map: &GameMap) -> AHashSet<Cell> {
        fire_lines(&self.core.model, map)
            .into_iter()
            .filter(|line| line.iter().any(|cell| state.aggressive_tanks.contains_key(cell)))
            .flatten()
            .collect()
    }

    /// First cell of the line with the most attackable tanks; earlier lines win ties
    fn choose_target(
        &self,
        targets: &AHashSet<Cell>,
        state: &GameState,
        map: &GameMap,
    ) -> Option<Cell> {
        let mut best: Option<(Cell, usize)> = None;
        for line in fire_lines(&self.core.model, map) {
            let Some(first) = line.first().copied() else {
                continue;
            };
            let count = line
                .iter()
                .filter(|cell| targets.contains(*cell) && state.aggressive_tanks.contains_key(*cell))
                .count();
            if count > 0 && best.map_or(true, |(_, most)| count > most) {
                best = Some((first, count));
            }
        }
        best.map(|(cell, _)| cell)
    }

    fn set_priority(&mut self, ctx: &mut DecisionContext<'_>) {
        if !seek_repair(&mut self.core, &ctx.map.hard_repairs, ctx.state, ctx.map) {
            default_priority(&mut self.core, ctx);
        }
    }
}
