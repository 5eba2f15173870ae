//! Shared per-unit turn algorithm
//!
//! Each turn a unit refreshes its model, shoots if it can, otherwise picks a
//! priority cell and steps toward it. Vehicle kinds override single steps;
//! the free functions here are the generic versions they fall back to.

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::core::config::StrategyConfig;
use crate::hex::{farthest, furthest_free_step, nearest, Cell};
use crate::model::{
    GameMap, GameState, TankModel, UnitAction, VehicleStats, MAX_CAPTURE_POINTS,
};
use crate::strategy::targeting::fire_area;

/// Everything a unit may read while deciding, plus the session RNG
pub struct DecisionContext<'a> {
    pub state: &'a GameState,
    pub map: &'a GameMap,
    pub config: &'a StrategyConfig,
    pub rng: &'a mut ChaCha8Rng,
}

/// Data every vehicle kind carries
#[derive(Debug, Clone)]
pub struct UnitCore {
    pub unit_id: u32,
    pub model: TankModel,
    pub stats: &'static VehicleStats,
    /// Goal cell for this turn; None means stay
    pub priority: Option<Cell>,
}

impl UnitCore {
    pub fn new(unit_id: u32, model: TankModel) -> Self {
        let stats = model.stats();
        Self {
            unit_id,
            model,
            stats,
            priority: None,
        }
    }
}

/// Trait for per-kind vehicle strategies
pub trait TankBehavior {
    fn core(&self) -> &UnitCore;

    fn core_mut(&mut self) -> &mut UnitCore;

    /// Pull our latest model; false when the unit is gone or destroyed
    fn refresh(&mut self, state: &GameState) -> bool {
        let core = self.core_mut();
        match state.our_tanks.get(&core.unit_id) {
            Some(model) => {
                core.model = model.clone();
                model.is_alive()
            }
            None => false,
        }
    }

    /// Cells holding attackable tanks this unit can hit right now
    fn targets_in_range(&self, state: &GameState, _map: &GameMap) -> AHashSet<Cell> {
        fire_area(&self.core().model)
            .into_iter()
            .filter(|cell| state.aggressive_tanks.contains_key(cell))
            .collect()
    }

    fn choose_target(
        &self,
        targets: &AHashSet<Cell>,
        state: &GameState,
        map: &GameMap,
    ) -> Option<Cell> {
        choose_target(self.core(), targets, state, map)
    }

    fn set_priority(&mut self, ctx: &mut DecisionContext<'_>) {
        default_priority(self.core_mut(), ctx);
    }

    fn move_to_priority(&mut self, ctx: &mut DecisionContext<'_>) -> Option<Cell> {
        step_toward_priority(self.core(), ctx.state, ctx.map)
    }

    /// One action for this turn, or None to pass
    fn make_turn(&mut self, ctx: &mut DecisionContext<'_>) -> Option<UnitAction> {
        if !self.refresh(ctx.state) {
            return None;
        }
        let unit_id = self.core().unit_id;

        let targets = self.targets_in_range(ctx.state, ctx.map);
        if let Some(target) = self.choose_target(&targets, ctx.state, ctx.map) {
            tracing::debug!("Vehicle {} shoots {}", unit_id, target);
            return Some(UnitAction::shoot(unit_id, target));
        }

        self.set_priority(ctx);
        let step = self.move_to_priority(ctx);
        match step {
            Some(cell) => {
                tracing::debug!(
                    "Vehicle {} moves to {} (priority {:?})",
                    unit_id,
                    cell,
                    self.core().priority
                );
                Some(UnitAction::move_to(unit_id, cell))
            }
            None => {
                tracing::debug!("Vehicle {} passes", unit_id);
                None
            }
        }
    }
}

/// Generic target choice
///
/// Killable on a base cell, then killable, then on a base cell, then the
/// lowest remaining cell.
pub fn choose_target(
    core: &UnitCore,
    targets: &AHashSet<Cell>,
    state: &GameState,
    map: &GameMap,
) -> Option<Cell> {
    let mut sorted: Vec<Cell> = targets.iter().copied().collect();
    sorted.sort();

    let killable = |cell: &Cell| {
        state
            .aggressive_tanks
            .get(cell)
            .is_some_and(|health| *health <= core.stats.damage)
    };

    sorted
        .iter()
        .find(|cell| killable(*cell) && map.is_base(cell))
        .or_else(|| sorted.iter().find(|cell| killable(*cell)))
        .or_else(|| sorted.iter().find(|cell| map.is_base(cell)))
        .or_else(|| sorted.first())
        .copied()
}

/// Generic priority: hold the base, fill the base, or roam
pub fn default_priority(core: &mut UnitCore, ctx: &mut DecisionContext<'_>) {
    let coordinates = core.model.coordinates;
    core.priority = None;
    if ctx.map.is_base(&coordinates) {
        return;
    }

    if ctx.state.our_units_on_base(ctx.map) < ctx.config.base_squad_size {
        let empty_base = ctx
            .map
            .base
            .iter()
            .filter(|cell| !ctx.state.tank_cells.contains(*cell));
        core.priority = farthest(empty_base, &core.model.spawn_point);
    }

    if core.priority.is_none() || core.priority == Some(coordinates) {
        core.priority = random_free_cell(ctx);
    }
}

/// Random unoccupied non-base cell
fn random_free_cell(ctx: &mut DecisionContext<'_>) -> Option<Cell> {
    let mut free: Vec<Cell> = ctx
        .map
        .available_cells
        .iter()
        .filter(|cell| !ctx.state.tank_cells.contains(*cell) && !ctx.map.is_base(cell))
        .copied()
        .collect();
    free.sort();
    free.choose(&mut *ctx.rng).copied()
}

/// Whether staying put completes the capture this turn
pub fn is_capturing_base(core: &UnitCore, state: &GameState, map: &GameMap) -> bool {
    let needed = MAX_CAPTURE_POINTS.saturating_sub(state.total_capture_points()) as usize;
    map.is_base(&core.model.coordinates) && state.our_units_on_base(map) >= needed
}

/// Point a damaged unit at the nearest repair cell
///
/// Returns false when the unit is healthy, is completing a capture, or there
/// are no repair cells.
pub fn seek_repair(core: &mut UnitCore, repairs: &AHashSet<Cell>, state: &GameState, map: &GameMap) -> bool {
    if !core.model.is_damaged() || is_capturing_base(core, state, map) {
        return false;
    }
    match nearest(repairs, &core.model.coordinates) {
        Some(cell) => {
            core.priority = Some(cell);
            true
        }
        None => false,
    }
}

/// Furthest free cell toward the priority within this unit's speed
pub fn step_toward_priority(core: &UnitCore, state: &GameState, map: &GameMap) -> Option<Cell> {
    let priority = core.priority?;
    let mut walkable: AHashSet<Cell> = map
        .available_cells
        .iter()
        .filter(|cell| !state.tank_cells.contains(*cell))
        .copied()
        .collect();
    walkable.insert(priority);

    let path = core.model.coordinates.a_star(&walkable, priority)?;
    furthest_free_step(&path, core.stats.speed, &state.tank_cells)
}

/// Free neighbour outside `hot`, nearest the priority
pub fn safe_neighbour(
    core: &UnitCore,
    state: &GameState,
    map: &GameMap,
    hot: &AHashSet<Cell>,
) -> Option<Cell> {
    let priority = core.priority?;
    let safe: Vec<Cell> = core
        .model
        .coordinates
        .neighbours()
        .into_iter()
        .filter(|cell| {
            map.available_cells.contains(cell)
                && !state.tank_cells.contains(cell)
                && !hot.contains(cell)
        })
        .collect();
    nearest(&safe, &priority)
}
