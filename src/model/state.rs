//! Per-turn game state parsed from the GAME_STATE response
//!
//! Rebuilt on every turn change. Between polls it is patched with the
//! actions our own units have already sent, so later units in the same turn
//! see their effects.

use std::collections::{BTreeMap, HashMap};

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::{BotError, Result};
use crate::hex::Cell;
use crate::model::action::{UnitAction, UnitActionKind};
use crate::model::map::GameMap;
use crate::model::require;
use crate::model::tank::TankModel;
use crate::model::vehicle_type::MAX_CATAPULT_USAGE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub idx: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_observer: bool,
}

/// Points a player has collected so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinPoints {
    #[serde(default)]
    pub capture: u32,
    #[serde(default)]
    pub kill: u32,
}

#[derive(Debug, Deserialize)]
struct StatePayload {
    #[serde(default)]
    finished: bool,
    #[serde(default)]
    winner: Option<u32>,
    current_turn: u32,
    #[serde(default)]
    num_turns: Option<u32>,
    #[serde(default)]
    current_round: Option<u32>,
    #[serde(default)]
    num_rounds: Option<u32>,
    #[serde(default)]
    current_player_idx: Option<u32>,
    #[serde(default)]
    num_players: Option<u32>,
    #[serde(default)]
    players: Vec<PlayerInfo>,
    attack_matrix: HashMap<String, Vec<u32>>,
    #[serde(default)]
    catapult_usage: Vec<Cell>,
    #[serde(default)]
    win_points: HashMap<String, WinPoints>,
    vehicles: HashMap<String, TankModel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Our player id
    pub player: u32,
    pub current_turn: u32,
    pub num_turns: Option<u32>,
    pub current_round: Option<u32>,
    pub num_rounds: Option<u32>,
    pub current_player: Option<u32>,
    pub num_players: Option<u32>,
    pub players: Vec<PlayerInfo>,
    pub winner: Option<u32>,
    pub is_finished: bool,
    pub win_points: BTreeMap<u32, WinPoints>,
    /// Attack matrix without our own entry
    pub attack_matrix: BTreeMap<u32, Vec<u32>>,
    pub non_neutral_players: AHashSet<u32>,
    pub our_tanks: BTreeMap<u32, TankModel>,
    pub enemy_tanks: AHashMap<Cell, TankModel>,
    pub tank_cells: AHashSet<Cell>,
    /// Health of every tank we are allowed to shoot, by cell
    pub aggressive_tanks: AHashMap<Cell, u32>,
    pub inactive_catapults: AHashSet<Cell>,
}

fn parse_id(field: &'static str, key: &str) -> Result<u32> {
    key.parse().map_err(|_| BotError::InvalidField {
        field,
        value: key.to_string(),
    })
}

/// Players we may attack
///
/// Starts from every other player in the matrix, drops anyone some player
/// has attacked, then adds back everyone who attacked us. Our own row is
/// ignored.
pub fn non_neutral_players(attack_matrix: &BTreeMap<u32, Vec<u32>>, player: u32) -> AHashSet<u32> {
    let others: Vec<(u32, &Vec<u32>)> = attack_matrix
        .iter()
        .filter(|(id, _)| **id != player)
        .map(|(id, targets)| (*id, targets))
        .collect();

    let mut result: AHashSet<u32> = others
        .iter()
        .map(|(id, _)| *id)
        .filter(|candidate| !others.iter().any(|(_, targets)| targets.contains(candidate)))
        .collect();

    for (attacker, targets) in &others {
        if targets.contains(&player) {
            result.insert(*attacker);
        }
    }
    result
}

impl GameState {
    pub fn from_value(data: &Value, player: u32) -> Result<Self> {
        for key in ["current_turn", "attack_matrix", "vehicles"] {
            require(data, key)?;
        }
        let payload: StatePayload = serde_json::from_value(data.clone())?;

        let mut attack_matrix = BTreeMap::new();
        for (id, targets) in payload.attack_matrix {
            let id = parse_id("attack_matrix", &id)?;
            if id != player {
                attack_matrix.insert(id, targets);
            }
        }
        let non_neutral_players = non_neutral_players(&attack_matrix, player);

        let mut win_points = BTreeMap::new();
        for (id, points) in payload.win_points {
            win_points.insert(parse_id("win_points", &id)?, points);
        }

        let mut our_tanks = BTreeMap::new();
        let mut enemy_tanks = AHashMap::new();
        let mut tank_cells = AHashSet::new();
        let mut aggressive_tanks = AHashMap::new();
        for (id, tank) in payload.vehicles {
            let id = parse_id("vehicles", &id)?;
            tank_cells.insert(tank.coordinates);
            if tank.player_id == player {
                our_tanks.insert(id, tank);
                continue;
            }
            if tank.is_alive() && non_neutral_players.contains(&tank.player_id) {
                aggressive_tanks.insert(tank.coordinates, tank.health);
            }
            enemy_tanks.insert(tank.coordinates, tank);
        }

        let mut catapult_usage: AHashMap<Cell, usize> = AHashMap::new();
        for cell in payload.catapult_usage {
            *catapult_usage.entry(cell).or_default() += 1;
        }
        let inactive_catapults = catapult_usage
            .into_iter()
            .filter(|(_, uses)| *uses >= MAX_CATAPULT_USAGE)
            .map(|(cell, _)| cell)
            .collect();

        Ok(Self {
            player,
            current_turn: payload.current_turn,
            num_turns: payload.num_turns,
            current_round: payload.current_round,
            num_rounds: payload.num_rounds,
            current_player: payload.current_player_idx,
            num_players: payload.num_players,
            players: payload.players,
            winner: payload.winner,
            is_finished: payload.finished,
            win_points,
            attack_matrix,
            non_neutral_players,
            our_tanks,
            enemy_tanks,
            tank_cells,
            aggressive_tanks,
            inactive_catapults,
        })
    }

    pub fn is_our_turn(&self) -> bool {
        self.current_player == Some(self.player)
    }

    /// Apply one of our own actions before the server reports it back
    pub fn update_data(&mut self, action: &UnitAction, map: &GameMap) {
        let Some(tank) = self.our_tanks.get_mut(&action.vehicle_id) else {
            tracing::warn!("Ignoring action for unknown vehicle {}", action.vehicle_id);
            return;
        };

        match action.kind {
            UnitActionKind::Move => {
                self.tank_cells.remove(&tank.coordinates);
                self.tank_cells.insert(action.target);
                tank.coordinates = action.target;
            }
            UnitActionKind::Shoot => {
                let damage = tank.stats().damage;
                let hit = if tank.vehicle_type.fires_in_lines() {
                    tank.coordinates
                        .clipped_ray_through(&action.target, tank.max_range(), &map.obstacles)
                } else {
                    vec![action.target]
                };
                for cell in hit {
                    self.apply_damage(cell, damage);
                }
            }
        }
    }

    fn apply_damage(&mut self, cell: Cell, damage: u32) {
        if let Some(health) = self.aggressive_tanks.get_mut(&cell) {
            *health = health.saturating_sub(damage);
            if *health == 0 {
                self.aggressive_tanks.remove(&cell);
            }
        }
        if let Some(enemy) = self.enemy_tanks.get_mut(&cell) {
            enemy.health = enemy.health.saturating_sub(damage);
        }
    }

    /// Our own units currently on a base cell
    pub fn our_units_on_base(&self, map: &GameMap) -> usize {
        self.our_tanks
            .values()
            .filter(|tank| map.is_base(&tank.coordinates))
            .count()
    }

    /// Our capture points: the server's tally when present, else the sum over our tanks
    pub fn total_capture_points(&self) -> u32 {
        match self.win_points.get(&self.player) {
            Some(points) => points.capture,
            None => self.our_tanks.values().map(|tank| tank.capture_points).sum(),
        }
    }

    /// Our vehicle ids in the order the server lets them act
    pub fn ordered_tanks(&self) -> Vec<(u32, TankModel)> {
        let mut tanks: Vec<(u32, TankModel)> = self
            .our_tanks
            .iter()
            .map(|(id, tank)| (*id, tank.clone()))
            .collect();
        tanks.sort_by_key(|(id, tank)| (tank.stats().turn_order, *id));
        tanks
    }
}
