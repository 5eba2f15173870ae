//! Outputs a running session reports to whoever displays it

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::model::{GameMap, GameState, WinPoints};

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Sent after setup and on every turn change
    StateUpdated { map: Arc<GameMap>, state: GameState },
    /// Always the last event of a session
    GameEnded(GameOutcome),
}

/// Final result of one session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameOutcome {
    pub name: String,
    /// Our player id; None when login never succeeded
    pub player: Option<u32>,
    pub winner: Option<u32>,
    pub turns_played: u32,
    pub win_points: BTreeMap<u32, WinPoints>,
    /// Why the session stopped early
    pub failure: Option<String>,
}

impl GameOutcome {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn is_victory(&self) -> bool {
        self.player.is_some() && self.winner == self.player
    }

    pub fn our_points(&self) -> WinPoints {
        self.player
            .and_then(|player| self.win_points.get(&player).copied())
            .unwrap_or_default()
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(reason) = &self.failure {
            return write!(f, "{}: session failed: {}", self.name, reason);
        }
        let winner = match self.winner {
            Some(winner) => winner.to_string(),
            None => "none".to_string(),
        };
        let points = self.our_points();
        write!(
            f,
            "{}: game ended after {} turns, winner: {} (capture {}, kill {})",
            self.name, self.turns_played, winner, points.capture, points.kill
        )
    }
}

/// Log every event until the session drops its sender
pub async fn log_events(mut events: UnboundedReceiver<SessionEvent>) -> Option<GameOutcome> {
    let mut outcome = None;
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::StateUpdated { map, state } => {
                let alive = state.our_tanks.values().filter(|tank| tank.is_alive()).count();
                tracing::info!(
                    "[{}] turn {}/{}: {} of {} vehicles alive, {} capture points",
                    map.name,
                    state.current_turn,
                    state.num_turns.unwrap_or_default(),
                    alive,
                    state.our_tanks.len(),
                    state.total_capture_points()
                );
            }
            SessionEvent::GameEnded(result) => {
                tracing::info!("{}", result);
                outcome = Some(result);
            }
        }
    }
    outcome
}
