//! One bot playing one match
//!
//! Login, fetch state and map, then poll GAME_STATE until the game is
//! finished. On our turn every living vehicle acts once, in turn order,
//! before TURN is sent.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::core::config::{BotConfig, StrategyConfig};
use crate::core::error::Result;
use crate::model::{GameMap, GameState};
use crate::protocol::{Connection, LoginRequest};
use crate::session::events::{GameOutcome, SessionEvent};
use crate::strategy::{DecisionContext, Vehicle};

/// What the turn loop does after one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnFlow {
    Continue,
    Finished,
}

/// Everything that exists only after login
struct Match {
    player: u32,
    map: Arc<GameMap>,
    state: GameState,
    vehicles: Vec<Vehicle>,
    turn: u32,
}

pub struct Game<S> {
    connection: Connection<S>,
    login: LoginRequest,
    strategy: StrategyConfig,
    events: UnboundedSender<SessionEvent>,
    rng: ChaCha8Rng,
}

impl<S> Game<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        connection: Connection<S>,
        config: &BotConfig,
        login: LoginRequest,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        let rng = match config.strategy.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            connection,
            login,
            strategy: config.strategy.clone(),
            events,
            rng,
        }
    }

    /// Play the match to the end
    ///
    /// Failures do not escape: they end the session and are reported in the
    /// returned outcome and the final `GameEnded` event.
    pub async fn run(mut self) -> GameOutcome {
        let mut outcome = GameOutcome::new(self.login.name.clone());

        match self.play(&mut outcome).await {
            Ok(()) => info!("{}", outcome),
            Err(err) => {
                error!("Session {} failed: {}", outcome.name, err);
                outcome.failure = Some(err.to_string());
            }
        }
        if let Err(err) = self.connection.close().await {
            debug!("Closing connection for {}: {}", outcome.name, err);
        }

        self.emit(SessionEvent::GameEnded(outcome.clone()));
        outcome
    }

    async fn play(&mut self, outcome: &mut GameOutcome) -> Result<()> {
        let mut game = self.start().await?;
        outcome.player = Some(game.player);

        loop {
            match self.play_turn(&mut game).await {
                Ok(TurnFlow::Continue) => {}
                Ok(TurnFlow::Finished) => break,
                Err(err) if err.is_recoverable() => {
                    warn!("{}: {}, polling again", self.login.name, err);
                }
                Err(err) => return Err(err),
            }
        }

        outcome.winner = game.state.winner;
        outcome.turns_played = game.state.current_turn;
        outcome.win_points = game.state.win_points.clone();

        self.connection.logout().await?;
        Ok(())
    }

    async fn start(&mut self) -> Result<Match> {
        let login = self.connection.login(&self.login).await?;
        info!("Logged in as {} (player {})", login.name, login.idx);

        let state = GameState::from_value(&self.connection.game_state().await?, login.idx)?;
        let map = Arc::new(GameMap::from_value(&self.connection.map().await?)?);
        info!(
            "Map {}: size {}, {} base cells, {} obstacles",
            map.name,
            map.size,
            map.base.len(),
            map.obstacles.len()
        );

        let vehicles: Vec<Vehicle> = state
            .ordered_tanks()
            .into_iter()
            .map(|(id, model)| Vehicle::build(id, model))
            .collect();
        debug!("Controlling {} vehicles", vehicles.len());

        self.emit(SessionEvent::StateUpdated {
            map: Arc::clone(&map),
            state: state.clone(),
        });

        Ok(Match {
            player: login.idx,
            turn: state.current_turn,
            map,
            state,
            vehicles,
        })
    }

    async fn play_turn(&mut self, game: &mut Match) -> Result<TurnFlow> {
        let polled = GameState::from_value(&self.connection.game_state().await?, game.player)?;
        if polled.is_finished {
            game.state = polled;
            return Ok(TurnFlow::Finished);
        }

        let our_turn = polled.is_our_turn();
        if polled.current_turn != game.turn {
            game.turn = polled.current_turn;
            game.state = polled;
            self.emit(SessionEvent::StateUpdated {
                map: Arc::clone(&game.map),
                state: game.state.clone(),
            });
            if tracing::enabled!(tracing::Level::DEBUG) {
                self.log_game_actions().await;
            }
        }

        if !our_turn {
            self.connection.turn().await?;
            return Ok(TurnFlow::Continue);
        }

        let map = Arc::clone(&game.map);
        let Match { state, vehicles, .. } = game;
        for vehicle in vehicles.iter_mut() {
            let mut ctx = DecisionContext {
                state: &*state,
                map: &map,
                config: &self.strategy,
                rng: &mut self.rng,
            };
            let Some(action) = vehicle.make_turn(&mut ctx) else {
                continue;
            };
            self.connection.submit(&action).await?;
            state.update_data(&action, &map);
        }

        self.connection.turn().await?;
        Ok(TurnFlow::Continue)
    }

    async fn log_game_actions(&mut self) {
        match self.connection.game_actions().await {
            Ok(actions) => {
                for action in &actions.actions {
                    debug!(
                        "Player {} did action {}: {}",
                        action.player_id, action.action_type, action.data
                    );
                }
            }
            Err(err) => warn!("GAME_ACTIONS failed: {}", err),
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("Event receiver for {} is gone", self.login.name);
        }
    }
}
