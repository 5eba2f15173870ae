//! Connect, play and report, for one bot

use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error};

use crate::core::config::BotConfig;
use crate::protocol::{Connection, LoginRequest};
use crate::session::events::{log_events, GameOutcome, SessionEvent};
use crate::session::game::Game;

/// Open a TCP connection and play one match over it
///
/// A failed connect still ends with a `GameEnded` event carrying the reason.
pub async fn connect_and_play(
    config: &BotConfig,
    login: LoginRequest,
    events: UnboundedSender<SessionEvent>,
) -> GameOutcome {
    let (host, port) = (&config.server.host, config.server.port);
    match Connection::connect(host, port).await {
        Ok(connection) => Game::new(connection, config, login, events).run().await,
        Err(err) => {
            error!("Cannot reach {}:{}: {}", host, port, err);
            let mut outcome = GameOutcome::new(login.name);
            outcome.failure = Some(format!("cannot reach {}:{}: {}", host, port, err));
            if events.send(SessionEvent::GameEnded(outcome.clone())).is_err() {
                debug!("Event receiver for {} is gone", outcome.name);
            }
            outcome
        }
    }
}

/// Play one session with its events going to [`log_events`]
///
/// `suffix` tells apart several bots started from the same config.
pub async fn run_session(config: BotConfig, suffix: Option<usize>) -> GameOutcome {
    let login = config.login.to_request(suffix);
    let (tx, rx) = mpsc::unbounded_channel();
    let logger = tokio::spawn(log_events(rx));

    let outcome = connect_and_play(&config, login, tx).await;

    if let Err(err) = logger.await {
        error!("Event logger panicked: {}", err);
    }
    outcome
}
