//! Hexbattle Bot - Entry Point
//!
//! Loads the configuration, applies command line overrides and plays one
//! match per bot against the game server.

use std::path::PathBuf;

use clap::Parser;
use hexbattle_bot::core::config::BotConfig;
use hexbattle_bot::core::error::Result;
use hexbattle_bot::session::{run_session, GameOutcome};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Hexbattle Bot - plays hex tank battles against the game server
#[derive(Parser, Debug)]
#[command(name = "hexbattle-bot")]
#[command(about = "Autonomous player for the hex tank battle server")]
struct Args {
    /// TOML config file; defaults apply when absent
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Server host
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(long)]
    port: Option<u16>,

    /// Player name
    #[arg(long)]
    name: Option<String>,

    /// Player password
    #[arg(long)]
    password: Option<String>,

    /// Game to join
    #[arg(long)]
    game: Option<String>,

    /// Number of turns when creating a game
    #[arg(long)]
    turns: Option<u32>,

    /// Number of players when creating a game
    #[arg(long)]
    players: Option<u32>,

    /// Join as an observer
    #[arg(long)]
    observer: bool,

    /// Number of bots to run concurrently in the same game
    #[arg(long, default_value_t = 1)]
    bots: usize,

    /// Random seed for deterministic roaming
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply(&self, config: &mut BotConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(name) = &self.name {
            config.login.name = name.clone();
        }
        if let Some(password) = &self.password {
            config.login.password = Some(password.clone());
        }
        if let Some(game) = &self.game {
            config.login.game = Some(game.clone());
        }
        if let Some(turns) = self.turns {
            config.login.num_turns = Some(turns);
        }
        if let Some(players) = self.players {
            config.login.num_players = Some(players);
        }
        if self.observer {
            config.login.is_observer = true;
        }
        if let Some(seed) = self.seed {
            config.strategy.seed = Some(seed);
        }
    }
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hexbattle_bot=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::new(),
    };
    args.apply(&mut config);
    config.validate()?;

    let bots = args.bots.max(1);
    tracing::info!(
        "Starting {} bot(s) against {}:{}",
        bots,
        config.server.host,
        config.server.port
    );

    let rt = Runtime::new()?;
    let outcomes = rt.block_on(run_bots(config, bots));

    for outcome in &outcomes {
        println!("{}", outcome);
    }
    Ok(())
}

/// Run `bots` sessions concurrently and collect their outcomes
async fn run_bots(config: BotConfig, bots: usize) -> Vec<GameOutcome> {
    let mut handles = Vec::with_capacity(bots);
    for index in 0..bots {
        let suffix = (bots > 1).then_some(index + 1);
        let mut config = config.clone();
        // distinct roaming per bot, still reproducible
        config.strategy.seed = config.strategy.seed.map(|seed| seed.wrapping_add(index as u64));
        handles.push(tokio::spawn(run_session(config, suffix)));
    }

    let mut outcomes = Vec::with_capacity(bots);
    for handle in handles {
        match handle.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => tracing::error!("Session task panicked: {}", err),
        }
    }
    outcomes
}
