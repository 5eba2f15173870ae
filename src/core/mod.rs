pub mod config;
pub mod error;

pub use config::{BotConfig, LoginConfig, ServerConfig, StrategyConfig};
pub use error::{BotError, Result};
