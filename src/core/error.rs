use thiserror::Error;

use crate::protocol::codes::{Action, StatusCode};

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Server returned {status}: {}", String::from_utf8_lossy(.payload))]
    Protocol { status: StatusCode, payload: Vec<u8> },

    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Missing key in server payload: {0}")]
    MissingKey(&'static str),

    #[error("Invalid cube coordinate ({x}, {y}, {z})")]
    InvalidCell { x: i32, y: i32, z: i32 },

    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("Empty response to {0:?}")]
    EmptyResponse(Action),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BotError {
    /// A timeout from the server leaves the session usable; the next poll may succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BotError::Protocol {
                status: StatusCode::Timeout,
                ..
            }
        )
    }

    /// Status code carried by a protocol error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BotError::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
