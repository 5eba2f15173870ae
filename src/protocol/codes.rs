//! Numeric action and status codes of the wire protocol

use std::fmt;

/// Request action code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Action {
    Login = 1,
    Logout = 2,
    Map = 3,
    GameState = 4,
    GameActions = 5,
    Turn = 6,
    Chat = 100,
    Move = 101,
    Shoot = 102,
}

impl Action {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Action::Login),
            2 => Some(Action::Logout),
            3 => Some(Action::Map),
            4 => Some(Action::GameState),
            5 => Some(Action::GameActions),
            6 => Some(Action::Turn),
            100 => Some(Action::Chat),
            101 => Some(Action::Move),
            102 => Some(Action::Shoot),
            _ => None,
        }
    }
}

/// Response status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    BadCommand,
    AccessDenied,
    InappropriateGameState,
    Timeout,
    InternalServerError,
    Unknown(u32),
}

impl StatusCode {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => StatusCode::Ok,
            1 => StatusCode::BadCommand,
            2 => StatusCode::AccessDenied,
            3 => StatusCode::InappropriateGameState,
            4 => StatusCode::Timeout,
            500 => StatusCode::InternalServerError,
            other => StatusCode::Unknown(other),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::BadCommand => 1,
            StatusCode::AccessDenied => 2,
            StatusCode::InappropriateGameState => 3,
            StatusCode::Timeout => 4,
            StatusCode::InternalServerError => 500,
            StatusCode::Unknown(code) => code,
        }
    }

    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Ok => write!(f, "OK"),
            StatusCode::BadCommand => write!(f, "BAD_COMMAND"),
            StatusCode::AccessDenied => write!(f, "ACCESS_DENIED"),
            StatusCode::InappropriateGameState => write!(f, "INAPPROPRIATE_GAME_STATE"),
            StatusCode::Timeout => write!(f, "TIMEOUT"),
            StatusCode::InternalServerError => write!(f, "INTERNAL_SERVER_ERROR"),
            StatusCode::Unknown(code) => write!(f, "UNKNOWN_STATUS({code})"),
        }
    }
}
