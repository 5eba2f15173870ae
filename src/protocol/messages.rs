//! JSON payloads that are not part of the game model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// LOGIN request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_turns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_players: Option<u32>,
    pub is_observer: bool,
}

/// LOGIN response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub idx: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_observer: bool,
}

/// CHAT request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// GAME_ACTIONS response: what every player did during the last turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameActions {
    #[serde(default)]
    pub actions: Vec<RecordedAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedAction {
    pub player_id: u32,
    pub action_type: u32,
    #[serde(default)]
    pub data: Value,
}
