//! Domain DTOs for the players API.
//!
//! These mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single player returned by the API.
///
/// Unknown fields (`cohortId`, `createdAt`, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub status: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
}

/// Request payload for adding a player. The server assigns `id`.
///
/// `status` is omitted from the body when unset so the server default
/// applies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    pub name: String,
    pub breed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub image_url: String,
}

/// The `error` member of a response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Wrapper every players API response is sent in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<ErrorBody>,
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

/// `data` payload of the list call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerList {
    pub players: Vec<Player>,
}

/// `data` payload of the get-one and create calls. The live API nests the
/// record under `player`; a bare record is accepted too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PlayerData {
    Wrapped { player: Player },
    Bare(Player),
}

impl PlayerData {
    pub fn into_player(self) -> Player {
        match self {
            PlayerData::Wrapped { player } | PlayerData::Bare(player) => player,
        }
    }
}

/// What the server says after a delete. Logged by the app layer.
pub type DeleteAck = Envelope<serde_json::Value>;
