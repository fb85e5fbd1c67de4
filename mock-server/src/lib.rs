use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Cohort every player created by this server belongs to.
pub const COHORT_ID: i64 = 2407;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub status: String,
    pub image_url: String,
    pub team_id: Option<i64>,
    pub cohort_id: i64,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayer {
    pub name: String,
    pub breed: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub image_url: String,
}

fn default_status() -> String {
    "bench".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub name: String,
    pub message: String,
}

/// Wrapper every response is sent in.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub error: Option<ErrorBody>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayersData {
    pub players: Vec<Player>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerData {
    pub player: Player,
}

/// Error response carrying a failure envelope.
pub struct ApiFailure {
    status: StatusCode,
    name: &'static str,
    message: String,
}

impl ApiFailure {
    fn not_found(id: i64) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            name: "NotFoundError",
            message: format!("player with id {id} not found"),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body: Envelope<()> = Envelope {
            success: false,
            error: Some(ErrorBody {
                name: self.name.to_string(),
                message: self.message,
            }),
            data: None,
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Default)]
pub struct Roster {
    players: BTreeMap<i64, Player>,
    next_id: i64,
}

impl Roster {
    fn insert(&mut self, input: CreatePlayer) -> Player {
        self.next_id += 1;
        let player = Player {
            id: self.next_id,
            name: input.name,
            breed: input.breed,
            status: input.status,
            image_url: input.image_url,
            team_id: None,
            cohort_id: COHORT_ID,
        };
        self.players.insert(player.id, player.clone());
        player
    }
}

pub type Db = Arc<RwLock<Roster>>;

pub fn app() -> Router {
    seeded(Vec::new())
}

/// Router whose roster starts with `players`, assigned ids 1, 2, ...
pub fn seeded(players: Vec<CreatePlayer>) -> Router {
    let mut roster = Roster::default();
    for input in players {
        roster.insert(input);
    }
    let db: Db = Arc::new(RwLock::new(roster));
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route("/players/{id}", get(get_player).delete(delete_player))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_players(State(db): State<Db>) -> Json<Envelope<PlayersData>> {
    let roster = db.read().await;
    let players = roster.players.values().cloned().collect();
    Json(Envelope::ok(PlayersData { players }))
}

async fn create_player(
    State(db): State<Db>,
    Json(input): Json<CreatePlayer>,
) -> (StatusCode, Json<Envelope<PlayerData>>) {
    let player = db.write().await.insert(input);
    debug!("created player #{} ({})", player.id, player.name);
    (StatusCode::CREATED, Json(Envelope::ok(PlayerData { player })))
}

async fn get_player(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<PlayerData>>, ApiFailure> {
    let roster = db.read().await;
    let player = roster.players.get(&id).cloned().ok_or(ApiFailure::not_found(id))?;
    Ok(Json(Envelope::ok(PlayerData { player })))
}

async fn delete_player(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<()>>, ApiFailure> {
    let mut roster = db.write().await;
    roster.players.remove(&id).ok_or(ApiFailure::not_found(id))?;
    debug!("deleted player #{id}");
    Ok(Json(Envelope {
        success: true,
        error: None,
        data: None,
    }))
}
