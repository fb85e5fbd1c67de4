//! Stateless HTTP request builder and response parser for the players API.
//!
//! # Design
//! `RosterClient` holds only a `base_url`. Each resource operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. The host executes the round-trip
//! in between.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{DeleteAck, Envelope, NewPlayer, Player, PlayerData, PlayerList};

/// Puppy Bowl cohort endpoint the app talks to when nothing else is given.
pub const DEFAULT_API_URL: &str = "https://fsa-puppy-bowl.herokuapp.com/api/2407-FTB-ET-WEB-FT";

/// Synchronous, stateless client for the players API.
#[derive(Debug, Clone)]
pub struct RosterClient {
    base_url: String,
}

impl Default for RosterClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl RosterClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_players(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/players", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_player(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/players/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_player(&self, input: &NewPlayer) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/players", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_player(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/players/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_players(&self, response: HttpResponse) -> Result<Vec<Player>, ApiError> {
        check_status(&response)?;
        let list: PlayerList = open_envelope(&response)?;
        Ok(list.players)
    }

    pub fn parse_get_player(&self, response: HttpResponse) -> Result<Player, ApiError> {
        check_status(&response)?;
        let data: PlayerData = open_envelope(&response)?;
        Ok(data.into_player())
    }

    pub fn parse_create_player(&self, response: HttpResponse) -> Result<Player, ApiError> {
        check_status(&response)?;
        let data: PlayerData = open_envelope(&response)?;
        Ok(data.into_player())
    }

    /// A 2xx with an empty body (204) counts as an acknowledgment too.
    pub fn parse_delete_player(&self, response: HttpResponse) -> Result<DeleteAck, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(Envelope {
                success: true,
                error: None,
                data: None,
            });
        }
        let ack: DeleteAck = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        if !ack.success {
            return Err(rejected(&ack));
        }
        Ok(ack)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Decode the envelope and pull out `data`, honouring `success: false`.
fn open_envelope<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    let envelope: Envelope<T> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    if !envelope.success {
        return Err(rejected(&envelope));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::DeserializationError("response envelope has no data".to_string()))
}

fn rejected<T>(envelope: &Envelope<T>) -> ApiError {
    let message = envelope
        .error
        .as_ref()
        .and_then(|e| e.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "unspecified error".to_string());
    ApiError::Rejected { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RosterClient {
        RosterClient::new("http://localhost:3000/api/test")
    }

    fn new_player() -> NewPlayer {
        NewPlayer {
            name: "Rex".to_string(),
            breed: "Pug".to_string(),
            status: Some("field".to_string()),
            image_url: "y.png".to_string(),
        }
    }

    #[test]
    fn build_list_players_produces_correct_request() {
        let req = client().build_list_players();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/test/players");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_player_produces_correct_request() {
        let req = client().build_get_player(4);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/test/players/4");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_player_produces_correct_request() {
        let req = client().build_create_player(&new_player()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/test/players");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Rex");
        assert_eq!(body["breed"], "Pug");
        assert_eq!(body["status"], "field");
        assert_eq!(body["imageUrl"], "y.png");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_delete_player_produces_correct_request() {
        let req = client().build_delete_player(7);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/test/players/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = RosterClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_players().path, "http://localhost:3000/players");
    }

    #[test]
    fn default_client_targets_the_cohort_endpoint() {
        assert_eq!(RosterClient::default().base_url, DEFAULT_API_URL);
    }

    #[test]
    fn parse_list_players_success() {
        let response = HttpResponse::new(
            200,
            r#"{"success":true,"error":null,"data":{"players":[
                {"id":1,"name":"Fido","breed":"Lab","status":"bench","imageUrl":"x.png"}]}}"#,
        );
        let players = client().parse_list_players(response).unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Fido");
    }

    #[test]
    fn parse_list_players_bad_json() {
        let err = client()
            .parse_list_players(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_players_without_data() {
        let err = client()
            .parse_list_players(HttpResponse::new(200, r#"{"success":true}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_players_server_error() {
        let err = client()
            .parse_list_players(HttpResponse::new(500, "boom"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_get_player_nested_under_player() {
        let response = HttpResponse::new(
            200,
            r#"{"success":true,"data":{"player":
                {"id":4,"name":"Rex","breed":"Pug","status":"field","imageUrl":"y.png","teamId":2}}}"#,
        );
        let player = client().parse_get_player(response).unwrap();
        assert_eq!(player.id, 4);
        assert_eq!(player.team_id, Some(2));
    }

    #[test]
    fn parse_get_player_not_found() {
        let err = client()
            .parse_get_player(HttpResponse::new(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_player_bare_record() {
        let response = HttpResponse::new(
            201,
            r#"{"data":{"id":9,"name":"Rex","breed":"Pug","status":"field","imageUrl":"y.png"}}"#,
        );
        let player = client().parse_create_player(response).unwrap();
        assert_eq!(player.id, 9);
        assert_eq!(player.name, "Rex");
    }

    #[test]
    fn parse_create_player_rejected_by_envelope() {
        let response = HttpResponse::new(
            200,
            r#"{"success":false,"error":{"name":"ValidationError","message":"breed is required"},"data":null}"#,
        );
        let err = client().parse_create_player(response).unwrap_err();
        match err {
            ApiError::Rejected { message } => assert_eq!(message, "breed is required"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn parse_create_player_rejected_with_null_message() {
        let response = HttpResponse::new(
            200,
            r#"{"success":false,"error":{"name":"ValidationError","message":null},"data":null}"#,
        );
        let err = client().parse_create_player(response).unwrap_err();
        match err {
            ApiError::Rejected { message } => assert_eq!(message, "unspecified error"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn parse_delete_player_bad_json() {
        let err = client()
            .parse_delete_player(HttpResponse::new(200, "<html>ok</html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_delete_player_acknowledgment() {
        let ack = client()
            .parse_delete_player(HttpResponse::new(200, r#"{"success":true,"error":null,"data":null}"#))
            .unwrap();
        assert!(ack.success);
        assert!(ack.data.is_none());
    }

    #[test]
    fn parse_delete_player_empty_body() {
        assert!(client()
            .parse_delete_player(HttpResponse::new(204, ""))
            .is_ok());
    }

    #[test]
    fn parse_delete_player_not_found() {
        let err = client()
            .parse_delete_player(HttpResponse::new(404, r#"{"success":false}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }
}
