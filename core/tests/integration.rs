//! Roster lifecycle against the live mock server.
//!
//! Starts the mock server on a random port, then drives both the raw
//! `RosterClient` build/parse pairs and the `App` loop over real HTTP using
//! ureq as the host transport.

use roster_core::view::{find_by_class, NO_PLAYERS_MESSAGE};
use roster_core::{
    Action, ApiError, App, HttpMethod, HttpRequest, HttpResponse, MemoryForm, MemoryTarget,
    NewPlayer, RosterClient, Screen,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// 4xx/5xx responses come back as data so the core interprets the status.
fn execute(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse::new(status, body))
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn rex() -> NewPlayer {
    NewPlayer {
        name: "Rex".to_string(),
        breed: "Pug".to_string(),
        status: Some("field".to_string()),
        image_url: "y.png".to_string(),
    }
}

#[test]
fn client_lifecycle() {
    let client = RosterClient::new(&start_server());

    // Step 1: list is empty.
    let players = client
        .parse_list_players(execute(client.build_list_players()).unwrap())
        .unwrap();
    assert!(players.is_empty(), "expected empty roster");

    // Step 2: create.
    let req = client.build_create_player(&rex()).unwrap();
    let created = client.parse_create_player(execute(req).unwrap()).unwrap();
    assert_eq!(created.name, "Rex");
    let id = created.id;

    // Step 3: get-one round-trips the submitted values.
    let fetched = client
        .parse_get_player(execute(client.build_get_player(id)).unwrap())
        .unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.breed, "Pug");
    assert_eq!(fetched.status, "field");
    assert_eq!(fetched.image_url, "y.png");

    // Step 4: list has one player.
    let players = client
        .parse_list_players(execute(client.build_list_players()).unwrap())
        .unwrap();
    assert_eq!(players, vec![created]);

    // Step 5: delete.
    let ack = client
        .parse_delete_player(execute(client.build_delete_player(id)).unwrap())
        .unwrap();
    assert!(ack.success);

    // Step 6: get and delete after delete are NotFound.
    let err = client
        .parse_get_player(execute(client.build_get_player(id)).unwrap())
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
    let err = client
        .parse_delete_player(execute(client.build_delete_player(id)).unwrap())
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn app_loop_over_http() {
    let mut app = App::new(RosterClient::new(&start_server()), execute);
    let mut main = MemoryTarget::default();
    let mut form = MemoryForm::default();

    app.init(&mut main, &mut form);
    assert_eq!(main.nodes()[0].text_content(), NO_PLAYERS_MESSAGE);

    form.values.set("name", "Fido");
    form.values.set("breed", "Lab");
    form.values.set("status", "bench");
    form.values.set("imageUrl", "x.png");
    app.dispatch(Action::Submit, &mut main, &mut form);
    assert_eq!(find_by_class(main.nodes(), "card").len(), 1);
    assert!(form.values.name.is_empty());

    let fido = app.fetch_all_players().unwrap().remove(0);
    app.dispatch(Action::ShowDetails(fido.clone()), &mut main, &mut form);
    assert_eq!(app.screen(), Screen::Detail(fido.id));

    app.dispatch(Action::Remove(fido.id), &mut main, &mut form);
    assert_eq!(app.screen(), Screen::List);
    assert_eq!(main.nodes()[0].text_content(), NO_PLAYERS_MESSAGE);

    // Already gone: logged, not raised.
    app.dispatch(Action::Remove(fido.id), &mut main, &mut form);
    assert_eq!(main.nodes()[0].text_content(), NO_PLAYERS_MESSAGE);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut app = App::new(RosterClient::new(&format!("http://{addr}")), execute);

    assert!(matches!(app.fetch_all_players(), Err(ApiError::Transport(_))));
    let mut main = MemoryTarget::default();
    app.refresh(&mut main);
    assert_eq!(main.nodes()[0].text_content(), NO_PLAYERS_MESSAGE);
}
