//! Application controller: the fetch/render loop around `RosterClient`.
//!
//! # Design
//! The host supplies two seams: a `Transport` that executes `HttpRequest`s
//! and `RenderTarget`s that receive full view replacements. Every action
//! runs as a sequential "mutate, then reload" pipeline. Resource failures
//! are logged here and turned into defensive rendering; they never reach
//! the user as error text.

use log::{debug, error, info};

use crate::client::RosterClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{DeleteAck, NewPlayer, Player};
use crate::view::{self, Action, Node, PlayerForm};

/// Executes one HTTP round-trip on behalf of the core.
///
/// Non-2xx statuses are data, not errors: return them as an `HttpResponse`
/// and let the client interpret them. Only failures to get any response at
/// all belong in `ApiError::Transport`.
pub trait Transport {
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: FnMut(HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

/// A region of the display that is cleared and rebuilt on every render.
pub trait RenderTarget {
    fn replace(&mut self, nodes: Vec<Node>);
}

/// The render target holding the new-player form. Besides showing the form
/// it reports what the user has typed into it.
pub trait FormTarget: RenderTarget {
    fn values(&self) -> PlayerForm;
}

/// Render target that keeps the latest fragment in memory.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    nodes: Vec<Node>,
    renders: usize,
}

impl MemoryTarget {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// How many times the target has been replaced.
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl RenderTarget for MemoryTarget {
    fn replace(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        self.renders += 1;
    }
}

/// In-memory form target. Re-rendering clears the typed values, like
/// rebuilding a real form does.
#[derive(Debug, Default)]
pub struct MemoryForm {
    target: MemoryTarget,
    pub values: PlayerForm,
}

impl MemoryForm {
    pub fn nodes(&self) -> &[Node] {
        self.target.nodes()
    }

    pub fn renders(&self) -> usize {
        self.target.renders()
    }
}

impl RenderTarget for MemoryForm {
    fn replace(&mut self, nodes: Vec<Node>) {
        self.values = PlayerForm::default();
        self.target.replace(nodes);
    }
}

impl FormTarget for MemoryForm {
    fn values(&self) -> PlayerForm {
        self.values.clone()
    }
}

/// Which view the main target currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List,
    Detail(i64),
}

pub struct App<T> {
    client: RosterClient,
    transport: T,
    screen: Screen,
}

impl<T: Transport> App<T> {
    pub fn new(client: RosterClient, transport: T) -> Self {
        Self {
            client,
            transport,
            screen: Screen::List,
        }
    }

    pub fn client(&self) -> &RosterClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    fn round_trip(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!("{} {}", request.method.as_str(), request.path);
        let response = self.transport.execute(request)?;
        debug!("-> {}", response.status);
        Ok(response)
    }

    pub fn fetch_all_players(&mut self) -> Result<Vec<Player>, ApiError> {
        let request = self.client.build_list_players();
        let result = self
            .round_trip(request)
            .and_then(|response| self.client.parse_list_players(response));
        if let Err(err) = &result {
            error!("trouble fetching players: {err}");
        }
        result
    }

    pub fn fetch_player(&mut self, id: i64) -> Result<Player, ApiError> {
        let request = self.client.build_get_player(id);
        let result = self
            .round_trip(request)
            .and_then(|response| self.client.parse_get_player(response));
        if let Err(err) = &result {
            error!("trouble fetching player #{id}: {err}");
        }
        result
    }

    pub fn add_player(&mut self, input: &NewPlayer) -> Result<Player, ApiError> {
        let result = self
            .client
            .build_create_player(input)
            .and_then(|request| self.round_trip(request))
            .and_then(|response| self.client.parse_create_player(response));
        match &result {
            Ok(player) => info!("added player #{} ({})", player.id, player.name),
            Err(err) => error!("trouble adding player {:?}: {err}", input.name),
        }
        result
    }

    pub fn remove_player(&mut self, id: i64) -> Result<DeleteAck, ApiError> {
        let request = self.client.build_delete_player(id);
        let result = self
            .round_trip(request)
            .and_then(|response| self.client.parse_delete_player(response));
        match &result {
            Ok(ack) => info!("removed player #{id}: {ack:?}"),
            Err(err) => error!("trouble removing player #{id} from the roster: {err}"),
        }
        result
    }

    pub fn render_all_players<M>(&mut self, main: &mut M, players: Option<&[Player]>)
    where
        M: RenderTarget + ?Sized,
    {
        main.replace(view::player_list(players));
        self.screen = Screen::List;
    }

    pub fn render_player<M>(&mut self, main: &mut M, player: &Player)
    where
        M: RenderTarget + ?Sized,
    {
        main.replace(view::player_detail(player));
        self.screen = Screen::Detail(player.id);
    }

    pub fn render_form<F>(&mut self, form: &mut F)
    where
        F: RenderTarget + ?Sized,
    {
        form.replace(view::player_form());
    }

    /// Re-fetch the collection and render it. A failed fetch renders as an
    /// empty roster.
    pub fn refresh<M>(&mut self, main: &mut M)
    where
        M: RenderTarget + ?Sized,
    {
        let players = self.fetch_all_players().ok();
        self.render_all_players(main, players.as_deref());
    }

    /// Startup sequence: load and show the roster, then the form.
    pub fn init<M, F>(&mut self, main: &mut M, form: &mut F)
    where
        M: RenderTarget + ?Sized,
        F: RenderTarget + ?Sized,
    {
        self.refresh(main);
        self.render_form(form);
    }

    /// Run the pipeline behind a button.
    pub fn dispatch<M, F>(&mut self, action: Action, main: &mut M, form: &mut F)
    where
        M: RenderTarget + ?Sized,
        F: FormTarget + ?Sized,
    {
        match action {
            Action::ShowDetails(player) => self.render_player(main, &player),
            Action::Remove(id) => {
                let _ = self.remove_player(id);
                self.refresh(main);
            }
            Action::Back => self.refresh(main),
            Action::Submit => {
                let values = form.values();
                self.submit(&values, main, form);
            }
        }
    }

    /// Create a player from form values, reload the list, reset the form.
    pub fn submit<M, F>(&mut self, values: &PlayerForm, main: &mut M, form: &mut F)
    where
        M: RenderTarget + ?Sized,
        F: RenderTarget + ?Sized,
    {
        let _ = self.add_player(&values.to_new_player());
        self.refresh(main);
        self.render_form(form);
    }
}
