//! Pure view model for the roster UI.
//!
//! # Design
//! Renderers are functions from players to a tree of `Node`s. Buttons carry
//! the `Action` they trigger instead of a callback, so a view can be built,
//! inspected and compared without any render target. `html::to_markup`
//! serializes a tree for browser-style hosts.

use crate::types::{NewPlayer, Player};

/// Shown in place of the card list when there is nothing to show.
pub const NO_PLAYERS_MESSAGE: &str = "No players were present";

/// Form inputs as `(name, label)`, in display order.
pub const FORM_FIELDS: [(&str, &str); 4] = [
    ("name", "Name:"),
    ("breed", "Breed:"),
    ("status", "Status:"),
    ("imageUrl", "ImageUrl:"),
];

/// What a button asks the app to do when activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Switch to the detail view of this player.
    ShowDetails(Player),
    /// Delete the player with this id, then reload the list.
    Remove(i64),
    /// Leave the detail view and reload the list.
    Back,
    /// Create a player from the form's current values, then reload.
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    pub action: Option<Action>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            action: None,
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, class: &'static str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn on(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first visit of every element in the tree, self included.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Element)) {
        if let Node::Element(element) = self {
            f(element);
            for child in &element.children {
                child.visit(f);
            }
        }
    }
}

/// Every element carrying `class`, across a whole fragment.
pub fn find_by_class<'a>(nodes: &'a [Node], class: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    for node in nodes {
        node.visit(&mut |element| {
            if element.has_class(class) {
                found.push(element);
            }
        });
    }
    found
}

/// Every action reachable in a fragment, in document order.
pub fn actions(nodes: &[Node]) -> Vec<&Action> {
    let mut found = Vec::new();
    for node in nodes {
        node.visit(&mut |element| {
            if let Some(action) = &element.action {
                found.push(action);
            }
        });
    }
    found
}

fn paragraph(text: String) -> Element {
    Element::new("p").text(text)
}

fn portrait(player: &Player) -> Element {
    Element::new("img")
        .attr("src", player.image_url.clone())
        .attr("alt", player.name.clone())
}

fn button(label: &str, action: Action) -> Element {
    Element::new("button").text(label).on(action)
}

/// List view: one card per player, or the empty-roster message.
///
/// The result replaces the whole target; absent and empty inputs render the
/// same way.
pub fn player_list(players: Option<&[Player]>) -> Vec<Node> {
    let players = match players {
        Some(players) if !players.is_empty() => players,
        _ => return vec![Element::new("div").text(NO_PLAYERS_MESSAGE).into()],
    };

    let container = players
        .iter()
        .fold(Element::new("div").class("card-container"), |container, player| {
            container.child(player_card(player))
        });
    vec![container.into()]
}

fn player_card(player: &Player) -> Element {
    Element::new("div")
        .class("card")
        .child(Element::new("h3").text(player.name.clone()))
        .child(paragraph(format!("ID: {}", player.id)))
        .child(paragraph(format!("Breed: {}", player.breed)))
        .child(paragraph(format!("Status: {}", player.status)))
        .child(portrait(player))
        .child(button("See Details", Action::ShowDetails(player.clone())))
        .child(button("Remove", Action::Remove(player.id)))
}

/// Detail view of a single player with a way back to the list.
pub fn player_detail(player: &Player) -> Vec<Node> {
    let team = match player.team_id {
        Some(team) => format!("Team: #{team}"),
        None => "Team: Unassigned".to_string(),
    };
    let card = Element::new("div")
        .class("card")
        .child(Element::new("h3").text(player.name.clone()))
        .child(paragraph(format!("ID: {}", player.id)))
        .child(paragraph(format!("Breed: {}", player.breed)))
        .child(paragraph(format!("Status: {}", player.status)))
        .child(paragraph(team))
        .child(portrait(player))
        .child(Element::new("br"))
        .child(button("Return", Action::Back));
    vec![card.into()]
}

/// Contents of the new-player form: a labeled text input per field and a
/// submit button.
pub fn player_form() -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::with_capacity(FORM_FIELDS.len() * 2 + 1);
    for (name, label) in FORM_FIELDS {
        nodes.push(Element::new("label").attr("for", name).text(label).into());
        nodes.push(
            Element::new("input")
                .attr("type", "text")
                .attr("name", name)
                .into(),
        );
    }
    nodes.push(
        Element::new("button")
            .attr("type", "submit")
            .text("Submit")
            .on(Action::Submit)
            .into(),
    );
    nodes
}

/// Raw values of the new-player form, as a host reads them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerForm {
    pub name: String,
    pub breed: String,
    pub status: String,
    pub image_url: String,
}

impl PlayerForm {
    /// Set a field by its input name. Returns false for unknown names.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "breed" => &mut self.breed,
            "status" => &mut self.status,
            "imageUrl" => &mut self.image_url,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// Payload for the create call. No validation; a blank status is left
    /// to the server default.
    pub fn to_new_player(&self) -> NewPlayer {
        NewPlayer {
            name: self.name.clone(),
            breed: self.breed.clone(),
            status: Some(self.status.clone()).filter(|s| !s.is_empty()),
            image_url: self.image_url.clone(),
        }
    }
}
