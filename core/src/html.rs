//! Markup serializer for the view model.
//!
//! Buttons are emitted with `data-action` (and `data-id` where a player is
//! involved) so a browser host can map clicks back to `view::Action`s.

use std::fmt::Write;

use crate::view::{Action, Element, Node};

const VOID_ELEMENTS: [&str; 3] = ["br", "img", "input"];

/// Serialize a fragment to an HTML string.
pub fn to_markup(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Element(element) => write_element(out, element),
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag);
    for (name, value) in &element.attrs {
        let _ = write!(out, " {name}=\"{}\"", escape(value));
    }
    if let Some(action) = &element.action {
        let (name, id) = action_attrs(action);
        let _ = write!(out, " data-action=\"{name}\"");
        if let Some(id) = id {
            let _ = write!(out, " data-id=\"{id}\"");
        }
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag) {
        return;
    }
    for child in &element.children {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", element.tag);
}

/// `data-action` name and optional player id for an action.
fn action_attrs(action: &Action) -> (&'static str, Option<i64>) {
    match action {
        Action::ShowDetails(player) => ("details", Some(player.id)),
        Action::Remove(id) => ("remove", Some(*id)),
        Action::Back => ("back", None),
        Action::Submit => ("submit", None),
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
