//! Render targets that print views to a writer.

use std::io::Write;

use log::warn;
use roster_core::html;
use roster_core::view::{Action, Element, Node, PlayerForm};
use roster_core::{FormTarget, RenderTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Html,
}

/// Prints every replacement in full and remembers the last one, so the
/// session can map typed commands back to the buttons on screen.
pub struct TerminalTarget<W> {
    out: W,
    format: Format,
    nodes: Vec<Node>,
}

impl<W: Write> TerminalTarget<W> {
    pub fn new(out: W, format: Format) -> Self {
        Self {
            out,
            format,
            nodes: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Print a one-line message that is not part of any view.
    pub fn note(&mut self, message: &str) {
        if let Err(err) = writeln!(self.out, "{message}") {
            warn!("could not write to terminal: {err}");
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderTarget for TerminalTarget<W> {
    fn replace(&mut self, nodes: Vec<Node>) {
        let rendered = match self.format {
            Format::Text => render_text(&nodes),
            Format::Html => html::to_markup(&nodes) + "\n",
        };
        if let Err(err) = self.out.write_all(rendered.as_bytes()).and_then(|()| self.out.flush()) {
            warn!("could not write to terminal: {err}");
        }
        self.nodes = nodes;
    }
}

/// The form region. Values are filled in by the session from `add`
/// arguments and cleared whenever the form is re-rendered.
pub struct TerminalForm<W> {
    target: TerminalTarget<W>,
    pub values: PlayerForm,
}

impl<W: Write> TerminalForm<W> {
    pub fn new(out: W, format: Format) -> Self {
        Self {
            target: TerminalTarget::new(out, format),
            values: PlayerForm::default(),
        }
    }
}

impl<W: Write> RenderTarget for TerminalForm<W> {
    fn replace(&mut self, nodes: Vec<Node>) {
        self.values = PlayerForm::default();
        self.target.replace(nodes);
    }
}

impl<W: Write> FormTarget for TerminalForm<W> {
    fn values(&self) -> PlayerForm {
        self.values.clone()
    }
}

/// Session command that triggers `action`.
pub fn command_hint(action: &Action) -> String {
    match action {
        Action::ShowDetails(player) => format!("details {}", player.id),
        Action::Remove(id) => format!("remove {id}"),
        Action::Back => "back".to_string(),
        Action::Submit => "add name=.. breed=.. status=.. imageUrl=..".to_string(),
    }
}

/// Plain-text rendering of a fragment, one line per block.
pub fn render_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, 0);
    }
    out
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Text(text) => line(out, depth, text),
        Node::Element(element) => write_element(out, element, depth),
    }
}

fn write_element(out: &mut String, element: &Element, depth: usize) {
    let text = || Node::Element(element.clone()).text_content();
    match element.tag {
        "h3" => line(out, depth, &format!("# {}", text())),
        "p" => line(out, depth, &text()),
        "img" => line(out, depth, &format!("[image: {}]", element.get_attr("src").unwrap_or_default())),
        "label" => line(
            out,
            depth,
            &format!("{} ({}=)", text(), element.get_attr("for").unwrap_or_default()),
        ),
        "button" => {
            let hint = element.action.as_ref().map(command_hint).unwrap_or_default();
            line(out, depth, &format!("[{}: {hint}]", text()));
        }
        "br" | "input" => {}
        _ if element.has_class("card") => {
            for child in &element.children {
                write_node(out, child, depth + 1);
            }
            out.push('\n');
        }
        _ => {
            for child in &element.children {
                write_node(out, child, depth);
            }
        }
    }
}
