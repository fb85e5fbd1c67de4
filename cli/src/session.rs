//! Interactive session: typed commands stand in for button clicks.

use std::io::{self, BufRead, Write};

use roster_core::view::{actions, Action, PlayerForm, FORM_FIELDS};
use roster_core::{App, Transport};

use crate::terminal::{TerminalForm, TerminalTarget};

const HELP: &str = "commands: list | details <id> | remove <id> | back | \
                    add <name> <breed> <status> <imageUrl> | help | quit \
                    (add also takes field=value; quote values containing spaces)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Details(i64),
    Remove(i64),
    Back,
    Add(PlayerForm),
    Help,
    Quit,
}

/// One command-line word with quotes removed. `key` is set for an unquoted
/// `field=value` word.
#[derive(Debug, PartialEq, Eq)]
struct Word {
    key: Option<String>,
    value: String,
}

fn split_words(line: &str) -> Result<Vec<Word>, String> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            return Ok(words);
        }

        let mut key = None;
        let mut value = String::new();
        let mut quoted = false;
        while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
            match c {
                '"' | '\'' => {
                    quoted = true;
                    loop {
                        match chars.next() {
                            Some(q) if q == c => break,
                            Some(other) => value.push(other),
                            None => return Err(format!("unterminated {c} quote")),
                        }
                    }
                }
                '=' if key.is_none()
                    && !quoted
                    && !value.is_empty()
                    && value.chars().all(|ch| ch.is_ascii_alphanumeric()) =>
                {
                    key = Some(std::mem::take(&mut value));
                }
                _ => value.push(c),
            }
        }
        words.push(Word { key, value });
    }
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = split_words(line)?.into_iter();
    let Some(verb) = words.next() else {
        return Err("empty command".to_string());
    };
    if verb.key.is_some() {
        return Err(format!("unknown command {:?}", verb.value));
    }
    let command = match verb.value.as_str() {
        "list" | "ls" => Command::List,
        "details" | "show" => Command::Details(parse_id(words.next())?),
        "remove" | "rm" => Command::Remove(parse_id(words.next())?),
        "back" => Command::Back,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "add" => {
            // Positional values fill the form fields in display order.
            let mut positional = FORM_FIELDS.iter().map(|(name, _)| *name);
            let mut form = PlayerForm::default();
            for word in words.by_ref() {
                let field = match word.key {
                    Some(key) => key,
                    None => positional
                        .next()
                        .ok_or_else(|| format!("too many values for add: {:?}", word.value))?
                        .to_string(),
                };
                if !form.set(&field, word.value) {
                    return Err(format!("unknown field {field:?}"));
                }
            }
            Command::Add(form)
        }
        other => return Err(format!("unknown command {other:?}")),
    };
    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument {:?}", extra.value));
    }
    Ok(command)
}

fn parse_id(word: Option<Word>) -> Result<i64, String> {
    let word = word.ok_or("missing player id")?;
    if word.key.is_some() {
        return Err(format!("invalid player id {:?}", word.value));
    }
    word.value
        .parse()
        .map_err(|_| format!("invalid player id {:?}", word.value))
}

/// Start the app and read commands from `input` until it ends or `quit`.
pub fn run<T, R, M, F>(
    app: &mut App<T>,
    main: &mut TerminalTarget<M>,
    form: &mut TerminalForm<F>,
    input: R,
) -> io::Result<()>
where
    T: Transport,
    R: BufRead,
    M: Write,
    F: Write,
{
    app.init(main, form);
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                main.note(&format!("{message}; {HELP}"));
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => main.note(HELP),
            Command::List => app.refresh(main),
            Command::Back => app.dispatch(Action::Back, main, form),
            Command::Remove(id) => app.dispatch(Action::Remove(id), main, form),
            Command::Details(id) => {
                // Prefer the record behind the button on screen; otherwise ask the server.
                let on_screen = actions(main.nodes()).into_iter().find_map(|action| match action {
                    Action::ShowDetails(player) if player.id == id => Some(player.clone()),
                    _ => None,
                });
                match on_screen.map(Ok).unwrap_or_else(|| app.fetch_player(id)) {
                    Ok(player) => app.dispatch(Action::ShowDetails(player), main, form),
                    Err(_) => main.note(&format!("no player #{id}")),
                }
            }
            Command::Add(values) => {
                form.values = values;
                app.dispatch(Action::Submit, main, form);
            }
        }
    }
    Ok(())
}
