use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use roster_core::view::PlayerForm;
use roster_core::{App, RosterClient, DEFAULT_API_URL};

use crate::terminal::{Format, TerminalForm, TerminalTarget};
use crate::transport::UreqTransport;

mod session;
mod terminal;
mod transport;

/// Browse and edit a Puppy Bowl roster
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Base URL of the players API
    #[arg(long, env = "ROSTER_API_URL", default_value = DEFAULT_API_URL)]
    base_url: String,

    /// Print views as HTML markup instead of text
    #[arg(long)]
    html: bool,

    /// Log every request and response status
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every player
    #[command(visible_alias = "ls")]
    List,

    /// Show one player
    Show { id: i64 },

    /// Add a player, then show the roster
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        breed: String,
        /// Left to the server default when omitted
        #[arg(long, default_value = "")]
        status: String,
        #[arg(long)]
        image_url: String,
    },

    /// Remove a player, then show the roster
    #[command(visible_alias = "rm")]
    Remove { id: i64 },

    /// Start an interactive session (the default)
    Session,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let format = if cli.html { Format::Html } else { Format::Text };
    let mut app = App::new(RosterClient::new(&cli.base_url), UreqTransport::new());
    let mut main = TerminalTarget::new(io::stdout(), format);

    match cli.command.unwrap_or(Command::Session) {
        Command::List => {
            let players = app.fetch_all_players()?;
            app.render_all_players(&mut main, Some(&players));
        }
        Command::Show { id } => {
            let player = app
                .fetch_player(id)
                .with_context(|| format!("could not load player #{id}"))?;
            app.render_player(&mut main, &player);
        }
        Command::Add {
            name,
            breed,
            status,
            image_url,
        } => {
            let form = PlayerForm {
                name,
                breed,
                status,
                image_url,
            };
            app.add_player(&form.to_new_player())?;
            app.refresh(&mut main);
        }
        Command::Remove { id } => {
            app.remove_player(id)
                .with_context(|| format!("could not remove player #{id}"))?;
            app.refresh(&mut main);
        }
        Command::Session => {
            let mut form = TerminalForm::new(io::stdout(), format);
            session::run(&mut app, &mut main, &mut form, io::stdin().lock())?;
        }
    }
    Ok(())
}
