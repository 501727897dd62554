//! Line-driven interactive session
//!
//! Plain lines edit the search query; lines starting with `:` are
//! commands. State changes are printed as the lifecycles publish them, so
//! typing a new query while a search is in flight simply supersedes it.

use popcorn_core::{Key, MovieId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::app::App;
use crate::error::{AppError, Result};
use crate::render;

pub const HELP: &str = "\
Type a title to search. Commands:
  :open N     open result N (again to close)
  :rate N     rate the open movie 1-10
  :add        add the open movie to your list
  :rm ID      remove a movie from your list
  :esc        press Escape (close details)
  :enter      press Enter (clear the search)
  :list       show your watch list
  :help       show this help
  :quit       leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Open(usize),
    Rate(u8),
    Add,
    Remove(MovieId),
    Escape,
    Enter,
    List,
    Help,
    Quit,
}

/// Parse one input line
pub fn parse(line: &str) -> Result<Command> {
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Query(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let command = match (name, arg) {
        ("open" | "o", Some(n)) => {
            let n: usize = n
                .parse()
                .map_err(|_| AppError::Command(format!("not a result number: {n}")))?;
            if n == 0 {
                return Err(AppError::Command("results are numbered from 1".into()));
            }
            Command::Open(n - 1)
        }
        ("rate" | "r", Some(n)) => Command::Rate(
            n.parse()
                .map_err(|_| AppError::Command(format!("not a rating: {n}")))?,
        ),
        ("rm" | "remove", Some(id)) => Command::Remove(MovieId::new(id)),
        ("add" | "a", None) => Command::Add,
        ("esc" | "escape", None) => Command::Escape,
        ("enter", None) => Command::Enter,
        ("list" | "l", None) => Command::List,
        ("help" | "h" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        _ => return Err(AppError::Command(format!("unknown command :{rest} (try :help)"))),
    };
    Ok(command)
}

/// Apply one command to the app
pub async fn execute(app: &mut App, command: Command) -> Result<()> {
    debug!(?command, "Executing command");
    match command {
        Command::Query(query) => {
            // Outcome is printed by the state watcher
            drop(app.set_query(query));
        }
        Command::Open(index) => {
            drop(app.toggle_result(index)?);
        }
        Command::Rate(rating) => {
            app.rate(rating)?;
            println!("Your rating: {rating}/10 (:add to add to list)");
        }
        Command::Add => {
            let movie = app.add_selected().await?;
            println!("Added {} with your rating {}", movie.title, movie.user_rating);
        }
        Command::Remove(id) => {
            if app.remove_watched(&id).await? {
                println!("Removed {id}");
                print_watched(app);
            } else {
                println!("{id} is not on your list");
            }
        }
        Command::Escape => {
            if app.press(&Key::escape()) == 0 {
                println!("Nothing to close");
            }
        }
        Command::Enter => {
            app.press(&Key::enter());
        }
        Command::List => print_watched(app),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

/// Run until `:quit` or end of input
pub async fn run(app: &mut App) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut searches = app.subscribe_search();
    let mut details = app.subscribe_details();

    println!("{HELP}\n");
    print_watched(app);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse(line.trim_end_matches(['\r', '\n'])) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = execute(app, command).await {
                            println!("⛔ {e}");
                        }
                    }
                    Err(e) => println!("{e}"),
                }
            }
            Ok(()) = searches.changed() => {
                let state = searches.borrow_and_update().clone();
                println!("{}", render::search(&state));
            }
            Ok(()) = details.changed() => {
                let state = details.borrow_and_update().clone();
                if state.is_idle() {
                    print_watched(app);
                } else {
                    println!(
                        "{}",
                        render::detail(&state, app.watched_rating(), app.pending_rating())
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_watched(app: &App) {
    println!("{}", render::summary(&app.summary()));
    if !app.watched().is_empty() {
        println!("{}", render::watched_list(app.watched().movies()));
    }
}
