//! Interactive discovery deck for the terminal.
//!
//! Each line of input is one command: `l` swipes left (pass), `r` swipes
//! right (like), `d <dx>` drags the front card by `dx` pixels and releases,
//! `reload` fetches a fresh batch, `h` prints help, `q` quits. End of input
//! also quits.

#[cfg(test)]
#[path = "discover_test.rs"]
mod discover_test;

use std::io::Write;
use std::sync::Arc;

use client::net::api::DiscoveryApi;
use client::net::types::ProfileResponse;
use client::state::deck::Deck;
use client::state::discovery::{DiscoveryState, SwipeResult};
use client::util::age::age_today;
use swipe::input::SwipeDirection;
use swipe::listeners::LocalRegistry;
use swipe::style::CardStyle;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::CliError;

const HELP: &str = "commands: l = pass, r = like, d <dx> = drag, reload, h = help, q = quit";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeckCommand {
    Swipe(SwipeDirection),
    Drag(f64),
    Reload,
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<DeckCommand>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let command = match head {
        "l" | "left" | "pass" => DeckCommand::Swipe(SwipeDirection::Left),
        "r" | "right" | "like" => DeckCommand::Swipe(SwipeDirection::Right),
        "reload" => DeckCommand::Reload,
        "h" | "help" | "?" => DeckCommand::Help,
        "q" | "quit" | "exit" => DeckCommand::Quit,
        "d" | "drag" => {
            let raw = parts.next().ok_or("drag needs an offset, e.g. `d 150`")?;
            let dx = raw.parse::<f64>().map_err(|_| format!("invalid drag offset '{raw}'"))?;
            if !dx.is_finite() {
                return Err(format!("invalid drag offset '{raw}'"));
            }
            DeckCommand::Drag(dx)
        }
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(Some(command))
}

/// One-line summary of a candidate.
pub fn describe(profile: &ProfileResponse) -> String {
    let mut parts = vec![match age_today(profile.birthdate.as_deref()) {
        Some(age) => format!("{}, {age}", profile.display_name()),
        None => profile.display_name().to_owned(),
    }];
    parts.extend(profile.course.clone());
    parts.extend(profile.semester.map(|s| format!("semester {s}")));
    parts.extend(profile.gender.map(|g| g.label().to_owned()));
    parts.join(" | ")
}

fn render(deck: &Deck, out: &mut impl Write) -> Result<(), CliError> {
    let cards: Vec<(&ProfileResponse, CardStyle)> = deck.card_styles();
    if cards.is_empty() {
        writeln!(out, "no more profiles; `reload` to fetch more, `q` to quit")?;
        return Ok(());
    }
    for (index, (profile, style)) in cards.iter().enumerate() {
        let marker = if index == 0 { ">" } else { " " };
        writeln!(out, "{marker} {}", describe(profile))?;
        tracing::debug!(id = profile.id, css = %style.to_css(), "card style");
    }
    if let Some(bio) = cards[0].0.bio.as_deref() {
        writeln!(out, "  \"{bio}\"")?;
    }
    Ok(())
}

fn report(results: &[SwipeResult], out: &mut impl Write) -> Result<(), CliError> {
    for result in results {
        match result {
            SwipeResult::Liked { response: Some(response), .. } if response.is_match => {
                let name = response.to_user_vorname.as_deref().unwrap_or("someone");
                writeln!(out, "It's a match with {name}!")?;
            }
            SwipeResult::Liked { response: Some(_), .. } => writeln!(out, "liked")?,
            SwipeResult::Liked { response: None, .. } => writeln!(out, "like failed; moving on")?,
            SwipeResult::Passed { .. } => writeln!(out, "passed")?,
            SwipeResult::Exhausted => writeln!(out, "nothing left to swipe")?,
        }
    }
    Ok(())
}

/// Drive the deck from `input` until quit or end of input.
pub async fn run<R, W>(api: &dyn DiscoveryApi, input: R, out: &mut W) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut deck = Deck::new(DiscoveryState::new());
    deck.activate(Arc::new(LocalRegistry::new()));

    if !deck.load(api).await {
        if let Some(error) = deck.discovery().error() {
            writeln!(out, "{error}")?;
        }
    }
    render(&deck, out)?;
    writeln!(out, "{HELP}")?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        let results = match command {
            DeckCommand::Quit => break,
            DeckCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            DeckCommand::Reload => {
                if !deck.load(api).await {
                    if let Some(error) = deck.discovery().error() {
                        writeln!(out, "{error}")?;
                    }
                }
                Vec::new()
            }
            DeckCommand::Swipe(direction) => deck.swipe(direction, api).await,
            DeckCommand::Drag(dx) => {
                let results = deck.drag(dx, api).await;
                if results.is_empty() {
                    writeln!(out, "snapped back")?;
                }
                results
            }
        };
        report(&results, out)?;
        render(&deck, out)?;
    }

    deck.deactivate();
    Ok(())
}
