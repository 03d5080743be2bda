//! Command handling for the interactive loop.

use crate::backend::GatewayApi;
use crate::render;
use crate::session::{ExplorerSession, Phase, SessionError};
use std::io::{self, Write};

pub const HELP: &str = "Commands:
  r  fetch a random anime
  d  load details and gallery for the current anime
  h  show this help
  q  quit";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Random,
    Details,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Command::Empty,
            "r" => Command::Random,
            "d" => Command::Details,
            "h" => Command::Help,
            "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Run `command` against the session, writing all output to `out`.
///
/// The loading line is written before the fetch starts, so it always precedes
/// the rendered result. Returns `false` once the user asked to quit.
pub async fn execute<G, W>(
    session: &mut ExplorerSession<G>,
    command: Command,
    out: &mut W,
) -> io::Result<bool>
where
    G: GatewayApi,
    W: Write,
{
    match command {
        Command::Empty => {}
        Command::Quit => return Ok(false),
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Unknown(other) => {
            writeln!(out, "Unknown command '{}'. Type h for help.", other)?
        }
        Command::Random => {
            announce(out, Phase::FetchingSummary)?;
            session.trigger_random_fetch().await;
            writeln!(out, "\n{}", render::render_session(session))?;
        }
        Command::Details => {
            if session.summary().is_none() {
                writeln!(out, "{}", SessionError::NoSummary)?;
                return Ok(true);
            }
            announce(out, Phase::FetchingDetail)?;
            if let Err(e) = session.trigger_detail_fetch().await {
                writeln!(out, "{}", e)?;
                return Ok(true);
            }
            writeln!(out, "\n{}", render::render_session(session))?;
        }
    }

    out.flush()?;
    Ok(true)
}

fn announce<W: Write>(out: &mut W, phase: Phase) -> io::Result<()> {
    if let Some(message) = render::loading_message(phase) {
        writeln!(out, "{}", message)?;
        out.flush()?;
    }
    Ok(())
}
