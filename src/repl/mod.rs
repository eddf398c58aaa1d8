//! REPL Module
//!
//! Reads commands line by line, dispatches them, and reports their errors.

pub mod commands;
mod session;

pub use commands::{execute, Command, Context, Flow};
pub use session::Session;

use std::io::Write;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::api::PokeApiClient;
use crate::error::Result;

/// Prompt printed before every line of input
pub const PROMPT: &str = "Pokedex > ";

/// Trims, lowercases, and splits input into words.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Runs the prompt loop until `exit` or end of input, then saves the Pokedex.
///
/// Command errors are printed and the loop continues. Only failures to read
/// input or write output end the loop early.
pub async fn run<I, W, R>(
    input: I,
    out: &mut W,
    session: &mut Session,
    client: &PokeApiClient,
    rng: &mut R,
) -> Result<()>
where
    I: AsyncBufRead + Unpin,
    W: Write,
    R: Rng,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            info!("End of input");
            break;
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let Some(command) = Command::parse(name) else {
            writeln!(out, "Unknown command")?;
            continue;
        };

        let mut ctx = Context {
            client,
            session: &mut *session,
            out: &mut *out,
            rng: &mut *rng,
        };
        match execute(command, args, &mut ctx).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => {
                warn!(command = command.name(), error = %e, "command failed");
                writeln!(out, "Error: {}", e)?;
            }
        }
    }

    session.save()
}
