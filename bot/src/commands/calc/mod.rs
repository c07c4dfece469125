//! # Console Calculator
//!
//! File: bot/src/commands/calc/mod.rs
//!
//! ## Overview
//!
//! `gpabot calc` runs the same conversation the Telegram bot offers, in the
//! terminal. It needs no token and no network, which makes it handy for
//! trying the dialogue locally and for end-to-end tests.
//!
//! The session starts immediately (as if `/start` had been sent). `/start`,
//! `/cancel` and `/help` work as in Telegram; `bye` or end of input quits.
//!
//! ```bash
//! $ printf '2\nA\n3\nb-\n2\n' | gpabot calc
//! ```
//!
use crate::conversation::prompts::escape_html;
use crate::conversation::{Event, Reply, SessionStore, UserKey};
use crate::core::error::Result;
use crate::telegram::Command;
use anyhow::Context;
use clap::Parser;
use std::io::{BufRead, Write};
use teloxide::utils::command::BotCommands;
use tracing::debug;

/// The single identity used for the console session.
const CONSOLE_USER: UserKey = UserKey(0);

/// Arguments for `gpabot calc`.
#[derive(Parser, Debug)]
pub struct CalcArgs {
    /// Name the bot greets you with.
    #[arg(long, short, default_value = "there")]
    pub name: String,
}

/// Entry point for `gpabot calc`.
pub async fn handle_calc(args: CalcArgs) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_console(&args.name, stdin.lock(), stdout.lock())
}

/// Drives a console conversation from `input` to `output`.
pub fn run_console<R: BufRead, W: Write>(name: &str, input: R, mut output: W) -> Result<()> {
    let mut store = SessionStore::new();
    let greeting = store.dispatch(
        CONSOLE_USER,
        Event::Start {
            mention: escape_html(name),
        },
    );
    print_reply(&mut output, &greeting)?;

    for line in input.lines() {
        let line = line.context("Failed to read from stdin")?;
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("bye") {
            break;
        }

        let event = match console_event(trimmed, name) {
            Some(event) => event,
            None => {
                writeln!(output, "Unknown command. Try /help.\n")?;
                continue;
            }
        };
        debug!(?event, "console input");
        let reply = store.dispatch(CONSOLE_USER, event);
        print_reply(&mut output, &reply)?;
    }

    writeln!(output, "Goodbye!")?;
    output.flush()?;
    Ok(())
}

/// Maps a console line to an engine event; `None` for unknown commands.
fn console_event(line: &str, name: &str) -> Option<Event> {
    if !line.starts_with('/') {
        return Some(Event::Text(line.to_string()));
    }
    match Command::parse(line, "gpabot").ok()? {
        Command::Start => Some(Event::Start {
            mention: escape_html(name),
        }),
        Command::Cancel => Some(Event::Cancel),
        Command::Help => Some(Event::Help),
    }
}

fn print_reply<W: Write>(output: &mut W, reply: &Reply) -> Result<()> {
    writeln!(output, "{}\n", reply.plain_text()).context("Failed to write to stdout")?;
    Ok(())
}
