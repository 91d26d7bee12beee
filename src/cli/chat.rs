//! Line-oriented interactive chat.

use std::error::Error;
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::core::dispatch::{Dispatcher, Submission};
use crate::render::{render_message, render_skills};

/// Past messages replayed when a session starts.
const REPLAY_LIMIT: usize = 20;

const HELP: &[&str] = &[
    "Commands:",
    "  /skills   List available skills",
    "  /clear    Clear the chat history",
    "  /help     Show this help",
    "  /quit     Leave the chat",
    "Anything else is sent to the assistant.",
];

enum LocalCommand {
    Quit,
    Clear,
    Skills,
    Help,
}

fn local_command(line: &str) -> Option<LocalCommand> {
    match line.trim().to_lowercase().as_str() {
        "/quit" | "/exit" => Some(LocalCommand::Quit),
        "/clear" => Some(LocalCommand::Clear),
        "/skills" => Some(LocalCommand::Skills),
        "/help" => Some(LocalCommand::Help),
        _ => None,
    }
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Writes what a submission produced.
pub fn print_submission<W: Write>(
    out: &mut W,
    dispatcher: &Dispatcher,
    submission: &Submission,
) -> io::Result<()> {
    let registry = dispatcher.registry();
    match submission {
        Submission::Ignored => Ok(()),
        Submission::Conversational(reply) => write_lines(out, &render_message(reply, registry)),
        Submission::Dispatched { message, .. } => {
            write_lines(out, &render_message(message, registry))
        }
        Submission::Busy => writeln!(
            out,
            "Still working on the previous request; your message was saved but not run."
        ),
    }
}

async fn replay_history<W: Write>(out: &mut W, dispatcher: &Dispatcher) -> io::Result<()> {
    let store = dispatcher.store().lock().await;
    let messages = store.messages();
    let skipped = messages.len().saturating_sub(REPLAY_LIMIT);
    if skipped > 0 {
        writeln!(out, "({skipped} earlier messages not shown)")?;
    }
    for message in &messages[skipped..] {
        write_lines(out, &render_message(message, dispatcher.registry()))?;
    }
    Ok(())
}

/// Reads lines from `input` until EOF or `/quit`.
pub async fn run_loop<R, W>(
    dispatcher: &Dispatcher,
    input: R,
    out: &mut W,
) -> Result<(), Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match local_command(&line) {
            Some(LocalCommand::Quit) => break,
            Some(LocalCommand::Clear) => {
                dispatcher.clear().await;
                writeln!(out, "Chat history cleared.")?;
            }
            Some(LocalCommand::Skills) => write_lines(out, &render_skills(dispatcher.registry()))?,
            Some(LocalCommand::Help) => {
                for line in HELP {
                    writeln!(out, "{line}")?;
                }
            }
            None => {
                let submission = dispatcher.submit(&line).await;
                print_submission(out, dispatcher, &submission)?;
            }
        }
    }
    Ok(())
}

pub async fn run_chat(dispatcher: &Dispatcher) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "plugchat {}: weather, calculator and dictionary skills. Type /help for commands.",
        env!("CARGO_PKG_VERSION")
    )?;
    replay_history(&mut stdout, dispatcher).await?;

    let stdin = BufReader::new(tokio::io::stdin());
    run_loop(dispatcher, stdin, &mut stdout).await
}
