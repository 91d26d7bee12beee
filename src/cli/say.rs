//! One-shot "say" command

use std::error::Error;
use std::io;

use crate::cli::chat::print_submission;
use crate::core::dispatch::{Dispatcher, Submission};

/// Exit status for a `say` outcome; non-zero when nothing useful came back.
pub fn exit_code(submission: &Submission) -> i32 {
    match submission {
        Submission::Conversational(_) => 0,
        Submission::Dispatched { result, .. } if result.is_success() => 0,
        Submission::Dispatched { .. } | Submission::Busy | Submission::Ignored => 1,
    }
}

pub async fn run_say(dispatcher: &Dispatcher, text: Vec<String>) -> Result<(), Box<dyn Error>> {
    let text = text.join(" ");
    if text.trim().is_empty() {
        eprintln!("Usage: plugchat say <message>");
        std::process::exit(1);
    }

    let submission = dispatcher.submit(&text).await;
    print_submission(&mut io::stdout(), dispatcher, &submission)?;

    match exit_code(&submission) {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}
