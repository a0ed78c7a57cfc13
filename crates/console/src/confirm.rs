//! Blocking confirmation before destructive actions.

use std::io::{self, BufRead, Write};

pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Asks on the terminal; anything but `y`/`yes` declines.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Confirm for TerminalPrompt {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

/// Fixed answer, for `--yes` and tests.
#[derive(Debug, Clone, Copy)]
pub struct AssumeAnswer(pub bool);

impl Confirm for AssumeAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
