//! User interaction: free-text prompts, yes/no confirmation and status lines.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Interactive surface used by the resolver and the orchestrator.
pub trait Console {
    /// Shows `message` and returns the line the user typed (without the newline).
    fn ask(&self, message: &str) -> Result<String>;

    /// Yes/no question; an empty answer picks `default`.
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// One informational line.
    fn status(&self, message: &str);
}

/// Console backed by stdin/stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn ask(&self, message: &str) -> Result<String> {
        print!("{message}: ");
        io::stdout().flush().context("flush stdout")?;
        let mut line = String::new();
        let n = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read from stdin")?;
        if n == 0 {
            anyhow::bail!("stdin closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.ask(&format!("{message} {hint}"))?;
            match parse_yes_no(&answer, default) {
                Some(v) => return Ok(v),
                None => println!("Please answer y or n."),
            }
        }
    }

    fn status(&self, message: &str) {
        println!("{message}");
    }
}

fn parse_yes_no(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
