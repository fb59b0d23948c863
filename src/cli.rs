//! Command-line interface definitions for the news dashboard.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials and the API root can also come from environment variables,
//! and every option left unset falls back to the config file.

use crate::controller::Submission;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the news dashboard.
///
/// # Examples
///
/// ```sh
/// # Top headlines for the configured defaults
/// NEWS_API_KEY=... news_dashboard -o ./dashboard.html
///
/// # Search instead of headlines
/// news_dashboard --search "climate summit"
///
/// # Keep reading submissions from stdin
/// news_dashboard --country de --category sports --interactive
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// News API access key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Root URL of the news API
    #[arg(long, env = "NEWS_API_URL")]
    pub api_url: Option<String>,

    /// Initially selected country code
    #[arg(long)]
    pub country: Option<String>,

    /// Initially selected category
    #[arg(long)]
    pub category: Option<String>,

    /// Initial search text; takes precedence over country and category
    #[arg(short, long)]
    pub search: Option<String>,

    /// Path of the rendered HTML page
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read further form submissions from stdin after the initial load
    #[arg(short, long)]
    pub interactive: bool,
}

/// A line typed in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:country <code>` selects a country without submitting.
    Country(String),
    /// `:category <name>` selects a category without submitting.
    Category(String),
    /// `:quit` stops reading.
    Quit,
    /// Anything else submits the form with the line as search text.
    Submit(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (trimmed, ""),
        };
        match head {
            ":country" => Command::Country(rest.to_string()),
            ":category" => Command::Category(rest.to_string()),
            ":quit" | ":q" => Command::Quit,
            _ => Command::Submit(trimmed.to_string()),
        }
    }

    /// Parse one raw stdin line; bytes that are not UTF-8 are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, std::str::Utf8Error> {
        std::str::from_utf8(bytes).map(Self::parse)
    }
}

/// What the interactive loop does after a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A selection was recorded; nothing to send yet.
    Pending,
    Submit(Submission),
    Quit,
}

/// Selections typed since the last submission.
#[derive(Debug, Default)]
pub struct PendingForm {
    submission: Submission,
}

impl PendingForm {
    pub fn step(&mut self, command: Command) -> Step {
        match command {
            Command::Quit => Step::Quit,
            Command::Country(code) => {
                self.submission.country = Some(code);
                Step::Pending
            }
            Command::Category(category) => {
                self.submission.category = Some(category);
                Step::Pending
            }
            Command::Submit(search) => {
                let mut submission = std::mem::take(&mut self.submission);
                submission.search = search;
                Step::Submit(submission)
            }
        }
    }
}
