//! Command-line surface for the travel agent.

use std::io::{BufRead, Write};
use std::time::Duration;

use clap::Parser;

use crate::agent::Prompt;
use crate::config::ProviderSettings;
use crate::error::WayfarerError;

pub const DESTINATION_QUESTION: &str =
    "Enter your desired destination (leave blank for a random suggestion): ";

/// Plan a day trip with a tool-using AI agent
#[derive(Parser, Debug)]
#[command(name = "wayfarer", version, about = "Plan a vacation day trip with an AI agent")]
pub struct Cli {
    /// Destination to plan for; skips the interactive question
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Inference endpoint (overrides GH_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Model identifier (overrides GH_MODEL_ID)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Give up on the turn after this many seconds (0 = no limit)
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    /// Delay before printing each fragment, in milliseconds
    #[arg(long, default_value_t = 10)]
    pub pace_ms: u64,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Layer CLI overrides on top of environment settings.
    pub fn apply(&self, mut settings: ProviderSettings) -> ProviderSettings {
        if let Some(endpoint) = &self.endpoint {
            settings = settings.with_endpoint(endpoint.clone());
        }
        if let Some(model) = &self.model {
            settings = settings.with_model_id(model.clone());
        }
        settings
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
}

/// Ask for a destination on `output` and read one line from `input`.
pub fn ask_destination<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Prompt, WayfarerError> {
    output.write_all(DESTINATION_QUESTION.as_bytes())?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(Prompt::for_destination(Some(line.as_str())))
}

/// End the streamed answer with a newline.
///
/// A failed turn is reported ahead of any failure to write the newline.
pub fn close_output<W: Write>(
    sink: &mut W,
    outcome: Result<(), WayfarerError>,
) -> Result<(), WayfarerError> {
    let newline = writeln!(sink);
    outcome?;
    Ok(newline?)
}
