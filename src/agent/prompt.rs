//! Travel-planning prompt construction.

use std::fmt;

/// Persona given to the model as the system message.
pub const DEFAULT_INSTRUCTIONS: &str =
    "You are a helpful AI Agent that can help plan vacations for customers at random destinations";

/// The user message for a turn. Fixed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Build the request for `destination`, or ask for a random one when it is blank.
    pub fn for_destination(destination: Option<&str>) -> Self {
        match destination.map(str::trim).filter(|d| !d.is_empty()) {
            None => Self(
                "I want to go on vacation. Please recommend a random destination and plan a day trip. \
                 Add a fun fact about the destination. Suggest a best airplane company to fly with and \
                 a restaurant to eat at. Also check if flights are available to the recommended \
                 destination due to current political or war situation."
                    .to_string(),
            ),
            Some(destination) => Self(format!(
                "I want to go on vacation to {destination}. Please plan a day trip for me at that \
                 destination. Add a fun fact about the destination. Suggest a best airplane company to \
                 fly with and a restaurant to eat at. Also check if flights are available to \
                 {destination} due to current political or war situation."
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
