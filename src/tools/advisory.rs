//! Flight disruption advisory tool.

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::tool::Tool;
use super::types::AgentToolParameters;
use crate::error::WayfarerError;

pub const ADVISORY_TOOL_NAME: &str = "check_flight_availability";

/// Regions with possible flight disruption. Earlier entries win when several match.
pub const WATCH_LIST: [&str; 10] = [
    "Ukraine",
    "Russia",
    "Israel",
    "Syria",
    "Afghanistan",
    "Sudan",
    "Yemen",
    "Myanmar",
    "Iran",
    "North Korea",
];

/// Flags destinations that fall in a watch-listed region.
pub struct FlightAdvisoryTool {
    parameters: AgentToolParameters,
}

impl FlightAdvisoryTool {
    pub fn new() -> Self {
        Self {
            parameters: AgentToolParameters::object()
                .string(
                    "destination",
                    "Destination to check, e.g. \"Kyiv, Ukraine\"",
                    true,
                )
                .build(),
        }
    }

    /// Watch-list entry matched by `destination`, compared case-insensitively.
    pub fn matched_region(destination: &str) -> Option<&'static str> {
        let haystack = destination.to_lowercase();
        WATCH_LIST
            .iter()
            .copied()
            .find(|region| haystack.contains(&region.to_lowercase()))
    }

    /// Advisory note for `destination`, or an empty string when nothing matches.
    pub fn invoke(&self, destination: &str) -> String {
        match Self::matched_region(destination) {
            Some(_) => format!(
                "Note: Flights to {destination} may be unavailable or disrupted due to current political or war situation."
            ),
            None => String::new(),
        }
    }
}

impl Default for FlightAdvisoryTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FlightAdvisoryTool {
    fn name(&self) -> &str {
        ADVISORY_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Checks if flights are available to a destination based on current political or war situation."
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(&self, args: &ToolArguments) -> Result<String, WayfarerError> {
        let destination = args.get_str("destination")?;
        Ok(self.invoke(destination))
    }
}
