//! Random vacation destination tool.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use super::arguments::ToolArguments;
use super::tool::Tool;
use super::types::AgentToolParameters;
use crate::error::WayfarerError;

pub const DESTINATION_TOOL_NAME: &str = "get_random_destination";

/// Destinations the tool picks from.
pub const DESTINATIONS: [&str; 10] = [
    "Paris, France",
    "Tokyo, Japan",
    "New York City, USA",
    "Sydney, Australia",
    "Rome, Italy",
    "Barcelona, Spain",
    "Cape Town, South Africa",
    "Rio de Janeiro, Brazil",
    "Bangkok, Thailand",
    "Vancouver, Canada",
];

/// Suggests a destination chosen uniformly from [`DESTINATIONS`].
pub struct DestinationTool {
    rng: Mutex<Box<dyn RngCore + Send>>,
    parameters: AgentToolParameters,
}

impl DestinationTool {
    /// Entropy-seeded source; picks are not reproducible.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Use a caller-supplied random source, e.g. a seeded one in tests.
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
            parameters: AgentToolParameters::empty(),
        }
    }

    pub fn invoke(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let idx = rng.gen_range(0..DESTINATIONS.len());
        DESTINATIONS[idx].to_string()
    }
}

impl Default for DestinationTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for DestinationTool {
    fn name(&self) -> &str {
        DESTINATION_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Provides a random vacation destination."
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(&self, _args: &ToolArguments) -> Result<String, WayfarerError> {
        Ok(self.invoke())
    }
}
