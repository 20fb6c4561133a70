//! Tool trait.

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::types::AgentToolParameters;
use crate::error::WayfarerError;

/// A named, described function the model may call mid-turn.
///
/// The description is the only signal the model gets for deciding when the
/// tool applies, so it must say exactly that.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Natural-language description sent to the model.
    fn description(&self) -> &str;

    /// Declared parameters, in declaration order.
    fn parameters(&self) -> &AgentToolParameters;

    /// Execute the tool. The returned string is handed to the model verbatim.
    async fn execute(&self, args: &ToolArguments) -> Result<String, WayfarerError>;
}
