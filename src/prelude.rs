//! Convenience re-exports for common use.

pub use crate::agent::{AgentConfiguration, AgentSession, Prompt, RunOptions, DEFAULT_INSTRUCTIONS};
pub use crate::config::{Credential, ProviderSettings};
pub use crate::error::{Result, WayfarerError};
pub use crate::provider::ModelProvider;
pub use crate::render::StreamRenderer;
pub use crate::tools::{travel_tools, DestinationTool, FlightAdvisoryTool, Tool, ToolRegistry};
