//! Tool system for function calling.

pub mod advisory;
pub mod arguments;
pub mod destination;
pub mod registry;
pub mod tool;
pub mod types;

pub use advisory::FlightAdvisoryTool;
pub use arguments::ToolArguments;
pub use destination::DestinationTool;
pub use registry::ToolRegistry;
pub use tool::Tool;
pub use types::{AgentToolParameters, ParameterKind, ToolParameter};

use crate::error::WayfarerError;

/// Registry holding the destination and flight advisory tools.
pub fn travel_tools() -> Result<ToolRegistry, WayfarerError> {
    let mut registry = ToolRegistry::new();
    registry.register(DestinationTool::new())?;
    registry.register(FlightAdvisoryTool::new())?;
    Ok(registry)
}
