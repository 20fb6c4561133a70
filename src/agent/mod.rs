//! Agent session: one tool-augmented, streamed turn against a remote model.

pub mod config;
pub mod prompt;
pub mod session;

pub use config::AgentConfiguration;
pub use prompt::{Prompt, DEFAULT_INSTRUCTIONS};
pub use session::{AgentSession, FragmentStream, RunOptions};
