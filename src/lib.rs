//! wayfarer: a tool-augmented travel planning agent.
//!
//! One turn against an OpenAI-compatible chat-completions endpoint (GitHub
//! Models by default). The model can call two local tools, a random
//! destination picker and a flight disruption advisory, and its answer is
//! streamed back fragment by fragment.
//!
//! # Quick Start
//!
//! ```no_run
//! use wayfarer::prelude::*;
//!
//! # async fn example() -> wayfarer::error::Result<()> {
//! let settings = ProviderSettings::from_env()?;
//! let config = AgentConfiguration::new(DEFAULT_INSTRUCTIONS, travel_tools()?, settings);
//! let session = AgentSession::connect(config)?;
//!
//! let prompt = Prompt::for_destination(Some("Lisbon, Portugal"));
//! let fragments = session.run(&prompt, RunOptions::new())?;
//! StreamRenderer::new(std::io::stdout()).render(fragments).await?;
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod render;
pub mod tools;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
