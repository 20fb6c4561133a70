//! Core types for wayfarer.

pub mod message;
pub mod stream;

pub use message::*;
pub use stream::*;
