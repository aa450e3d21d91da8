//! Tool abstraction and the joke-fetching operations.
//!
//! Provides:
//! - `Tool` - Trait for a named, schema-described async operation
//! - `ToolRegistry` - Immutable-after-startup lookup and dispatch by name
//! - The five joke tools backed by a `JokeUpstream` implementation

pub mod jokes;
pub mod registry;

pub use jokes::{Categories, DadJoke, JokeByCategory, RandomJoke, YoMamaJoke};
pub use registry::{Tool, ToolDescriptor, ToolError, ToolRegistry};
