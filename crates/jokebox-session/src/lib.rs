//! Session registry and invocation dispatch for open streaming connections.
//!
//! Provides:
//! - `Session` - One live client connection and its outbound event channel
//! - `SessionRegistry` - Register/lookup/unregister by opaque identifier

pub mod registry;
pub mod session;

pub use registry::{SessionId, SessionRegistry};
pub use session::{Session, SessionEvent};
