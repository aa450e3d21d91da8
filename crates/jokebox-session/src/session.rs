//! One live client session bound to a streaming connection.

use std::sync::Arc;

use jokebox_core::{CallToolRequest, Envelope};
use jokebox_tools::ToolRegistry;
use tokio::sync::mpsc;

/// Event pushed onto a session's outbound streaming connection.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Result envelope for one invocation.
    Message(Envelope),
    /// Generic protocol-level failure, for errors no tool caught.
    Error { message: String },
}

/// A logical handle for one long-lived client connection.
///
/// Owns the sending half of the connection's outbound channel; the transport
/// owns the receiving half and drains it into the streaming response. When
/// the connection closes the transport drops both halves and removes the
/// session from the registry.
pub struct Session {
    outbound: mpsc::UnboundedSender<SessionEvent>,
    tools: Arc<ToolRegistry>,
}

impl Session {
    /// Bind a session to an outbound channel and the tool registry.
    #[must_use]
    pub fn new(outbound: mpsc::UnboundedSender<SessionEvent>, tools: Arc<ToolRegistry>) -> Self {
        Self { outbound, tools }
    }

    /// Run one invocation to completion and push the outcome onto the
    /// outbound connection.
    ///
    /// Tool-level failures arrive as ordinary envelopes. Errors no tool
    /// caught (unknown tool name, uncaught upstream failure) are translated
    /// here into a generic error event.
    pub async fn dispatch(&self, request: CallToolRequest) {
        let event = match self.tools.call(&request.name, &request.arguments).await {
            Ok(envelope) => SessionEvent::Message(envelope),
            Err(e) => {
                tracing::error!(tool = %request.name, error = %e, "tool invocation failed");
                SessionEvent::Error {
                    message: format!("tool invocation failed: {e}"),
                }
            }
        };

        // Send fails only when the connection is already gone; nothing to do
        // then but drop the result.
        let _ = self.outbound.send(event);
    }
}
