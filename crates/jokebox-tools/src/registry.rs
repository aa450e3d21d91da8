//! Named tool registry.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use jokebox_core::Envelope;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Tool invocation error.
///
/// Errors of this kind escape the tool instead of being folded into a text
/// envelope; the session layer turns them into a generic protocol-level
/// error event.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error(transparent)]
    Upstream(#[from] jokebox_core::UpstreamError),
}

/// A named operation invocable with a JSON parameter object.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// JSON schema of the parameter object.
    fn input_schema(&self) -> Value;

    /// Run the tool against the given arguments.
    async fn call(&self, arguments: &Value) -> Result<Envelope, ToolError>;
}

/// Descriptor advertised for a registered tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Registry of named tools.
///
/// Built once at startup and never mutated afterward.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool, keyed by its name.
    #[must_use]
    pub fn register(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.insert(tool.name(), tool);
        self
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Invoke the named tool.
    ///
    /// # Errors
    /// Returns `ToolError::UnknownTool` for unregistered names, or whatever
    /// uncaught error the tool itself produced.
    pub async fn call(&self, name: &str, arguments: &Value) -> Result<Envelope, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tool.call(arguments).await
    }

    /// Descriptors of all registered tools.
    #[must_use]
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<_> = self
            .tools
            .values()
            .map(|t| ToolDescriptor {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect();
        descriptors.sort_by_key(|d| d.name);
        descriptors
    }
}
