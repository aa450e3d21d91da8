//! Wire protocol for tool invocations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool invocation posted by a client against an open session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolRequest {
    /// Name of the tool to invoke.
    pub name: String,
    /// Tool arguments; `null` when the tool takes none.
    #[serde(default)]
    pub arguments: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_request_with_arguments() {
        let req: CallToolRequest =
            serde_json::from_str(r#"{"name":"get-joke-by-category","arguments":{"category":"dev"}}"#)
                .unwrap();
        assert_eq!(req.name, "get-joke-by-category");
        assert_eq!(req.arguments["category"], "dev");
    }

    #[test]
    fn arguments_default_to_null() {
        let req: CallToolRequest = serde_json::from_str(r#"{"name":"get-random-joke"}"#).unwrap();
        assert_eq!(req.name, "get-random-joke");
        assert!(req.arguments.is_null());
    }
}
