//! Parsing `mcpServers` out of MCP-bearing JSON files

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::model::McpServer;

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extract every server declared under the top-level `mcpServers` object
///
/// Servers come out in key order. Entries whose descriptor is not an object
/// are skipped; unknown fields are kept in `descriptor`.
#[must_use]
pub fn parse_servers(document: &Value, label: &str, source: &Path) -> Vec<McpServer> {
    let Some(servers) = document.get("mcpServers").and_then(Value::as_object) else {
        return Vec::new();
    };

    servers
        .iter()
        .filter(|(_, descriptor)| descriptor.is_object())
        .map(|(name, descriptor)| McpServer {
            server_name: name.clone(),
            command: descriptor
                .get("command")
                .and_then(Value::as_str)
                .map(str::to_string),
            args: descriptor
                .get("args")
                .and_then(Value::as_array)
                .map(|args| args.iter().map(as_text).collect())
                .unwrap_or_default(),
            env: descriptor
                .get("env")
                .and_then(Value::as_object)
                .map(|env| {
                    env.iter()
                        .map(|(k, v)| (k.clone(), as_text(v)))
                        .collect::<BTreeMap<_, _>>()
                })
                .unwrap_or_default(),
            transport: descriptor
                .get("type")
                .and_then(Value::as_str)
                .map(str::to_string),
            url: descriptor
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
            disabled: descriptor
                .get("disabled")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            source_description: label.to_string(),
            source_path: source.to_path_buf(),
            descriptor: descriptor.clone(),
        })
        .collect()
}
