//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for conversation log files on disk
pub struct ConversationLogBuilder {
    temp_dir: TempDir,
    lines: Vec<String>,
}

impl ConversationLogBuilder {
    /// Create a new builder with no lines
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, lines: Vec::new() }
    }

    /// Append a record built by [`MessageBuilder`]
    pub fn with_entry(mut self, entry: MessageBuilder) -> Self {
        self.lines.push(entry.to_json());
        self
    }

    /// Append a summary line pointing at `leaf_uuid`
    pub fn with_summary(mut self, summary: &str, leaf_uuid: &str) -> Self {
        let line = json!({"type": "summary", "summary": summary, "leafUuid": leaf_uuid});
        self.lines.push(line.to_string());
        self
    }

    /// Append a raw line verbatim (malformed JSON, blank lines, unknown record types)
    pub fn with_raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Write the log joined with `\n` and return (dir guard, file path)
    pub fn build(self) -> (TempDir, PathBuf) {
        self.build_with_separator("\n")
    }

    /// Write the log joined with the given line separator
    pub fn build_with_separator(self, separator: &str) -> (TempDir, PathBuf) {
        let path = self.temp_dir.path().join("session.jsonl");
        fs::write(&path, self.lines.join(separator)).expect("Failed to write conversation log");
        (self.temp_dir, path)
    }
}

impl Default for ConversationLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for user and assistant records
pub struct MessageBuilder {
    value: Value,
}

impl MessageBuilder {
    /// Create a user message with plain-text content
    pub fn user(uuid: &str) -> Self {
        Self {
            value: json!({
                "type": "user",
                "uuid": uuid,
                "parentUuid": null,
                "timestamp": "2024-01-15T10:30:00Z",
                "sessionId": "550e8400-e29b-41d4-a716-446655440000",
                "message": {"role": "user", "content": "Test message"}
            }),
        }
    }

    /// Create an assistant message with one text block
    pub fn assistant(uuid: &str) -> Self {
        Self {
            value: json!({
                "type": "assistant",
                "uuid": uuid,
                "parentUuid": null,
                "timestamp": "2024-01-15T10:30:01Z",
                "sessionId": "550e8400-e29b-41d4-a716-446655440000",
                "message": {
                    "model": "claude-sonnet-4",
                    "content": [{"type": "text", "text": "Test response"}],
                    "stop_reason": "end_turn"
                }
            }),
        }
    }

    /// Set the parent uuid
    pub fn parent(mut self, parent_uuid: &str) -> Self {
        self.value["parentUuid"] = json!(parent_uuid);
        self
    }

    /// Set the timestamp (RFC3339)
    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.value["timestamp"] = json!(timestamp);
        self
    }

    /// Remove the timestamp field
    pub fn without_timestamp(mut self) -> Self {
        if let Some(object) = self.value.as_object_mut() {
            object.remove("timestamp");
        }
        self
    }

    /// Set the message text
    pub fn text(mut self, text: &str) -> Self {
        if self.value["type"] == "user" {
            self.value["message"]["content"] = json!(text);
        } else {
            self.value["message"]["content"] = json!([{"type": "text", "text": text}]);
        }
        self
    }

    /// Replace the content with raw blocks
    pub fn content_blocks(mut self, blocks: Vec<Value>) -> Self {
        self.value["message"]["content"] = Value::Array(blocks);
        self
    }

    /// Set the assistant model
    pub fn model(mut self, model: &str) -> Self {
        self.value["message"]["model"] = json!(model);
        self
    }

    /// Set the assistant token usage
    pub fn usage(mut self, input: u64, output: u64) -> Self {
        self.value["message"]["usage"] = json!({"input_tokens": input, "output_tokens": output});
        self
    }

    /// Set cost and response duration
    pub fn cost(mut self, cost_usd: f64, duration_ms: u64) -> Self {
        self.value["costUSD"] = json!(cost_usd);
        self.value["durationMs"] = json!(duration_ms);
        self
    }

    /// A tool_use content block
    pub fn tool_use_block(id: &str, name: &str) -> Value {
        json!({"type": "tool_use", "id": id, "name": name, "input": {"path": "/tmp/file.txt"}})
    }

    /// A tool_result content block
    pub fn tool_result_block(tool_use_id: &str, is_error: bool) -> Value {
        json!({
            "type": "tool_result",
            "tool_use_id": tool_use_id,
            "content": "ok",
            "is_error": is_error
        })
    }

    /// Convert to a JSON line
    pub fn to_json(&self) -> String {
        self.value.to_string()
    }
}

/// Helper to write a realistic branching session and return its path
///
/// ```text
/// u1 ─ a1 ─ u2 ─ a2            (abandoned)
///            └── u2b ─ a2b     (active, summary leaf)
/// ```
pub fn branching_session() -> (TempDir, PathBuf) {
    ConversationLogBuilder::new()
        .with_summary("Refactor the parser", "a2b")
        .with_entry(
            MessageBuilder::user("u1")
                .text("Please refactor the parser")
                .timestamp("2024-01-15T10:00:00Z"),
        )
        .with_entry(
            MessageBuilder::assistant("a1")
                .parent("u1")
                .timestamp("2024-01-15T10:00:05Z")
                .content_blocks(vec![
                    json!({"type": "text", "text": "Reading the file"}),
                    MessageBuilder::tool_use_block("t1", "Read"),
                ])
                .usage(100, 50)
                .cost(0.01, 1000),
        )
        .with_entry(
            MessageBuilder::user("u2")
                .parent("a1")
                .timestamp("2024-01-15T10:00:06Z")
                .content_blocks(vec![MessageBuilder::tool_result_block("t1", false)]),
        )
        .with_entry(
            MessageBuilder::assistant("a2")
                .parent("u2")
                .timestamp("2024-01-15T10:00:10Z")
                .text("First attempt")
                .usage(200, 80)
                .cost(0.02, 2000),
        )
        .with_entry(
            MessageBuilder::user("u2b")
                .parent("a1")
                .timestamp("2024-01-15T10:01:00Z")
                .text("Try a different approach"),
        )
        .with_entry(
            MessageBuilder::assistant("a2b")
                .parent("u2b")
                .timestamp("2024-01-15T10:01:30Z")
                .model("claude-opus-4")
                .text("Second attempt")
                .usage(300, 120)
                .cost(0.03, 3000),
        )
        .build()
}

/// Path helper for tests that only need the file
pub fn path_of(session: &(TempDir, PathBuf)) -> &Path {
    &session.1
}
