use std::ops::AddAssign;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single content block inside a message body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Thinking {
        thinking: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signature: Option<String>,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        #[serde(default)]
        content: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_error: Option<bool>,
    },
    Image {
        #[serde(default)]
        source: Value,
    },
    /// Any other block, kept verbatim so it serializes back unchanged
    #[serde(untagged)]
    Unknown(Value),
}

impl ContentBlock {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_tool_use(&self) -> bool {
        matches!(self, ContentBlock::ToolUse { .. })
    }

    pub fn is_tool_result(&self) -> bool {
        matches!(self, ContentBlock::ToolResult { .. })
    }
}

/// Token accounting reported on assistant messages. Missing or null counters read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_u64_or_zero"
    )]
    pub input_tokens: u64,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_u64_or_zero"
    )]
    pub output_tokens: u64,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_u64_or_zero"
    )]
    pub cache_creation_input_tokens: u64,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_u64_or_zero"
    )]
    pub cache_read_input_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens
            + self.output_tokens
            + self.cache_creation_input_tokens
            + self.cache_read_input_tokens
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, other: Self) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
        self.cache_creation_input_tokens += other.cache_creation_input_tokens;
        self.cache_read_input_tokens += other.cache_read_input_tokens;
    }
}

/// Metadata line naming the leaf of the conversation's active branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub summary: String,
    pub leaf_uuid: String,
}

/// User message body: either a plain string or a list of blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl UserContent {
    /// Blocks view; plain-string content yields no blocks
    pub fn blocks(&self) -> &[ContentBlock] {
        match self {
            UserContent::Text(_) => &[],
            UserContent::Blocks(blocks) => blocks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(default = "default_user_role")]
    pub role: String,
    pub content: UserContent,
}

fn default_user_role() -> String {
    "user".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub model: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// Fields shared by every message record in a Claude Code log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_sidechain: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMessage {
    pub uuid: String,
    #[serde(default)]
    pub parent_uuid: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    pub message: UserPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_meta: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_use_result: Option<Value>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl UserMessage {
    pub fn has_tool_result(&self) -> bool {
        self.message.content.blocks().iter().any(ContentBlock::is_tool_result)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantMessage {
    pub uuid: String,
    #[serde(default)]
    pub parent_uuid: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_optional_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    pub message: AssistantPayload,
    #[serde(rename = "costUSD", default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<f64>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

impl AssistantMessage {
    pub fn tool_use_count(&self) -> usize {
        self.message.content.iter().filter(|b| b.is_tool_use()).count()
    }
}

/// A node in the conversation graph: one user or assistant record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    User(UserMessage),
    Assistant(AssistantMessage),
}

impl Message {
    pub fn uuid(&self) -> &str {
        match self {
            Message::User(m) => &m.uuid,
            Message::Assistant(m) => &m.uuid,
        }
    }

    pub fn parent_uuid(&self) -> Option<&str> {
        match self {
            Message::User(m) => m.parent_uuid.as_deref(),
            Message::Assistant(m) => m.parent_uuid.as_deref(),
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Message::User(m) => m.timestamp,
            Message::Assistant(m) => m.timestamp,
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            Message::User(_) => "user",
            Message::Assistant(_) => "assistant",
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Message::User(_))
    }

    pub fn content_blocks(&self) -> &[ContentBlock] {
        match self {
            Message::User(m) => m.message.content.blocks(),
            Message::Assistant(m) => &m.message.content,
        }
    }

    /// Text content joined by newlines. Tool and thinking blocks are left out.
    pub fn text(&self) -> String {
        if let Message::User(user) = self
            && let UserContent::Text(text) = &user.message.content
        {
            return text.clone();
        }
        let parts: Vec<&str> =
            self.content_blocks().iter().filter_map(ContentBlock::as_text).collect();
        parts.join("\n")
    }
}

/// JSON object that decoded fine but is not a summary or message
#[derive(Debug, Clone, PartialEq)]
pub struct UnrecognizedEntry {
    pub raw: Value,
    pub reason: String,
}

/// One decoded line of a conversation log
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Summary(Summary),
    Message(Message),
    Unrecognized(UnrecognizedEntry),
}
