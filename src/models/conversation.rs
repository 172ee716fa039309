use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::entry::{AssistantMessage, Message, Summary, TokenUsage, UserMessage};

/// A problem recorded while parsing or validating a conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    /// 1-based line number. Approximate for structural errors.
    pub line: usize,
    pub error: String,
    /// Raw or re-serialized record text, empty when unavailable
    pub content: String,
}

impl ParseError {
    pub fn new(line: usize, error: impl Into<String>, content: impl Into<String>) -> Self {
        Self { line, error: error.into(), content: content.into() }
    }
}

/// Everything recovered from one conversation log, in file order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConversation {
    pub summaries: Vec<Summary>,
    pub messages: Vec<Message>,
    pub file_path: PathBuf,
    pub line_count: usize,
    pub parse_errors: Vec<ParseError>,
}

impl ParsedConversation {
    pub fn has_errors(&self) -> bool {
        !self.parse_errors.is_empty()
    }

    /// First message carrying `uuid`, in file order
    pub fn find_message(&self, uuid: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.uuid() == uuid)
    }

    pub fn user_messages(&self) -> impl Iterator<Item = &UserMessage> {
        self.messages.iter().filter_map(|m| match m {
            Message::User(user) => Some(user),
            Message::Assistant(_) => None,
        })
    }

    pub fn assistant_messages(&self) -> impl Iterator<Item = &AssistantMessage> {
        self.messages.iter().filter_map(|m| match m {
            Message::Assistant(assistant) => Some(assistant),
            Message::User(_) => None,
        })
    }
}

/// A message with the replies attached under it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationNode {
    pub message: Message,
    pub children: Vec<ConversationNode>,
}

impl ConversationNode {
    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Length of the longest root-to-leaf path, counting nodes
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

// Tear down iteratively; deep transcripts would otherwise recurse once per level
impl Drop for ConversationNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Aggregate numbers for one conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStats {
    pub message_count: usize,
    pub user_message_count: usize,
    pub assistant_message_count: usize,
    #[serde(rename = "totalCostUSD")]
    pub total_cost_usd: f64,
    pub total_tokens: TokenUsage,
    pub average_response_time_ms: f64,
    pub conversation_duration_ms: i64,
    pub tool_usage_count: usize,
    pub models: BTreeMap<String, usize>,
    pub branches: usize,
}
