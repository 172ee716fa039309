//! Data models for Claude Code conversation logs.
//!
//! - [`Entry`] - One decoded log line: summary, message, or unrecognized record
//! - [`Message`] - User or assistant record; `uuid`/`parent_uuid` form the conversation graph
//! - [`ParsedConversation`] - Assembled result of reading a whole log
//! - [`ConversationNode`] - Forest node produced by the tree builder
//! - [`ConversationStats`] - Cost, token, timing and branching totals
//!
//! Records are deserialized with serde; timestamps go through the lenient
//! deserializer in `parsers::deserializers`.

pub mod conversation;
pub mod entry;

pub use conversation::{ConversationNode, ConversationStats, ParseError, ParsedConversation};
pub use entry::{
    AssistantMessage, AssistantPayload, ContentBlock, Entry, Message, RecordMeta, Summary,
    TokenUsage, UnrecognizedEntry, UserContent, UserMessage, UserPayload,
};
