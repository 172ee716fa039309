//! AI Conversation Analyzer - Parse and analyze Claude Code conversation logs
//!
//! A conversation log is an append-only JSONL file: one summary, user, or assistant record
//! per line, with `uuid`/`parentUuid` links forming a (possibly branching) conversation
//! graph. This library provides:
//!
//! - A streaming, line-isolating decoder for the log format
//! - An assembler that sorts records into summaries and messages and records bad lines
//! - Structural validation (duplicate uuids, orphaned parents)
//! - Conversation forest construction and active-branch resolution
//! - Cost, token, timing and branching statistics
//!
//! # Example
//!
//! ```no_run
//! use ai_conversation_analyzer::{calculate_stats, get_active_branch, load_conversation};
//! use std::path::Path;
//!
//! let conversation = load_conversation(Path::new("session.jsonl"))?;
//! let stats = calculate_stats(&conversation);
//! println!("{} messages, ${:.4}", stats.message_count, stats.total_cost_usd);
//! println!("{} messages on the active branch", get_active_branch(&conversation).len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use analysis::{
    branch_to_leaf, build_conversation_tree, calculate_stats, get_active_branch, leaf_messages,
    validate_conversation,
};
pub use models::{ConversationNode, ConversationStats, Entry, Message, ParseError, ParsedConversation};
pub use parsers::{decode_entries, load_conversation, parse_conversation, parse_conversation_file};
