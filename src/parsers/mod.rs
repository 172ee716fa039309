//! JSONL decoding and assembly for Claude Code conversation logs
//!
//! # Error Handling Strategy
//!
//! Failures are captured as data wherever possible:
//!
//! - **Decode failures**: [`decoder::EntryDecoder`] stops at the first line that cannot be
//!   read or is not valid JSON and yields a typed [`decoder::DecodeError`] naming the line.
//!   Callers iterating the decoder directly see that error.
//!
//! - **Assembly**: [`conversation::parse_conversation`] turns that decode failure into one
//!   [`ParseError`](crate::models::ParseError) and returns what it read so far. Unrecognized
//!   records are recorded the same way and assembly continues past them.
//!
//! - **File access**: only opening the log can fail with an `anyhow::Error`; once the file
//!   is open the caller always receives a complete `ParsedConversation`.

pub mod conversation;
pub mod decoder;
pub mod deserializers;

pub use conversation::{load_conversation, parse_conversation, parse_conversation_file};
pub use decoder::{DecodeError, EntryDecoder, classify_entry, decode_entries, open_entries};
