use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, warn};

use crate::analysis::validate_conversation;
use crate::models::{Entry, ParseError, ParsedConversation};
use crate::parsers::decoder::decode_entries;
use crate::utils::open_log_file;

/// Assemble a conversation from any line-oriented reader
///
/// Every decoded line lands in exactly one place: `summaries`, `messages`, or (for
/// unrecognized records) `parse_errors`. A line that fails to decode ends assembly and is
/// recorded as a single [`ParseError`] carrying its line number; it is never returned as
/// an `Err`.
pub fn parse_conversation<R: BufRead>(
    reader: R,
    file_path: impl Into<PathBuf>,
) -> ParsedConversation {
    let file_path = file_path.into();
    let mut summaries = Vec::new();
    let mut messages = Vec::new();
    let mut parse_errors = Vec::new();
    let mut line_count = 0;

    let mut decoder = decode_entries(reader);
    while let Some(entry) = decoder.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    path = %file_path.display(),
                    line = e.line(),
                    error = %e,
                    "Stopped reading conversation log"
                );
                parse_errors.push(ParseError::new(e.line(), e.detail(), String::new()));
                break;
            }
        };

        line_count += 1;

        match entry {
            Entry::Summary(summary) => summaries.push(summary),
            Entry::Message(message) => messages.push(message),
            Entry::Unrecognized(unrecognized) => {
                let line = decoder.lines_read();
                debug!(
                    path = %file_path.display(),
                    line,
                    reason = %unrecognized.reason,
                    "Recording unrecognized entry"
                );
                let content = serde_json::to_string(&unrecognized.raw).unwrap_or_default();
                parse_errors.push(ParseError::new(line, unrecognized.reason, content));
            }
        }
    }

    debug!(
        path = %file_path.display(),
        messages = messages.len(),
        summaries = summaries.len(),
        errors = parse_errors.len(),
        "Parsed conversation log"
    );

    ParsedConversation { summaries, messages, file_path, line_count, parse_errors }
}

/// Parse a conversation JSONL file
///
/// Only failing to open the file is an `Err`; once open, malformed or unrecognized lines
/// are reported through [`ParsedConversation::parse_errors`].
pub fn parse_conversation_file(path: &Path) -> Result<ParsedConversation> {
    let file = open_log_file(path)?;
    Ok(parse_conversation(BufReader::new(file), path))
}

/// Parse a conversation JSONL file and append structural validation errors
pub fn load_conversation(path: &Path) -> Result<ParsedConversation> {
    parse_conversation_file(path).map(validate_conversation)
}
