//! Streaming JSONL decoder for conversation logs.
//!
//! [`EntryDecoder`] pulls one line at a time from any [`BufRead`] source and yields one
//! [`Entry`] per non-blank line. Only the current line is held in memory. The first line
//! that cannot be read or is not valid JSON ends the stream with a [`DecodeError`];
//! after that the iterator is exhausted. Dropping the decoder drops the reader, which
//! closes the underlying file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{Entry, Message, Summary, UnrecognizedEntry};
use crate::utils::open_log_file;

const ENTRY_TYPE_SUMMARY: &str = "summary";
const ENTRY_TYPE_USER: &str = "user";
const ENTRY_TYPE_ASSISTANT: &str = "assistant";

/// Failure that ends a decode stream
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Failed to read line {line}: {source}")]
    Io { line: usize, source: io::Error },
    #[error("Invalid JSON on line {line}: {source}")]
    Json { line: usize, source: serde_json::Error },
}

impl DecodeError {
    /// 1-based line number of the failing line, counting blank lines
    pub fn line(&self) -> usize {
        match self {
            DecodeError::Io { line, .. } | DecodeError::Json { line, .. } => *line,
        }
    }

    /// Message of the underlying error without the line prefix
    pub fn detail(&self) -> String {
        match self {
            DecodeError::Io { source, .. } => source.to_string(),
            DecodeError::Json { source, .. } => source.to_string(),
        }
    }
}

/// Lazy iterator over the entries of a JSONL conversation log
pub struct EntryDecoder<R> {
    lines: io::Lines<R>,
    line_number: usize,
    finished: bool,
}

impl<R: BufRead> EntryDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line_number: 0, finished: false }
    }

    /// Number of physical lines consumed so far, blank ones included
    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for EntryDecoder<R> {
    type Item = Result<Entry, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let line = match self.lines.next() {
                None => {
                    self.finished = true;
                    return None;
                }
                Some(line) => line,
            };
            self.line_number += 1;

            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    self.finished = true;
                    return Some(Err(DecodeError::Io { line: self.line_number, source }));
                }
            };

            // `lines()` already strips "\r\n"; a stray "\r" still counts as blank
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return match serde_json::from_str::<Value>(trimmed) {
                Ok(value) => Some(Ok(classify_entry(value))),
                Err(source) => {
                    self.finished = true;
                    Some(Err(DecodeError::Json { line: self.line_number, source }))
                }
            };
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for EntryDecoder<R> {}

/// Decode entries from an already-open reader
pub fn decode_entries<R: BufRead>(reader: R) -> EntryDecoder<R> {
    EntryDecoder::new(reader)
}

/// Open a log file and decode it lazily. Each call opens a fresh handle.
pub fn open_entries(path: &Path) -> Result<EntryDecoder<BufReader<File>>> {
    let file = open_log_file(path)?;
    Ok(EntryDecoder::new(BufReader::new(file)))
}

/// Sort a decoded JSON value into summary, message, or unrecognized
pub fn classify_entry(value: Value) -> Entry {
    let entry_type = value.get("type").and_then(|t| t.as_str()).map(str::to_owned);

    match entry_type.as_deref() {
        Some(ENTRY_TYPE_SUMMARY) => match Summary::deserialize(&value) {
            Ok(summary) => Entry::Summary(summary),
            Err(e) => unrecognized(value, format!("Malformed summary entry: {}", e)),
        },
        Some(ENTRY_TYPE_USER | ENTRY_TYPE_ASSISTANT) => {
            if value.get("uuid").is_none() {
                return unrecognized(value, "Message entry is missing uuid".to_string());
            }
            match Message::deserialize(&value) {
                Ok(message) => Entry::Message(message),
                Err(e) => unrecognized(value, format!("Malformed message entry: {}", e)),
            }
        }
        Some(other) => {
            let reason = format!("Unknown entry type: {}", other);
            unrecognized(value, reason)
        }
        None => unrecognized(value, "Entry has no type field".to_string()),
    }
}

fn unrecognized(raw: Value, reason: String) -> Entry {
    Entry::Unrecognized(UnrecognizedEntry { raw, reason })
}
