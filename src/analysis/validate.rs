use std::collections::HashSet;

use crate::models::{Message, ParseError, ParsedConversation};

/// Structural checks over `messages`, each producing errors in discovery order
const VALIDATORS: &[fn(&ParsedConversation) -> Vec<ParseError>] =
    &[find_duplicate_uuids, find_orphaned_messages];

/// Run every structural check and collect the errors, duplicates first
pub fn structural_errors(conversation: &ParsedConversation) -> Vec<ParseError> {
    VALIDATORS.iter().flat_map(|validate| validate(conversation)).collect()
}

/// Append structural errors to `parse_errors`. Messages are never removed.
pub fn validate_conversation(conversation: ParsedConversation) -> ParsedConversation {
    let errors = structural_errors(&conversation);
    if errors.is_empty() {
        return conversation;
    }

    let mut parse_errors = conversation.parse_errors;
    parse_errors.extend(errors);
    ParsedConversation { parse_errors, ..conversation }
}

/// Second and later occurrences of a uuid
pub fn find_duplicate_uuids(conversation: &ParsedConversation) -> Vec<ParseError> {
    let mut seen = HashSet::new();
    conversation
        .messages
        .iter()
        .enumerate()
        .filter(|&(_, message)| !seen.insert(message.uuid()))
        .map(|(index, message)| {
            ParseError::new(
                approximate_line(conversation, index),
                format!("Duplicate UUID: {}", message.uuid()),
                serialize_message(message),
            )
        })
        .collect()
}

/// Messages whose parent uuid matches no message in the conversation
///
/// All uuids are collected before checking, so a parent that appears later in the file
/// is not an orphan.
pub fn find_orphaned_messages(conversation: &ParsedConversation) -> Vec<ParseError> {
    let known: HashSet<&str> = conversation.messages.iter().map(Message::uuid).collect();
    conversation
        .messages
        .iter()
        .enumerate()
        .filter_map(|(index, message)| {
            let parent = message.parent_uuid()?;
            if known.contains(parent) {
                return None;
            }
            Some(ParseError::new(
                approximate_line(conversation, index),
                format!("Orphaned message: parent {} not found for {}", parent, message.uuid()),
                serialize_message(message),
            ))
        })
        .collect()
}

/// Message position shifted by the summary count. Not the literal file line.
fn approximate_line(conversation: &ParsedConversation, index: usize) -> usize {
    index + conversation.summaries.len() + 1
}

fn serialize_message(message: &Message) -> String {
    serde_json::to_string(message).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::models::Summary;

    fn message(uuid: &str, parent: Option<&str>) -> Message {
        let json = serde_json::json!({
            "type": "user",
            "uuid": uuid,
            "parentUuid": parent,
            "message": {"role": "user", "content": "text"}
        });
        serde_json::from_value(json).unwrap()
    }

    fn conversation(messages: Vec<Message>, summary_count: usize) -> ParsedConversation {
        let summaries = (0..summary_count)
            .map(|i| Summary { summary: format!("s{}", i), leaf_uuid: "x".to_string() })
            .collect();
        ParsedConversation {
            summaries,
            messages,
            file_path: PathBuf::from("test.jsonl"),
            line_count: 0,
            parse_errors: Vec::new(),
        }
    }

    #[test]
    fn test_clean_conversation_has_no_errors() {
        let conv = conversation(vec![message("a", None), message("b", Some("a"))], 0);
        assert!(structural_errors(&conv).is_empty());
        assert_eq!(validate_conversation(conv.clone()), conv);
    }

    #[test]
    fn test_duplicate_reported_once_for_second_occurrence() {
        let conv = conversation(
            vec![message("a", None), message("b", Some("a")), message("a", Some("b"))],
            1,
        );
        let errors = find_duplicate_uuids(&conv);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error, "Duplicate UUID: a");
        // index 2 + 1 summary + 1
        assert_eq!(errors[0].line, 4);
        assert!(errors[0].content.contains(r#""parentUuid":"b""#));
    }

    #[test]
    fn test_triplicate_reports_two_errors() {
        let conv =
            conversation(vec![message("a", None), message("a", None), message("a", None)], 0);
        let errors = find_duplicate_uuids(&conv);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].line, 2);
        assert_eq!(errors[1].line, 3);
    }

    #[test]
    fn test_forward_reference_is_not_orphan() {
        let conv = conversation(vec![message("b", Some("a")), message("a", None)], 0);
        assert!(find_orphaned_messages(&conv).is_empty());
    }

    #[test]
    fn test_each_orphan_flagged_once() {
        let conv = conversation(
            vec![message("a", None), message("b", Some("ghost")), message("c", Some("ghost"))],
            0,
        );
        let errors = find_orphaned_messages(&conv);

        assert_eq!(errors.len(), 2);
        assert!(errors[0].error.contains("parent ghost not found for b"));
        assert!(errors[1].error.contains("parent ghost not found for c"));
    }

    #[test]
    fn test_validate_appends_after_existing_errors() {
        let mut conv = conversation(vec![message("a", Some("ghost")), message("a", None)], 0);
        conv.parse_errors.push(ParseError::new(7, "Unknown entry type: system", "{}"));

        let validated = validate_conversation(conv);

        assert_eq!(validated.messages.len(), 2);
        let errors: Vec<&str> = validated.parse_errors.iter().map(|e| e.error.as_str()).collect();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0], "Unknown entry type: system");
        assert!(errors[1].starts_with("Duplicate UUID"));
        assert!(errors[2].starts_with("Orphaned message"));
    }
}
