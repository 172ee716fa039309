use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::{Message, ParsedConversation};

/// Root-to-leaf path ending at the first summary's leaf
///
/// Returns an empty list when there are no summaries or no messages. When the leaf uuid
/// names no message, every message is returned in file order instead.
pub fn get_active_branch(conversation: &ParsedConversation) -> Vec<&Message> {
    let Some(summary) = conversation.summaries.first() else {
        return Vec::new();
    };
    if conversation.messages.is_empty() {
        return Vec::new();
    }

    let branch = branch_to_leaf(&conversation.messages, &summary.leaf_uuid);
    if branch.is_empty() {
        debug!(leaf = %summary.leaf_uuid, "Summary leaf not found, returning all messages");
        return conversation.messages.iter().collect();
    }
    branch
}

/// Walk parent pointers from `leaf_uuid` up to a root
///
/// The walk ends at a null parent, at a parent that is not in `messages`, or at a uuid
/// it has already visited. Unknown leaves give an empty list. When uuids repeat, the
/// first occurrence in file order wins.
pub fn branch_to_leaf<'a>(messages: &'a [Message], leaf_uuid: &str) -> Vec<&'a Message> {
    let mut by_uuid: HashMap<&str, &Message> = HashMap::with_capacity(messages.len());
    for message in messages {
        by_uuid.entry(message.uuid()).or_insert(message);
    }

    let mut branch = Vec::new();
    let mut visited = HashSet::new();
    let mut current = by_uuid.get(leaf_uuid).copied();

    while let Some(message) = current {
        if !visited.insert(message.uuid()) {
            break;
        }
        branch.push(message);
        current = message.parent_uuid().and_then(|parent| by_uuid.get(parent).copied());
    }

    branch.reverse();
    branch
}

/// Messages that no other message names as parent, in file order
pub fn leaf_messages(messages: &[Message]) -> Vec<&Message> {
    let parents: HashSet<&str> = messages.iter().filter_map(Message::parent_uuid).collect();
    messages.iter().filter(|m| !parents.contains(m.uuid())).collect()
}
