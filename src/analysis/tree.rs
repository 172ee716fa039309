//! Forest construction from the flat parent-pointer message list.
//!
//! Children keep file order. A message whose parent uuid matches nothing is left out of the
//! forest; the validator reports it as an orphan. Materialization walks with an explicit
//! stack, so long linear transcripts cannot overflow the call stack, and a child whose uuid
//! is already on the current ancestor path is skipped so a parent cycle (possible only
//! through duplicated uuids) terminates.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::models::{ConversationNode, Message};

/// Build the conversation forest. Roots are messages with no parent uuid, in file order.
pub fn build_conversation_tree(messages: &[Message]) -> Vec<ConversationNode> {
    let mut roots: Vec<usize> = Vec::new();
    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();

    for (index, message) in messages.iter().enumerate() {
        match message.parent_uuid() {
            None => roots.push(index),
            Some(parent) => children.entry(parent).or_default().push(index),
        }
    }

    roots.iter().filter_map(|&root| materialize(messages, &children, root)).collect()
}

struct Frame<'a> {
    message: &'a Message,
    pending: std::slice::Iter<'a, usize>,
    children: Vec<ConversationNode>,
}

impl<'a> Frame<'a> {
    fn new(message: &'a Message, children: &'a HashMap<&str, Vec<usize>>) -> Self {
        let pending = children.get(message.uuid()).map(|c| c.iter()).unwrap_or_default();
        Self { message, pending, children: Vec::new() }
    }
}

fn materialize(
    messages: &[Message],
    children: &HashMap<&str, Vec<usize>>,
    root: usize,
) -> Option<ConversationNode> {
    let root_message = &messages[root];
    let mut ancestors: HashSet<&str> = HashSet::from([root_message.uuid()]);
    let mut stack = vec![Frame::new(root_message, children)];
    let mut finished = None;

    while let Some(frame) = stack.last_mut() {
        if let Some(&child) = frame.pending.next() {
            let child_message = &messages[child];
            if ancestors.insert(child_message.uuid()) {
                stack.push(Frame::new(child_message, children));
            } else {
                warn!(
                    uuid = child_message.uuid(),
                    "Skipping message that would close a parent cycle"
                );
            }
            continue;
        }

        if let Some(done) = stack.pop() {
            ancestors.remove(done.message.uuid());
            let node = ConversationNode { message: done.message.clone(), children: done.children };
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => finished = Some(node),
            }
        }
    }

    finished
}
