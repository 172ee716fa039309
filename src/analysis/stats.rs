use std::collections::HashMap;

use crate::models::{ConversationStats, Message, ParsedConversation};

/// Reduce the messages of a conversation to cost, token, timing and branching totals
///
/// Summaries and parse errors do not contribute. An empty message list yields
/// [`ConversationStats::default`].
pub fn calculate_stats(conversation: &ParsedConversation) -> ConversationStats {
    let messages = &conversation.messages;
    if messages.is_empty() {
        return ConversationStats::default();
    }

    let mut stats = ConversationStats { message_count: messages.len(), ..Default::default() };
    let mut total_duration_ms = 0.0;

    for message in messages {
        match message {
            Message::User(user) => {
                stats.user_message_count += 1;
                if user.has_tool_result() {
                    stats.tool_usage_count += 1;
                }
            }
            Message::Assistant(assistant) => {
                stats.assistant_message_count += 1;
                stats.total_cost_usd += assistant.cost_usd.unwrap_or(0.0);
                total_duration_ms += assistant.duration_ms.unwrap_or(0.0);
                if let Some(usage) = assistant.message.usage {
                    stats.total_tokens += usage;
                }
                stats.tool_usage_count += assistant.tool_use_count();
                *stats.models.entry(assistant.message.model.clone()).or_default() += 1;
            }
        }
    }

    if stats.assistant_message_count > 0 {
        stats.average_response_time_ms = total_duration_ms / stats.assistant_message_count as f64;
    }
    stats.conversation_duration_ms = conversation_duration_ms(messages);
    stats.branches = count_branch_points(messages);

    stats
}

/// Span between the earliest and latest timestamp, ignoring file order
fn conversation_duration_ms(messages: &[Message]) -> i64 {
    let mut timestamps = messages.iter().filter_map(Message::timestamp);
    let Some(first) = timestamps.next() else {
        return 0;
    };

    let (min, max) = timestamps.fold((first, first), |(min, max), ts| (min.min(ts), max.max(ts)));
    (max - min).num_milliseconds()
}

/// Number of parent uuids (the null root parent included) shared by more than one message
fn count_branch_points(messages: &[Message]) -> usize {
    let mut children_per_parent: HashMap<Option<&str>, usize> = HashMap::new();
    for message in messages {
        *children_per_parent.entry(message.parent_uuid()).or_default() += 1;
    }
    children_per_parent.values().filter(|&&count| count > 1).count()
}
