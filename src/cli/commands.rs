use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::analysis::{branch_to_leaf, build_conversation_tree, calculate_stats, get_active_branch};
use crate::models::{ConversationNode, ConversationStats, Message};
use crate::parsers::{load_conversation, parse_conversation_file};
use crate::utils::preview_text;

const PREVIEW_CHARS: usize = 80;
const SHORT_UUID_CHARS: usize = 8;

#[derive(Parser)]
#[command(name = "ai-conversation-analyzer")]
#[command(version = "0.1.0")]
#[command(about = "Inspect Claude Code conversation logs", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show cost, token and timing statistics for a conversation
    Stats {
        /// Conversation JSONL file
        file: PathBuf,
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the conversation as an indented tree
    Tree {
        /// Conversation JSONL file
        file: PathBuf,
        /// Stop descending below this depth
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Print the active branch (or the branch ending at --leaf)
    Branch {
        /// Conversation JSONL file
        file: PathBuf,
        /// Resolve the branch ending at this message instead of the summary's leaf
        #[arg(long)]
        leaf: Option<String>,
        /// Print messages as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report malformed lines, duplicate uuids and orphaned messages
    Validate {
        /// Conversation JSONL file
        file: PathBuf,
        /// Print errors as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Stats { file, json }) => show_stats(&file, json),
        Some(Commands::Tree { file, max_depth }) => show_tree(&file, max_depth),
        Some(Commands::Branch { file, leaf, json }) => show_branch(&file, leaf.as_deref(), json),
        Some(Commands::Validate { file, json }) => show_validation(&file, json),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn show_stats(file: &Path, json: bool) -> Result<()> {
    let conversation = parse_conversation_file(file)?;
    let stats = calculate_stats(&conversation);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats).context("Failed to encode stats")?);
        return Ok(());
    }

    print_stats(&stats);
    if conversation.has_errors() {
        println!();
        println!("Parse errors: {} (run `validate` for details)", conversation.parse_errors.len());
    }
    Ok(())
}

fn print_stats(stats: &ConversationStats) {
    println!("Conversation Statistics");
    println!("=======================");
    println!("Messages: {}", stats.message_count);
    println!("  User: {}", stats.user_message_count);
    println!("  Assistant: {}", stats.assistant_message_count);
    println!("Total cost: ${:.4}", stats.total_cost_usd);
    println!("Tokens:");
    println!("  Input: {}", stats.total_tokens.input_tokens);
    println!("  Output: {}", stats.total_tokens.output_tokens);
    println!("  Cache creation: {}", stats.total_tokens.cache_creation_input_tokens);
    println!("  Cache read: {}", stats.total_tokens.cache_read_input_tokens);
    println!("Average response time: {:.0} ms", stats.average_response_time_ms);
    println!("Duration: {} ms", stats.conversation_duration_ms);
    println!("Tool uses: {}", stats.tool_usage_count);
    println!("Branch points: {}", stats.branches);
    if !stats.models.is_empty() {
        println!("Models:");
        for (model, count) in &stats.models {
            println!("  {}: {}", preview_text(model, PREVIEW_CHARS), count);
        }
    }
}

fn show_tree(file: &Path, max_depth: Option<usize>) -> Result<()> {
    let conversation = parse_conversation_file(file)?;
    let forest = build_conversation_tree(&conversation.messages);

    let mut stack: Vec<(&ConversationNode, usize)> =
        forest.iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        println!("{}{}", "  ".repeat(depth), describe(&node.message));
        if max_depth.is_some_and(|max| depth + 1 >= max) {
            continue;
        }
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
    Ok(())
}

fn show_branch(file: &Path, leaf: Option<&str>, json: bool) -> Result<()> {
    let conversation = parse_conversation_file(file)?;
    let branch = match leaf {
        Some(leaf) => {
            let branch = branch_to_leaf(&conversation.messages, leaf);
            if branch.is_empty() {
                bail!("No message with uuid {} in {}", leaf, file.display());
            }
            branch
        }
        None => get_active_branch(&conversation),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&branch).context("Failed to encode branch")?);
        return Ok(());
    }

    for message in branch {
        println!("{}", describe(message));
    }
    Ok(())
}

fn show_validation(file: &Path, json: bool) -> Result<()> {
    let conversation = load_conversation(file)?;

    if json {
        let encoded = serde_json::to_string_pretty(&conversation.parse_errors)
            .context("Failed to encode parse errors")?;
        println!("{}", encoded);
    } else {
        for error in &conversation.parse_errors {
            println!("line {}: {}", error.line, preview_text(&error.error, 200));
        }
        println!(
            "{} messages, {} summaries, {} errors",
            conversation.messages.len(),
            conversation.summaries.len(),
            conversation.parse_errors.len()
        );
    }

    if conversation.has_errors() {
        bail!("{} problems found in {}", conversation.parse_errors.len(), file.display());
    }
    Ok(())
}

fn describe(message: &Message) -> String {
    let short_uuid: String = message.uuid().chars().take(SHORT_UUID_CHARS).collect();
    format!(
        "[{}] {} {}",
        message.role(),
        preview_text(&short_uuid, SHORT_UUID_CHARS),
        preview_text(&message.text(), PREVIEW_CHARS)
    )
}
