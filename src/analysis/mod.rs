//! Pure stages over an assembled [`ParsedConversation`](crate::models::ParsedConversation).
//!
//! Each stage only reads the assembler's output; none depends on another.
//!
//! - [`validate`] - Duplicate and orphan detection, reported as parse errors
//! - [`tree`] - Parent-pointer list to conversation forest
//! - [`branch`] - Leaf-to-root walk for the active transcript
//! - [`stats`] - Cost, token, timing, tool and branching totals

pub mod branch;
pub mod stats;
pub mod tree;
pub mod validate;

pub use branch::{branch_to_leaf, get_active_branch, leaf_messages};
pub use stats::calculate_stats;
pub use tree::build_conversation_tree;
pub use validate::{structural_errors, validate_conversation};
