pub mod files;
pub mod terminal;

pub use files::open_log_file;
pub use terminal::{preview_text, strip_ansi_codes};
