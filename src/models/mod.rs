// Data Models
pub mod file_entry;
pub mod operation;
pub mod pane_state;

pub use file_entry::{EntryKind, FileEntry};
pub use pane_state::PaneState;
