//! Explicit editor state and the inbound command API.

mod commands;
mod state;

pub use commands::{Editor, EditorSnapshot};
pub use state::EditorState;
