//! kilo-edit: a minimalist modal-less terminal text editor.
//!
//! The workspace splits the editor into focused crates; this root crate
//! re-exports the pieces integration tests and embedders need.
//!
//! - `kilo-edit-buffer`: rows, tab expansion, the highlight cascade
//! - `kilo-edit-input`: byte-stream key decoding
//! - `kilo-edit-syntax`: the highlight state machine and rule sets
//! - `kilo-edit-terminal`: raw mode, window size, escapes, frames
//! - `kilo-edit-editor`: the engine (state, dispatch, prompt, search,
//!   rendering)

pub use kilo_edit_editor::{Editor, Error, KeyOutcome, Result};
pub use kilo_edit_input::{ctrl, Key, KeyReader};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
