//! kilo-edit-syntax: syntax highlighting for the kilo-edit editor.
//!
//! This crate owns everything about turning a row's render bytes into
//! highlight attributes:
//!
//! - [`scan_line`]: the per-line highlight state machine (comments, strings,
//!   numbers, keywords), which threads a multi-line-comment flag between
//!   consecutive lines
//! - [`Syntax`] and [`detect`]: the static language rule sets and
//!   filename-based selection
//! - [`ansi_color`]: the highlight-attribute to ANSI color mapping used by
//!   the renderer
//!
//! The scanner is a pure function over `(&[u8], &Syntax, bool)`; the caller
//! (the row store) is responsible for feeding each line the open-comment
//! state of its predecessor and for cascading rescans when that state
//! changes at a line boundary.

mod highlight;
mod registry;
mod theme;

pub use highlight::{is_separator, scan_line, Highlight, LineScan};
pub use registry::{detect, Syntax, SYNTAXES};
pub use theme::ansi_color;
