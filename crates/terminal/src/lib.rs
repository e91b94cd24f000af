//! kilo-edit-terminal: the VT100 boundary for the kilo-edit editor.
//!
//! Everything that touches the host terminal lives here:
//!
//! - [`RawMode`]: an RAII guard that flips stdin into raw mode and restores
//!   the original attributes on drop, on every exit path
//! - [`window_size`]: the `TIOCGWINSZ` query with the cursor-report fallback
//! - [`escape`]: every CSI byte sequence the editor emits, in one place so
//!   tests can assert on frames byte-for-byte
//! - [`Frame`]: an append buffer assembled per refresh and written to the
//!   terminal in a single call
//!
//! The editor core never embeds escape strings or termios calls directly;
//! it goes through this crate.

mod frame;
mod raw_mode;
mod size;

pub mod escape;

pub use frame::Frame;
pub use raw_mode::RawMode;
pub use size::window_size;
