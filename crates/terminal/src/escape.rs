//! The CSI escape sequences the editor emits.
//!
//! Reference: <https://vt100.net/docs/vt100-ug/chapter3.html>

/// Erase the whole display.
pub const CLEAR_SCREEN: &str = "\x1b[2J";
/// Move the cursor to the top-left corner.
pub const CURSOR_HOME: &str = "\x1b[H";
/// Make the cursor invisible while a frame is being drawn.
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
/// Erase from the cursor to the end of the line.
pub const CLEAR_LINE: &str = "\x1b[K";
/// Switch to reverse video (used by the status bar and control-byte cells).
pub const REVERSE_VIDEO: &str = "\x1b[7m";
/// Reset all character attributes.
pub const RESET_ATTRS: &str = "\x1b[m";
/// Reset the foreground to the terminal default.
pub const DEFAULT_FG: &str = "\x1b[39m";
/// Ask the terminal to report the cursor position (`ESC [ r ; c R`).
pub const QUERY_CURSOR_POSITION: &str = "\x1b[6n";
/// Move the cursor as far right and down as it will go; combined with
/// [`QUERY_CURSOR_POSITION`] this measures the window.
pub const CURSOR_TO_BOTTOM_RIGHT: &str = "\x1b[999C\x1b[999B";

/// Set the foreground color to an ANSI SGR code.
pub fn set_fg(color: u8) -> String {
    format!("\x1b[{color}m")
}

/// Move the cursor to a 1-based row/column position.
pub fn cursor_to(row: usize, col: usize) -> String {
    format!("\x1b[{row};{col}H")
}
