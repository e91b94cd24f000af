//! The consolidated editor state and the key dispatcher.

use std::io::{Read, Write};
use std::time::Instant;

use kilo_edit_buffer::{Row, RowStore};
use kilo_edit_input::{ctrl, Key, KeyReader};
use kilo_edit_syntax::{detect, Syntax};
use kilo_edit_terminal::{escape, Frame};

use crate::document;
use crate::error::{Error, Result};
use crate::prompt::prompt;
use crate::render;
use crate::search;

/// Ctrl-Q presses required to abandon unsaved changes.
const QUIT_TIMES: u32 = 3;
/// Seconds a status message stays visible.
const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;

const CTRL_A: u8 = ctrl(b'a');
const CTRL_B: u8 = ctrl(b'b');
const CTRL_E: u8 = ctrl(b'e');
const CTRL_F: u8 = ctrl(b'f');
const CTRL_H: u8 = ctrl(b'h');
const CTRL_K: u8 = ctrl(b'k');
const CTRL_L: u8 = ctrl(b'l');
const CTRL_N: u8 = ctrl(b'n');
const CTRL_P: u8 = ctrl(b'p');
const CTRL_Q: u8 = ctrl(b'q');
const CTRL_S: u8 = ctrl(b's');
/// 0x1F is what Ctrl-/ (and Ctrl-_) produces on VT-style terminals.
const CTRL_SLASH: u8 = 0x1f;

/// What the main loop should do after a keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// A transient message shown on the bottom bar.
#[derive(Debug, Default)]
struct StatusMessage {
    text: String,
    set_at: Option<Instant>,
}

/// All mutable editor state: the row store, the cursor, the viewport, and
/// the pieces of UI state the renderer consumes.
///
/// The struct is an explicitly owned aggregate passed to the event loop; it
/// holds no OS state, so the dispatcher, renderer, and search can be driven
/// in tests against in-memory byte streams.
pub struct Editor {
    pub(crate) rows: RowStore,
    /// Logical cursor: byte index into the row, row index. `cursor_y` may
    /// equal `rows.len()`, the virtual past-end position.
    pub(crate) cursor_x: usize,
    pub(crate) cursor_y: usize,
    /// Render column of the cursor, recomputed before every frame.
    pub(crate) render_x: usize,
    pub(crate) row_offset: usize,
    pub(crate) col_offset: usize,
    /// Text area size: the window minus the status and message bars.
    pub(crate) screen_rows: usize,
    pub(crate) screen_cols: usize,
    pub(crate) filename: Option<String>,
    pub(crate) syntax: Option<&'static Syntax>,
    status: StatusMessage,
    quit_times: u32,
}

impl Editor {
    /// Creates an empty editor for a window of `rows` by `cols` cells.
    /// Two rows are reserved for the status and message bars.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: RowStore::new(),
            cursor_x: 0,
            cursor_y: 0,
            render_x: 0,
            row_offset: 0,
            col_offset: 0,
            screen_rows: rows.saturating_sub(2),
            screen_cols: cols,
            filename: None,
            syntax: None,
            status: StatusMessage::default(),
            quit_times: QUIT_TIMES,
        }
    }

    // ==================== Accessors ====================

    pub fn rows(&self) -> &RowStore {
        &self.rows
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn offsets(&self) -> (usize, usize) {
        (self.row_offset, self.col_offset)
    }

    pub fn dirty(&self) -> u64 {
        self.rows.dirty()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    /// The status message if one is set and younger than the fade timeout.
    pub fn status_message(&self) -> Option<&str> {
        let set_at = self.status.set_at?;
        if self.status.text.is_empty()
            || set_at.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS
        {
            return None;
        }
        Some(&self.status.text)
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status.text = text.into();
        self.status.set_at = Some(Instant::now());
    }

    // ==================== File I/O ====================

    /// Loads a file into the buffer. The filename sticks (and selects the
    /// syntax binding) even if reading fails.
    pub fn open(&mut self, filename: &str) -> Result<()> {
        self.filename = Some(filename.to_string());
        self.select_syntax();

        let lines = document::load_rows(filename).map_err(Error::FileOpen)?;
        for line in lines {
            let at = self.rows.len();
            self.rows.insert_row(at, line, self.syntax);
        }
        // Loading is not an edit, even though it goes through row inserts.
        self.rows.set_saved();
        Ok(())
    }

    /// Saves the buffer, prompting for a filename first if there is none.
    /// Write failures are non-fatal: they surface on the status bar and the
    /// buffer stays dirty.
    fn save<R: Read, W: Write>(
        &mut self,
        input: &mut KeyReader<R>,
        out: &mut W,
    ) -> Result<()> {
        if self.filename.is_none() {
            let Some(name) = prompt(self, input, out, "Save as: {}", None)? else {
                self.set_status("Save aborted");
                return Ok(());
            };
            self.filename = Some(name);
            self.select_syntax();
        }
        let Some(filename) = self.filename.clone() else {
            return Ok(());
        };

        let bytes = self.rows.to_bytes();
        match document::save_rows(&filename, &bytes) {
            Ok(len) => {
                self.rows.set_saved();
                self.set_status(format!("{len} bytes written to disk"));
            }
            Err(e) => {
                self.set_status(format!("Can't save! {}", Error::FileWrite(e)));
            }
        }
        Ok(())
    }

    /// Rebinds the syntax rule set from the current filename and rescans
    /// every row under the new binding.
    fn select_syntax(&mut self) {
        self.syntax = self.filename.as_deref().and_then(detect);
        self.rows.rescan_all(self.syntax);
    }

    // ==================== Rendering ====================

    /// Recomputes the derived cursor column and drags the viewport so the
    /// cursor stays on screen.
    pub(crate) fn scroll(&mut self) {
        self.render_x = match self.rows.get(self.cursor_y) {
            Some(row) => row.cx_to_rx(self.cursor_x),
            None => self.cursor_x,
        };

        if self.cursor_y < self.row_offset {
            self.row_offset = self.cursor_y;
        }
        if self.cursor_y >= self.row_offset + self.screen_rows {
            self.row_offset = self.cursor_y - self.screen_rows + 1;
        }
        if self.render_x < self.col_offset {
            self.col_offset = self.render_x;
        }
        if self.render_x >= self.col_offset + self.screen_cols {
            self.col_offset = self.render_x - self.screen_cols + 1;
        }
    }

    /// Assembles one complete frame and writes it atomically.
    pub fn refresh_screen<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.scroll();
        let frame = render::render_frame(self);
        frame.flush_to(out).map_err(Error::Terminal)
    }

    // ==================== Dispatch ====================

    /// Resolves one keystroke into an editor action.
    ///
    /// `input` and `out` are threaded through so the prompt sub-mode (save-as
    /// and incremental search) can keep reading keys and drawing frames.
    pub fn process_key<R: Read, W: Write>(
        &mut self,
        key: Key,
        input: &mut KeyReader<R>,
        out: &mut W,
    ) -> Result<KeyOutcome> {
        match key {
            Key::Enter => self.insert_newline(),

            Key::Ctrl(CTRL_Q) => {
                if self.rows.dirty() > 0 && self.quit_times > 1 {
                    self.quit_times -= 1;
                    self.set_status(format!(
                        "WARNING!!! File has unsaved changes. \
                         Press Ctrl-Q {} more times to quit.",
                        self.quit_times
                    ));
                    return Ok(KeyOutcome::Continue);
                }
                let mut frame = Frame::new();
                frame.push_str(escape::CLEAR_SCREEN);
                frame.push_str(escape::CURSOR_HOME);
                frame.flush_to(out).map_err(Error::Terminal)?;
                return Ok(KeyOutcome::Quit);
            }

            Key::Ctrl(CTRL_S) => self.save(input, out)?,
            Key::Ctrl(CTRL_SLASH) => search::find(self, input, out)?,

            Key::Backspace | Key::Ctrl(CTRL_H) => self.delete_char(),
            Key::Delete => {
                self.move_cursor(Key::ArrowRight);
                self.delete_char();
            }

            Key::Home | Key::Ctrl(CTRL_A) => self.cursor_x = 0,
            Key::End | Key::Ctrl(CTRL_E) => {
                if let Some(row) = self.rows.get(self.cursor_y) {
                    self.cursor_x = row.len();
                }
            }

            Key::ArrowUp | Key::Ctrl(CTRL_P) => self.move_cursor(Key::ArrowUp),
            Key::ArrowDown | Key::Ctrl(CTRL_N) => self.move_cursor(Key::ArrowDown),
            Key::ArrowLeft | Key::Ctrl(CTRL_B) => self.move_cursor(Key::ArrowLeft),
            Key::ArrowRight | Key::Ctrl(CTRL_F) => self.move_cursor(Key::ArrowRight),

            Key::PageUp | Key::PageDown => self.page_cursor(key),

            // Reserved no-ops.
            Key::Ctrl(CTRL_K) | Key::Ctrl(CTRL_L) | Key::Escape => {}

            Key::Char(c) if c < 128 => self.insert_char(c),

            _ => {}
        }

        self.quit_times = QUIT_TIMES;
        Ok(KeyOutcome::Continue)
    }

    // ==================== Cursor movement ====================

    pub(crate) fn move_cursor(&mut self, key: Key) {
        match key {
            Key::ArrowLeft => {
                if self.cursor_x != 0 {
                    self.cursor_x -= 1;
                } else if self.cursor_y > 0 {
                    // Wrap to the end of the previous row.
                    self.cursor_y -= 1;
                    self.cursor_x = self.row_len(self.cursor_y);
                }
            }
            Key::ArrowRight => {
                if let Some(row) = self.rows.get(self.cursor_y) {
                    if self.cursor_x < row.len() {
                        self.cursor_x += 1;
                    } else {
                        // Wrap to the start of the next row (possibly the
                        // virtual past-end position).
                        self.cursor_y += 1;
                        self.cursor_x = 0;
                    }
                }
            }
            Key::ArrowUp => {
                if self.cursor_y != 0 {
                    self.cursor_y -= 1;
                }
            }
            Key::ArrowDown => {
                if self.cursor_y < self.rows.len() {
                    self.cursor_y += 1;
                }
            }
            _ => {}
        }

        let len = self.row_len(self.cursor_y);
        if self.cursor_x > len {
            self.cursor_x = len;
        }
    }

    /// PageUp/PageDown: jump to the viewport edge, then move a whole screen
    /// of rows in the paging direction.
    fn page_cursor(&mut self, key: Key) {
        let arrow = if key == Key::PageUp {
            self.cursor_y = self.row_offset;
            Key::ArrowUp
        } else {
            self.cursor_y =
                (self.row_offset + self.screen_rows.saturating_sub(1)).min(self.rows.len());
            Key::ArrowDown
        };
        for _ in 0..self.screen_rows {
            self.move_cursor(arrow);
        }
    }

    fn row_len(&self, y: usize) -> usize {
        self.rows.get(y).map(Row::len).unwrap_or(0)
    }

    // ==================== Edits ====================

    fn insert_char(&mut self, c: u8) {
        if self.cursor_y == self.rows.len() {
            // Typing at the past-end position opens the row and inserts in
            // one operation.
            self.rows.insert_row(self.rows.len(), vec![c], self.syntax);
        } else {
            self.rows
                .insert_char(self.cursor_y, self.cursor_x, c, self.syntax);
        }
        self.cursor_x += 1;
    }

    fn insert_newline(&mut self) {
        if self.cursor_x == 0 {
            self.rows.insert_row(self.cursor_y, Vec::new(), self.syntax);
        } else {
            self.rows
                .split_row(self.cursor_y, self.cursor_x, self.syntax);
        }
        self.cursor_y += 1;
        self.cursor_x = 0;
    }

    /// Deletes the character left of the cursor, joining rows at column 0.
    fn delete_char(&mut self) {
        if self.cursor_y == self.rows.len() {
            return;
        }
        if self.cursor_x == 0 && self.cursor_y == 0 {
            return;
        }

        if self.cursor_x > 0 {
            self.rows
                .delete_char(self.cursor_y, self.cursor_x - 1, self.syntax);
            self.cursor_x -= 1;
        } else {
            // The cursor lands at the seam of the joined rows.
            self.cursor_x = self.row_len(self.cursor_y - 1);
            self.rows.join_row(self.cursor_y, self.syntax);
            self.cursor_y -= 1;
        }
    }
}
