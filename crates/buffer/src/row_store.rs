//! The ordered collection of rows and every structural mutation on it.

use kilo_edit_syntax::{scan_line, Highlight, Syntax};

use crate::row::Row;

/// Owns the buffer's rows and the dirty counter.
///
/// Every mutation rebuilds the affected row's render view, rescans its
/// highlighting (cascading into following rows when the open-comment state
/// at the boundary changes), renumbers `idx` for shifted rows, and bumps the
/// dirty counter. Out-of-range positions are silent no-ops.
#[derive(Debug, Default)]
pub struct RowStore {
    rows: Vec<Row>,
    dirty: u64,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of mutations since the last save; zero means saved.
    pub fn dirty(&self) -> u64 {
        self.dirty
    }

    /// Resets the dirty counter after a successful save or load.
    pub fn set_saved(&mut self) {
        self.dirty = 0;
    }

    // ==================== Structural mutations ====================

    /// Inserts a row at `at`, shifting the rest down.
    pub fn insert_row(&mut self, at: usize, chars: Vec<u8>, syntax: Option<&Syntax>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(chars, at));
        for row in &mut self.rows[at + 1..] {
            row.idx += 1;
        }
        self.update_row(at, syntax);
        self.dirty += 1;
    }

    /// Deletes the row at `at`, shifting the rest up.
    pub fn delete_row(&mut self, at: usize, syntax: Option<&Syntax>) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        for row in &mut self.rows[at..] {
            row.idx -= 1;
        }
        // The row that moved into `at` may now follow a different
        // open-comment state.
        if at < self.rows.len() {
            self.rescan_from(at, syntax);
        }
        self.dirty += 1;
    }

    /// Inserts one byte into row `y` at column `at` (clamped to the end).
    pub fn insert_char(&mut self, y: usize, at: usize, c: u8, syntax: Option<&Syntax>) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        let at = at.min(row.chars.len());
        row.chars.insert(at, c);
        self.update_row(y, syntax);
        self.dirty += 1;
    }

    /// Deletes the byte at column `at` of row `y`.
    pub fn delete_char(&mut self, y: usize, at: usize, syntax: Option<&Syntax>) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        if at >= row.chars.len() {
            return;
        }
        row.chars.remove(at);
        self.update_row(y, syntax);
        self.dirty += 1;
    }

    /// Appends bytes to the end of row `y`.
    pub fn append_bytes(&mut self, y: usize, bytes: &[u8], syntax: Option<&Syntax>) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        row.chars.extend_from_slice(bytes);
        self.update_row(y, syntax);
        self.dirty += 1;
    }

    /// Splits row `y` at column `x`: the row keeps `chars[..x]` and a new
    /// row at `y + 1` receives the remainder.
    pub fn split_row(&mut self, y: usize, x: usize, syntax: Option<&Syntax>) {
        let Some(row) = self.rows.get(y) else {
            return;
        };
        if x > row.chars.len() {
            return;
        }
        let rest = row.chars[x..].to_vec();
        self.insert_row(y + 1, rest, syntax);
        self.rows[y].chars.truncate(x);
        self.update_row(y, syntax);
    }

    /// Joins row `y` onto the end of row `y - 1` and deletes row `y`.
    pub fn join_row(&mut self, y: usize, syntax: Option<&Syntax>) {
        if y == 0 || y >= self.rows.len() {
            return;
        }
        let tail = std::mem::take(&mut self.rows[y].chars);
        self.rows[y - 1].chars.extend_from_slice(&tail);
        self.update_row(y - 1, syntax);
        self.dirty += 1;
        self.delete_row(y, syntax);
    }

    // ==================== Save contract ====================

    /// Serializes the buffer: rows joined with `\n`, plus a trailing `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for row in &self.rows {
            out.extend_from_slice(&row.chars);
            out.push(b'\n');
        }
        out
    }

    // ==================== Highlighting ====================

    /// Rescans every row, used when the syntax binding changes.
    pub fn rescan_all(&mut self, syntax: Option<&Syntax>) {
        for y in 0..self.rows.len() {
            self.scan_row(y, syntax);
        }
    }

    /// Takes a copy of a row's highlight attributes (for the search overlay).
    pub fn hl_snapshot(&self, y: usize) -> Option<Vec<Highlight>> {
        self.rows.get(y).map(|row| row.hl.clone())
    }

    /// Restores highlight attributes saved by [`hl_snapshot`](Self::hl_snapshot).
    pub fn restore_hl(&mut self, y: usize, hl: Vec<Highlight>) {
        if let Some(row) = self.rows.get_mut(y) {
            debug_assert_eq!(hl.len(), row.render.len());
            row.hl = hl;
        }
    }

    /// Paints the search-match attribute over `len` render bytes of row `y`.
    /// Purely visual: does not touch the dirty counter.
    pub fn paint_match(&mut self, y: usize, at: usize, len: usize) {
        if let Some(row) = self.rows.get_mut(y) {
            let end = (at + len).min(row.hl.len());
            for slot in &mut row.hl[at.min(end)..end] {
                *slot = Highlight::Match;
            }
        }
    }

    /// Rebuilds row `y`'s render view and rescans from it.
    fn update_row(&mut self, y: usize, syntax: Option<&Syntax>) {
        self.rows[y].rebuild_render();
        self.rescan_from(y, syntax);
    }

    /// Rescans row `y`, then each following row while the open-comment state
    /// at the boundary keeps changing. Iterative so a file of comment
    /// delimiters cannot overflow the stack.
    fn rescan_from(&mut self, mut y: usize, syntax: Option<&Syntax>) {
        while y < self.rows.len() {
            let changed = self.scan_row(y, syntax);
            if !changed {
                break;
            }
            y += 1;
        }
    }

    /// Rescans a single row from its predecessor's state. Returns whether
    /// the row's own open-comment state changed.
    fn scan_row(&mut self, y: usize, syntax: Option<&Syntax>) -> bool {
        let starts_in_comment = y > 0 && self.rows[y - 1].hl_open_comment;
        let row = &mut self.rows[y];
        match syntax {
            None => {
                row.hl = vec![Highlight::Normal; row.render.len()];
                false
            }
            Some(syntax) => {
                let scan = scan_line(&row.render, syntax, starts_in_comment);
                row.hl = scan.hl;
                let changed = row.hl_open_comment != scan.open_comment;
                row.hl_open_comment = scan.open_comment;
                changed
            }
        }
    }
}
