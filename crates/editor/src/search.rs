//! Incremental search with a non-destructive match overlay.

use std::io::{Read, Write};

use kilo_edit_input::{Key, KeyReader};
use kilo_edit_syntax::Highlight;

use crate::editor::Editor;
use crate::error::Result;
use crate::prompt::{prompt, PromptWatcher};

/// State owned by one search invocation and threaded through the prompt
/// callback: the row of the previous hit, the scan direction, and the saved
/// highlight attributes of the row currently wearing the match overlay.
struct SearchSession {
    last_match: Option<usize>,
    forward: bool,
    saved_hl: Option<(usize, Vec<Highlight>)>,
}

impl SearchSession {
    fn new() -> Self {
        Self {
            last_match: None,
            forward: true,
            saved_hl: None,
        }
    }
}

impl PromptWatcher for SearchSession {
    fn on_key(&mut self, editor: &mut Editor, query: &[u8], key: Key) {
        // The overlay never survives into the next callback; whatever
        // happens below repaints it if there is still a current match.
        if let Some((line, hl)) = self.saved_hl.take() {
            editor.rows.restore_hl(line, hl);
        }

        match key {
            Key::Enter | Key::Escape => {
                self.last_match = None;
                self.forward = true;
                return;
            }
            Key::ArrowRight | Key::ArrowDown => self.forward = true,
            Key::ArrowLeft | Key::ArrowUp => self.forward = false,
            _ => {
                // The query changed; restart the scan.
                self.last_match = None;
                self.forward = true;
            }
        }

        if self.last_match.is_none() {
            self.forward = true;
        }

        let num_rows = editor.rows.len();
        let mut current = self.last_match.map(|m| m as isize).unwrap_or(-1);

        for _ in 0..num_rows {
            current += if self.forward { 1 } else { -1 };
            if current == -1 {
                current = num_rows as isize - 1;
            } else if current == num_rows as isize {
                current = 0;
            }

            let y = current as usize;
            let Some(row) = editor.rows.get(y) else {
                break;
            };
            if let Some(offset) = find_bytes(row.render(), query) {
                self.last_match = Some(y);
                editor.cursor_y = y;
                editor.cursor_x = row.rx_to_cx(offset);
                // Park the offset past the end so the next scroll snaps the
                // match to the top of the screen.
                editor.row_offset = num_rows;

                self.saved_hl = editor.rows.hl_snapshot(y).map(|hl| (y, hl));
                editor.rows.paint_match(y, offset, query.len());
                break;
            }
        }
    }
}

/// Byte-substring search; an empty needle matches at the start.
fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Runs the incremental search prompt. Cancelling restores the cursor and
/// viewport saved before the prompt began; accepting leaves the cursor on
/// the match.
pub(crate) fn find<R: Read, W: Write>(
    editor: &mut Editor,
    input: &mut KeyReader<R>,
    out: &mut W,
) -> Result<()> {
    let saved_cursor = (editor.cursor_x, editor.cursor_y);
    let saved_offsets = (editor.col_offset, editor.row_offset);

    let mut session = SearchSession::new();
    let query = prompt(
        editor,
        input,
        out,
        "Search: {} (Use ESC/Arrows/Enter)",
        Some(&mut session),
    )?;

    if query.is_none() {
        (editor.cursor_x, editor.cursor_y) = saved_cursor;
        (editor.col_offset, editor.row_offset) = saved_offsets;
    }
    Ok(())
}
