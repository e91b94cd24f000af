//! Frame assembly: content rows, status bar, message bar, cursor.

use kilo_edit_syntax::{ansi_color, Highlight};
use kilo_edit_terminal::escape::{
    cursor_to, set_fg, CLEAR_LINE, CURSOR_HOME, DEFAULT_FG, HIDE_CURSOR, RESET_ATTRS,
    REVERSE_VIDEO, SHOW_CURSOR,
};
use kilo_edit_terminal::Frame;

use crate::editor::Editor;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builds one complete refresh. The caller must have run
/// [`Editor::scroll`] first so `render_x` and the offsets are current.
pub(crate) fn render_frame(editor: &Editor) -> Frame {
    let mut frame = Frame::new();
    frame.push_str(HIDE_CURSOR);
    frame.push_str(CURSOR_HOME);

    draw_rows(editor, &mut frame);
    draw_status_bar(editor, &mut frame);
    draw_message_bar(editor, &mut frame);

    frame.push_str(&cursor_to(
        editor.cursor_y - editor.row_offset + 1,
        editor.render_x - editor.col_offset + 1,
    ));
    frame.push_str(SHOW_CURSOR);
    frame
}

fn draw_rows(editor: &Editor, frame: &mut Frame) {
    for y in 0..editor.screen_rows {
        let file_row = y + editor.row_offset;
        if file_row >= editor.rows.len() {
            if editor.rows.is_empty() && y == editor.screen_rows / 3 {
                draw_welcome(editor, frame);
            } else {
                frame.push_bytes(b"~");
            }
        } else {
            draw_content_row(editor, file_row, frame);
        }

        frame.push_str(CLEAR_LINE);
        frame.push_bytes(b"\r\n");
    }
}

fn draw_welcome(editor: &Editor, frame: &mut Frame) {
    let welcome = format!("Kilo editor -- version {VERSION}");
    let len = welcome.len().min(editor.screen_cols);

    let mut padding = (editor.screen_cols - len) / 2;
    if padding > 0 {
        frame.push_bytes(b"~");
        padding -= 1;
    }
    for _ in 0..padding {
        frame.push_bytes(b" ");
    }
    frame.push_bytes(&welcome.as_bytes()[..len]);
}

/// Emits one row of visible cells, switching SGR colors only when the
/// highlight attribute changes. Control bytes render as reverse-video
/// placeholders without disturbing the run's color.
fn draw_content_row(editor: &Editor, file_row: usize, frame: &mut Frame) {
    let Some(row) = editor.rows.get(file_row) else {
        return;
    };
    let render = row.render();
    let hl = row.hl();

    let start = editor.col_offset.min(render.len());
    let end = (editor.col_offset + editor.screen_cols).min(render.len());

    let mut current_color: Option<u8> = None;
    for j in start..end {
        let c = render[j];
        if c.is_ascii_control() {
            let sym = if c <= 26 { b'@' + c } else { b'?' };
            frame.push_str(REVERSE_VIDEO);
            frame.push_byte(sym);
            frame.push_str(RESET_ATTRS);
            if let Some(color) = current_color {
                frame.push_str(&set_fg(color));
            }
        } else if hl[j] == Highlight::Normal {
            if current_color.is_some() {
                frame.push_str(DEFAULT_FG);
                current_color = None;
            }
            frame.push_byte(c);
        } else {
            let color = ansi_color(hl[j]);
            if current_color != Some(color) {
                current_color = Some(color);
                frame.push_str(&set_fg(color));
            }
            frame.push_byte(c);
        }
    }
    frame.push_str(DEFAULT_FG);
}

fn draw_status_bar(editor: &Editor, frame: &mut Frame) {
    frame.push_str(REVERSE_VIDEO);

    let name = editor.filename.as_deref().unwrap_or("[No Name]");
    let modified = if editor.rows.dirty() > 0 {
        "(modified)"
    } else {
        ""
    };
    let left = format!("{name:.20} - {} lines {modified}", editor.rows.len());
    let right = format!(
        "{} | {}/{}",
        editor.syntax.map(|s| s.filetype).unwrap_or("no ft"),
        editor.cursor_y + 1,
        editor.rows.len()
    );

    let mut len = left.len().min(editor.screen_cols);
    frame.push_bytes(&left.as_bytes()[..len]);
    while len < editor.screen_cols {
        if editor.screen_cols - len == right.len() {
            frame.push_str(&right);
            break;
        }
        frame.push_bytes(b" ");
        len += 1;
    }

    frame.push_str(RESET_ATTRS);
    frame.push_bytes(b"\r\n");
}

fn draw_message_bar(editor: &Editor, frame: &mut Frame) {
    frame.push_str(CLEAR_LINE);
    if let Some(msg) = editor.status_message() {
        let len = msg.len().min(editor.screen_cols);
        frame.push_bytes(&msg.as_bytes()[..len]);
    }
}
