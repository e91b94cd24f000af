//! End-to-end scenarios: raw terminal bytes in, editor state and frames out.
//!
//! Each test feeds a byte script through the real key decoder and
//! dispatcher, exactly as the main loop does, with frames written to an
//! in-memory buffer.

use std::io::{self, Cursor, Read};

use kilo_edit_editor::{Editor, KeyOutcome};
use kilo_edit_input::{ctrl, KeyReader};

/// Read source that errors out once the script is exhausted, so tests end
/// instead of blocking the way a live terminal would.
struct ScriptEnd;

impl Read for ScriptEnd {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "script exhausted",
        ))
    }
}

/// Runs the main loop over a byte script. Returns the frames written and
/// whether the script ended with a quit.
fn drive(editor: &mut Editor, script: &[u8]) -> (Vec<u8>, Option<KeyOutcome>) {
    let source = Cursor::new(script.to_vec()).chain(ScriptEnd);
    let mut input = KeyReader::new(source);
    let mut out = Vec::new();

    loop {
        let Ok(key) = input.read_key() else {
            return (out, None);
        };
        match editor.process_key(key, &mut input, &mut out) {
            Ok(KeyOutcome::Quit) => return (out, Some(KeyOutcome::Quit)),
            Ok(KeyOutcome::Continue) => {}
            Err(_) => return (out, None),
        }
    }
}

fn row_text(editor: &Editor, y: usize) -> String {
    String::from_utf8_lossy(editor.rows().get(y).unwrap().chars()).into_owned()
}

// ==================== Save / reload ====================

#[test]
fn test_insert_save_as_and_reload_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.txt");
    let path = path.to_str().unwrap();

    let mut editor = Editor::new(24, 80);
    let mut script = b"hi".to_vec();
    script.push(ctrl(b's'));
    script.extend_from_slice(path.as_bytes());
    script.push(b'\r');
    drive(&mut editor, &script);

    assert_eq!(editor.dirty(), 0);
    assert_eq!(editor.filename(), Some(path));
    assert!(editor.status_message().unwrap().contains("bytes written"));

    let mut reloaded = Editor::new(24, 80);
    reloaded.open(path).unwrap();
    assert_eq!(reloaded.rows().len(), 1);
    assert_eq!(row_text(&reloaded, 0), "hi");
    assert_eq!(reloaded.dirty(), 0);
}

#[test]
fn test_cancelled_save_as_keeps_buffer_dirty() {
    let mut editor = Editor::new(24, 80);
    let mut script = b"hi".to_vec();
    script.push(ctrl(b's'));
    script.extend_from_slice(b"somename\x1b");
    drive(&mut editor, &script);

    assert!(editor.dirty() > 0);
    assert_eq!(editor.filename(), None);
    assert_eq!(editor.status_message().unwrap(), "Save aborted");
}

#[test]
fn test_saving_a_named_file_does_not_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("named.txt");
    std::fs::write(&path, b"old\n").unwrap();
    let path = path.to_str().unwrap();

    let mut editor = Editor::new(24, 80);
    editor.open(path).unwrap();

    let mut script = b"x".to_vec();
    script.push(ctrl(b's'));
    drive(&mut editor, &script);

    assert_eq!(editor.dirty(), 0);
    assert_eq!(std::fs::read(path).unwrap(), b"xold\n");
}

#[test]
fn test_save_as_a_c_file_binds_syntax() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.c");
    let path = path.to_str().unwrap();

    let mut editor = Editor::new(24, 80);
    let mut script = b"int x;".to_vec();
    script.push(ctrl(b's'));
    script.extend_from_slice(path.as_bytes());
    script.push(b'\r');
    drive(&mut editor, &script);

    assert_eq!(editor.syntax().map(|s| s.filetype), Some("c"));
    // The rescan after binding paints the keyword.
    let row = editor.rows().get(0).unwrap();
    assert_ne!(row.hl()[0], kilo_edit_syntax::Highlight::Normal);
}

// ==================== Incremental search ====================

#[test]
fn test_search_wraps_around_and_parks_viewport() {
    let mut editor = Editor::new(24, 80);
    // Three rows, cursor left at the virtual past-end row afterwards, so
    // walk back up to row 2 column 0.
    drive(&mut editor, b"alpha\rbeta\rgamma");
    drive(&mut editor, b"\x1b[D\x1b[D\x1b[D\x1b[D\x1b[D");
    assert_eq!(editor.cursor(), (0, 2));

    let mut script = vec![0x1f]; // Ctrl-/
    script.extend_from_slice(b"alpha\r");
    drive(&mut editor, &script);

    assert_eq!(editor.cursor(), (0, 0));
    assert_eq!(editor.offsets().0, editor.rows().len());
}

#[test]
fn test_escape_cancels_search_and_restores_position() {
    let mut editor = Editor::new(24, 80);
    drive(&mut editor, b"alpha\rbeta");

    let before = editor.cursor();
    let mut script = vec![0x1f];
    script.extend_from_slice(b"alpha\x1b");
    drive(&mut editor, &script);

    assert_eq!(editor.cursor(), before);
    assert_eq!(editor.offsets(), (0, 0));
}

// ==================== Quit gate ====================

#[test]
fn test_quit_gate_needs_three_presses_when_dirty() {
    let mut editor = Editor::new(24, 80);
    let (_, outcome) = drive(&mut editor, b"x");
    assert_eq!(outcome, None);
    assert_eq!(editor.dirty(), 1);

    let quit = ctrl(b'q');
    let (_, outcome) = drive(&mut editor, &[quit]);
    assert_eq!(outcome, None);
    let (_, outcome) = drive(&mut editor, &[quit]);
    assert_eq!(outcome, None);
    let (out, outcome) = drive(&mut editor, &[quit]);
    assert_eq!(outcome, Some(KeyOutcome::Quit));
    assert_eq!(out, b"\x1b[2J\x1b[H");
}

#[test]
fn test_quit_is_immediate_when_clean() {
    let mut editor = Editor::new(24, 80);
    let (_, outcome) = drive(&mut editor, &[ctrl(b'q')]);
    assert_eq!(outcome, Some(KeyOutcome::Quit));
}

// ==================== Arrow-key editing through the decoder ====================

#[test]
fn test_arrow_sequences_edit_where_expected() {
    let mut editor = Editor::new(24, 80);
    // Type "ad", go left, insert "bc" in the middle.
    drive(&mut editor, b"ad\x1b[Dbc");
    assert_eq!(row_text(&editor, 0), "abcd");

    // Home, delete forward twice with ESC[3~.
    drive(&mut editor, b"\x1b[1~\x1b[3~\x1b[3~");
    assert_eq!(row_text(&editor, 0), "cd");
}

#[test]
fn test_page_keys_move_a_screenful() {
    let mut editor = Editor::new(12, 80); // 10 text rows
    let mut script = Vec::new();
    for _ in 0..30 {
        script.push(b'\r');
    }
    drive(&mut editor, &script);
    assert_eq!(editor.cursor().1, 30);

    drive(&mut editor, b"\x1b[5~"); // PageUp from the bottom of the file
    let after_up = editor.cursor().1;
    assert!(after_up < 30);

    drive(&mut editor, b"\x1b[6~"); // PageDown heads back toward the end
    assert!(editor.cursor().1 > after_up);
}
