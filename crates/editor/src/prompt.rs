//! Modal single-line input over the message bar.

use std::io::{Read, Write};

use kilo_edit_input::{ctrl, Key, KeyReader};

use crate::editor::Editor;
use crate::error::{Error, Result};

const CTRL_H: u8 = ctrl(b'h');

/// Observer of prompt keystrokes.
///
/// The incremental search owns its session state in an implementation of
/// this trait; the prompt calls it after every keystroke with the current
/// buffer, including the final Enter or Escape.
pub trait PromptWatcher {
    fn on_key(&mut self, editor: &mut Editor, query: &[u8], key: Key);
}

/// Runs a read-line loop over the status area.
///
/// `template` must contain a `{}` placeholder that is replaced with the
/// buffer on every frame. Returns `None` when the user cancels with Escape,
/// `Some(buffer)` on Enter with a non-empty buffer. The outer editor loop is
/// paused for the duration; every frame is rendered from here.
pub fn prompt<R: Read, W: Write>(
    editor: &mut Editor,
    input: &mut KeyReader<R>,
    out: &mut W,
    template: &str,
    mut watcher: Option<&mut dyn PromptWatcher>,
) -> Result<Option<String>> {
    let mut buf = String::new();

    loop {
        editor.set_status(template.replacen("{}", &buf, 1));
        editor.refresh_screen(out)?;

        let key = input.read_key().map_err(Error::Read)?;
        match key {
            Key::Backspace | Key::Delete | Key::Ctrl(CTRL_H) => {
                buf.pop();
            }
            Key::Escape => {
                editor.set_status("");
                if let Some(watcher) = watcher.as_deref_mut() {
                    watcher.on_key(editor, buf.as_bytes(), key);
                }
                return Ok(None);
            }
            Key::Enter => {
                if !buf.is_empty() {
                    editor.set_status("");
                    if let Some(watcher) = watcher.as_deref_mut() {
                        watcher.on_key(editor, buf.as_bytes(), key);
                    }
                    return Ok(Some(buf));
                }
            }
            Key::Char(c) if c < 128 && !c.is_ascii_control() => {
                buf.push(c as char);
            }
            _ => {}
        }

        if let Some(watcher) = watcher.as_deref_mut() {
            watcher.on_key(editor, buf.as_bytes(), key);
        }
    }
}
