//! kilo-edit-input: keyboard input decoding for the kilo-edit editor.
//!
//! The terminal delivers keystrokes as raw bytes: plain ASCII, control
//! combinations folded into the 0x00–0x1F range, and multi-byte CSI escape
//! sequences for arrows, paging, and editing keys. [`KeyReader`] turns that
//! stream into logical [`Key`] values.
//!
//! The reader is generic over any [`Read`] source so the decoder can be
//! tested against in-memory byte scripts. Against a real terminal the source
//! is stdin in raw mode with `VMIN=0, VTIME=1`: reads return after at most
//! 100 ms with zero bytes, which the reader uses both to block politely for
//! the first byte and to give up on truncated escape sequences.

use std::io::{self, Read};

/// A decoded keystroke.
///
/// `Ctrl` carries the raw control byte (0x00–0x1F); use [`ctrl`] to name a
/// combination, e.g. `Key::Ctrl(ctrl(b'q'))`. Enter, Backspace, and Escape
/// are split out because the dispatcher and the prompt treat them specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(u8),
    Ctrl(u8),
    Enter,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Escape,
}

/// The control byte produced by holding Ctrl with `c`.
pub const fn ctrl(c: u8) -> u8 {
    c & 0x1f
}

/// Decodes keystrokes from a byte stream.
pub struct KeyReader<R: Read> {
    source: R,
}

impl<R: Read> KeyReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Blocks until one keystroke is available and decodes it.
    ///
    /// Read errors other than `Interrupted`/`WouldBlock` propagate to the
    /// caller; those two are retried, matching the raw-mode read contract.
    pub fn read_key(&mut self) -> io::Result<Key> {
        let c = self.next_byte()?;

        let key = match c {
            b'\r' => Key::Enter,
            0x7f => Key::Backspace,
            0x1b => self.read_escape_sequence()?,
            b'\t' => Key::Char(b'\t'),
            c if c < 0x20 => Key::Ctrl(c),
            c => Key::Char(c),
        };
        Ok(key)
    }

    /// Classifies the bytes following a literal escape. Any sequence that
    /// is truncated or unrecognized decodes as a bare Escape.
    fn read_escape_sequence(&mut self) -> io::Result<Key> {
        let Some(first) = self.try_next_byte()? else {
            return Ok(Key::Escape);
        };
        let Some(second) = self.try_next_byte()? else {
            return Ok(Key::Escape);
        };

        let key = match (first, second) {
            (b'[', b'0'..=b'9') => {
                let Some(b'~') = self.try_next_byte()? else {
                    return Ok(Key::Escape);
                };
                match second {
                    b'1' | b'7' => Key::Home,
                    b'4' | b'8' => Key::End,
                    b'3' => Key::Delete,
                    b'5' => Key::PageUp,
                    b'6' => Key::PageDown,
                    _ => Key::Escape,
                }
            }
            (b'[', b'A') => Key::ArrowUp,
            (b'[', b'B') => Key::ArrowDown,
            (b'[', b'C') => Key::ArrowRight,
            (b'[', b'D') => Key::ArrowLeft,
            (b'[', b'H') | (b'O', b'H') => Key::Home,
            (b'[', b'F') | (b'O', b'F') => Key::End,
            _ => Key::Escape,
        };
        Ok(key)
    }

    /// Reads one byte, retrying zero-length reads (the 100 ms raw-mode
    /// timeout) and interrupted reads until a byte arrives.
    fn next_byte(&mut self) -> io::Result<u8> {
        let mut buf = [0u8; 1];
        loop {
            match self.source.read(&mut buf) {
                Ok(0) => continue,
                Ok(_) => return Ok(buf[0]),
                Err(e)
                    if e.kind() == io::ErrorKind::Interrupted
                        || e.kind() == io::ErrorKind::WouldBlock =>
                {
                    continue
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Reads one byte with a single attempt. A zero-length read means the
    /// escape sequence ended early.
    fn try_next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.source.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e)
                if e.kind() == io::ErrorKind::Interrupted
                    || e.kind() == io::ErrorKind::WouldBlock =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
