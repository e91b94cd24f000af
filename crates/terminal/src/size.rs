//! Window-size discovery.

use std::io::{self, Read, Write};
use std::os::unix::io::RawFd;

use libc::{ioctl, winsize, TIOCGWINSZ};

use crate::escape::{CURSOR_TO_BOTTOM_RIGHT, QUERY_CURSOR_POSITION};

/// Returns the terminal size as `(rows, cols)`.
///
/// Tries `ioctl(TIOCGWINSZ)` first. Some hosts report zero columns there;
/// in that case the cursor is pushed to the bottom-right corner and its
/// reported position is taken as the size.
pub fn window_size<R: Read, W: Write>(
    out_fd: RawFd,
    input: &mut R,
    output: &mut W,
) -> io::Result<(usize, usize)> {
    let mut ws: winsize = unsafe { std::mem::zeroed() };
    let rc = unsafe { ioctl(out_fd, TIOCGWINSZ, &mut ws) };
    if rc == -1 || ws.ws_col == 0 {
        return cursor_position_fallback(input, output);
    }
    Ok((ws.ws_row as usize, ws.ws_col as usize))
}

/// Measures the window by parking the cursor at (999,999) and parsing the
/// `ESC [ rows ; cols R` report.
fn cursor_position_fallback<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<(usize, usize)> {
    output.write_all(CURSOR_TO_BOTTOM_RIGHT.as_bytes())?;
    output.write_all(QUERY_CURSOR_POSITION.as_bytes())?;
    output.flush()?;

    let mut response = Vec::with_capacity(32);
    let mut byte = [0u8; 1];
    while response.len() < 32 {
        if input.read(&mut byte)? != 1 {
            break;
        }
        if byte[0] == b'R' {
            break;
        }
        response.push(byte[0]);
    }

    parse_cursor_report(&response)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "bad cursor position report"))
}

fn parse_cursor_report(response: &[u8]) -> Option<(usize, usize)> {
    let body = response.strip_prefix(b"\x1b[")?;
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cursor_report() {
        assert_eq!(parse_cursor_report(b"\x1b[24;80"), Some((24, 80)));
        assert_eq!(parse_cursor_report(b"\x1b[1;1"), Some((1, 1)));
    }

    #[test]
    fn test_parse_cursor_report_rejects_garbage() {
        assert_eq!(parse_cursor_report(b""), None);
        assert_eq!(parse_cursor_report(b"24;80"), None);
        assert_eq!(parse_cursor_report(b"\x1b[24"), None);
        assert_eq!(parse_cursor_report(b"\x1b[a;b"), None);
    }

    #[test]
    fn test_fallback_reads_report_from_input() {
        let mut input = io::Cursor::new(b"\x1b[40;120R".to_vec());
        let mut output = Vec::new();
        let size = cursor_position_fallback(&mut input, &mut output).unwrap();
        assert_eq!(size, (40, 120));
        assert_eq!(output, b"\x1b[999C\x1b[999B\x1b[6n");
    }
}
