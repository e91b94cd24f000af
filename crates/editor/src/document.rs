//! File load/save with the byte-exact row contract.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};

/// Reads a file and splits it into row contents. Trailing `\r` and `\n`
/// bytes are stripped from each line; an empty file yields no rows.
pub fn load_rows(path: &str) -> io::Result<Vec<Vec<u8>>> {
    let content = fs::read(path)?;
    Ok(split_lines(&content))
}

/// Writes the serialized buffer, truncating the file to the exact length
/// written. Returns the number of bytes on disk.
pub fn save_rows(path: &str, bytes: &[u8]) -> io::Result<usize> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)?;
    file.set_len(bytes.len() as u64)?;
    file.write_all(bytes)?;
    Ok(bytes.len())
}

fn split_lines(content: &[u8]) -> Vec<Vec<u8>> {
    if content.is_empty() {
        return Vec::new();
    }

    let mut lines: Vec<Vec<u8>> = content
        .split(|&b| b == b'\n')
        .map(|line| line.to_vec())
        .collect();

    // A trailing newline terminates the last row rather than opening a new
    // empty one.
    if content.ends_with(b"\n") {
        lines.pop();
    }

    for line in &mut lines {
        while matches!(line.last(), Some(&(b'\r' | b'\n'))) {
            line.pop();
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_split_lines_plain() {
        assert_eq!(split_lines(b"a\nb\n"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn test_split_lines_no_trailing_newline() {
        assert_eq!(split_lines(b"a\nb"), vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn test_split_lines_strips_carriage_returns() {
        assert_eq!(
            split_lines(b"a\r\nb\r\r\n"),
            vec![b"a".to_vec(), b"b".to_vec()]
        );
    }

    #[test]
    fn test_split_lines_empty_input_has_no_rows() {
        assert_eq!(split_lines(b""), Vec::<Vec<u8>>::new());
        assert_eq!(split_lines(b"\n"), vec![b"".to_vec()]);
    }

    #[test]
    fn test_save_truncates_to_exact_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        let path = path.to_str().unwrap();

        fs::write(path, b"a much longer pre-existing file body").unwrap();
        let written = save_rows(path, b"hi\n").unwrap();
        assert_eq!(written, 3);

        let mut content = Vec::new();
        fs::File::open(path)
            .unwrap()
            .read_to_end(&mut content)
            .unwrap();
        assert_eq!(content, b"hi\n");
    }

    #[test]
    fn test_load_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.c");
        let path = path.to_str().unwrap();

        save_rows(path, b"one\n\ttwo\n\n").unwrap();
        let rows = load_rows(path).unwrap();
        assert_eq!(rows, vec![b"one".to_vec(), b"\ttwo".to_vec(), b"".to_vec()]);
    }
}
