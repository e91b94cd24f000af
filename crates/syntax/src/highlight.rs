//! The per-line highlight scanner.
//!
//! [`scan_line`] walks a row's render bytes once, left to right, and assigns
//! one [`Highlight`] per byte. The scan carries three pieces of state:
//!
//! - `in_string`: the opening quote byte while inside a string literal, 0
//!   otherwise
//! - `in_comment`: whether the scan is inside an unterminated multi-line
//!   comment
//! - `prev_sep`: whether the previous byte was a separator (keywords and
//!   numbers only start after one)
//!
//! The initial `in_comment` value comes from the previous row's terminal
//! state, and the terminal state is returned so the caller can detect when a
//! line edit changes the comment status of every following line.

use crate::registry::Syntax;

/// Highlight attribute for a single render byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    MultiLineComment,
    String,
    Number,
    Keyword1,
    Keyword2,
    /// Transient search-match overlay; never produced by [`scan_line`].
    Match,
}

/// Result of scanning one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScan {
    /// One attribute per render byte.
    pub hl: Vec<Highlight>,
    /// True if the line ends inside an unterminated multi-line comment.
    pub open_comment: bool,
}

/// Returns true for the bytes that terminate a keyword or number token.
///
/// End-of-line also counts as a boundary; callers checking the byte after a
/// token must treat "no byte" as a separator.
pub fn is_separator(c: u8) -> bool {
    c.is_ascii_whitespace() || c == 0 || b",.()+-/*=~%<>[];".contains(&c)
}

/// Scans one line of render bytes and assigns a highlight to each.
///
/// `starts_in_comment` is the open-comment state at the end of the previous
/// line (false for the first line). The rules are applied in priority order
/// at each position: single-line comment, multi-line comment, string,
/// number, keyword.
pub fn scan_line(render: &[u8], syntax: &Syntax, starts_in_comment: bool) -> LineScan {
    let mut hl = vec![Highlight::Normal; render.len()];

    let mut prev_sep = true;
    let mut in_string: u8 = 0;
    let mut in_comment = starts_in_comment;

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if let Some(scs) = syntax.singleline_comment_start {
            if in_string == 0 && !in_comment && render[i..].starts_with(scs.as_bytes()) {
                for slot in &mut hl[i..] {
                    *slot = Highlight::Comment;
                }
                break;
            }
        }

        if let (Some(mcs), Some(mce)) =
            (syntax.multiline_comment_start, syntax.multiline_comment_end)
        {
            if in_string == 0 {
                if in_comment {
                    hl[i] = Highlight::MultiLineComment;
                    if render[i..].starts_with(mce.as_bytes()) {
                        for slot in &mut hl[i..i + mce.len()] {
                            *slot = Highlight::MultiLineComment;
                        }
                        i += mce.len();
                        in_comment = false;
                        prev_sep = true;
                    } else {
                        i += 1;
                    }
                    continue;
                } else if render[i..].starts_with(mcs.as_bytes()) {
                    for slot in &mut hl[i..i + mcs.len()] {
                        *slot = Highlight::MultiLineComment;
                    }
                    i += mcs.len();
                    in_comment = true;
                    continue;
                }
            }
        }

        if syntax.highlight_strings {
            if in_string != 0 {
                hl[i] = Highlight::String;
                // A backslash escapes the next byte, including the quote.
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == in_string {
                    in_string = 0;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = c;
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.highlight_numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            let mut matched = false;
            for kw in syntax.keywords {
                // Keywords carrying a trailing `|` paint Keyword1, the rest
                // Keyword2.
                let (word, kind) = match kw.strip_suffix('|') {
                    Some(word) => (word.as_bytes(), Highlight::Keyword1),
                    None => (kw.as_bytes(), Highlight::Keyword2),
                };
                if render[i..].starts_with(word) {
                    let end = i + word.len();
                    if end == render.len() || is_separator(render[end]) {
                        for slot in &mut hl[i..end] {
                            *slot = kind;
                        }
                        i = end;
                        matched = true;
                        break;
                    }
                }
            }
            if matched {
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    LineScan {
        hl,
        open_comment: in_comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SYNTAXES;

    fn c_syntax() -> &'static Syntax {
        &SYNTAXES[0]
    }

    fn scan(line: &str, starts_in_comment: bool) -> LineScan {
        scan_line(line.as_bytes(), c_syntax(), starts_in_comment)
    }

    // ==================== Separators ====================

    #[test]
    fn test_separator_classes() {
        assert!(is_separator(b' '));
        assert!(is_separator(b'\t'));
        assert!(is_separator(0));
        assert!(is_separator(b';'));
        assert!(is_separator(b'*'));
        assert!(!is_separator(b'a'));
        assert!(!is_separator(b'_'));
        assert!(!is_separator(b'0'));
    }

    // ==================== Comments ====================

    #[test]
    fn test_singleline_comment_runs_to_end() {
        let scan = scan("x = 1; // trailing", false);
        let start = "x = 1; ".len();
        assert!(scan.hl[start..].iter().all(|&h| h == Highlight::Comment));
        assert!(!scan.open_comment);
    }

    #[test]
    fn test_multiline_comment_left_open() {
        let scan = scan("/* a", false);
        assert!(scan
            .hl
            .iter()
            .all(|&h| h == Highlight::MultiLineComment));
        assert!(scan.open_comment);
    }

    #[test]
    fn test_multiline_comment_closed_same_line() {
        let scan = scan("/* a */ x", false);
        assert_eq!(scan.hl[0], Highlight::MultiLineComment);
        assert_eq!(scan.hl[6], Highlight::MultiLineComment);
        assert_eq!(scan.hl[8], Highlight::Normal);
        assert!(!scan.open_comment);
    }

    #[test]
    fn test_open_comment_continues_from_previous_line() {
        let scan = scan("b", true);
        assert_eq!(scan.hl, vec![Highlight::MultiLineComment]);
        assert!(scan.open_comment);
    }

    #[test]
    fn test_close_delimiter_ends_carried_comment() {
        let scan = scan("*/ c", true);
        assert_eq!(scan.hl[0], Highlight::MultiLineComment);
        assert_eq!(scan.hl[1], Highlight::MultiLineComment);
        assert_eq!(scan.hl[2], Highlight::Normal);
        assert_eq!(scan.hl[3], Highlight::Normal);
        assert!(!scan.open_comment);
    }

    #[test]
    fn test_close_delimiter_without_open_is_plain_bytes() {
        // With no carried comment, `*/` is just a separator pair.
        let scan = scan("*/ c", false);
        assert!(scan.hl.iter().all(|&h| h == Highlight::Normal));
        assert!(!scan.open_comment);
    }

    #[test]
    fn test_singleline_marker_inside_multiline_comment_ignored() {
        let scan = scan("// x", true);
        assert!(scan
            .hl
            .iter()
            .all(|&h| h == Highlight::MultiLineComment));
        assert!(scan.open_comment);
    }

    // ==================== Strings ====================

    #[test]
    fn test_double_quoted_string() {
        let scan = scan("x \"hi\" y", false);
        assert_eq!(scan.hl[0], Highlight::Normal);
        for j in 2..=5 {
            assert_eq!(scan.hl[j], Highlight::String, "byte {j}");
        }
        assert_eq!(scan.hl[7], Highlight::Normal);
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let scan = scan(r#""a\"b""#, false);
        assert!(scan.hl.iter().all(|&h| h == Highlight::String));
    }

    #[test]
    fn test_unterminated_string_runs_to_end_but_does_not_leak() {
        let scan = scan("\"abc", false);
        assert!(scan.hl.iter().all(|&h| h == Highlight::String));
        // String state is per-line; only comments carry across rows.
        assert!(!scan.open_comment);
    }

    #[test]
    fn test_comment_opener_inside_string_is_string() {
        let scan = scan("\"/* no */\"", false);
        assert!(scan.hl.iter().all(|&h| h == Highlight::String));
    }

    // ==================== Numbers ====================

    #[test]
    fn test_number_after_separator() {
        let scan = scan("x = 42;", false);
        assert_eq!(scan.hl[4], Highlight::Number);
        assert_eq!(scan.hl[5], Highlight::Number);
    }

    #[test]
    fn test_decimal_point_continues_number() {
        let scan = scan("3.14", false);
        assert!(scan.hl.iter().all(|&h| h == Highlight::Number));
    }

    #[test]
    fn test_digit_inside_identifier_not_number() {
        let scan = scan("x2", false);
        assert_eq!(scan.hl[0], Highlight::Normal);
        assert_eq!(scan.hl[1], Highlight::Normal);
    }

    // ==================== Keywords ====================

    #[test]
    fn test_type_keyword_paints_keyword1() {
        // `int|` carries the marker, so it takes the Keyword1 attribute.
        let scan = scan("int x;", false);
        assert_eq!(scan.hl[0..3], [Highlight::Keyword1; 3]);
        assert_eq!(scan.hl[4], Highlight::Normal);
    }

    #[test]
    fn test_flow_keyword_paints_keyword2() {
        let scan = scan("return 0;", false);
        assert_eq!(scan.hl[0..6], [Highlight::Keyword2; 6]);
    }

    #[test]
    fn test_keyword_prefix_of_identifier_not_painted() {
        let scan = scan("int x; integer y;", false);
        assert_eq!(scan.hl[0..3], [Highlight::Keyword1; 3]);
        // "integer" starts with "int" but fails the boundary check.
        assert_eq!(scan.hl[7..14], [Highlight::Normal; 7]);
    }

    #[test]
    fn test_keyword_at_end_of_line() {
        let scan = scan("return", false);
        assert_eq!(scan.hl, vec![Highlight::Keyword2; 6]);
    }

    #[test]
    fn test_keyword_requires_preceding_separator() {
        let scan = scan("xif", false);
        assert!(scan.hl.iter().all(|&h| h == Highlight::Normal));
    }
}
