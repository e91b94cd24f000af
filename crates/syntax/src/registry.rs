//! Language rule sets and filename-based selection.
//!
//! Each [`Syntax`] describes one language: how to recognize its files, its
//! keyword table, and which scanner features apply. The registry is a static
//! table; [`detect`] picks the first entry whose patterns match a filename.

/// A language's highlighting rule set.
///
/// `filematch` patterns starting with `.` compare against the filename's
/// extension (everything from the last dot); other patterns match anywhere
/// in the filename. Keywords ending in `|` take the `Keyword1` attribute
/// (the marker is stripped before matching); the rest take `Keyword2`.
#[derive(Debug, PartialEq)]
pub struct Syntax {
    pub filetype: &'static str,
    pub filematch: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub singleline_comment_start: Option<&'static str>,
    pub multiline_comment_start: Option<&'static str>,
    pub multiline_comment_end: Option<&'static str>,
    pub highlight_numbers: bool,
    pub highlight_strings: bool,
}

/// The built-in rule sets. One entry: C-like source.
pub static SYNTAXES: &[Syntax] = &[Syntax {
    filetype: "c",
    filematch: &[".c", ".h", ".cpp"],
    keywords: &[
        "switch", "if", "while", "for", "break", "continue", "return", "else",
        "struct", "union", "typedef", "static", "enum", "class", "case",
        "int|", "long|", "double|", "float|", "char|", "unsigned|", "signed|",
        "void|",
    ],
    singleline_comment_start: Some("//"),
    multiline_comment_start: Some("/*"),
    multiline_comment_end: Some("*/"),
    highlight_numbers: true,
    highlight_strings: true,
}];

/// Selects the rule set for a filename, if any pattern matches.
///
/// Extension patterns use the last dot in the name, so `archive.tar.c`
/// matches `.c`. First matching entry wins.
pub fn detect(filename: &str) -> Option<&'static Syntax> {
    let ext = filename.rfind('.').map(|at| &filename[at..]);

    for syntax in SYNTAXES {
        for pattern in syntax.filematch {
            let matched = if pattern.starts_with('.') {
                ext == Some(*pattern)
            } else {
                filename.contains(pattern)
            };
            if matched {
                return Some(syntax);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(detect("main.c").map(|s| s.filetype), Some("c"));
        assert_eq!(detect("kilo.cpp").map(|s| s.filetype), Some("c"));
        assert_eq!(detect("row.h").map(|s| s.filetype), Some("c"));
    }

    #[test]
    fn test_detect_uses_last_dot() {
        assert_eq!(detect("bundle.tar.c").map(|s| s.filetype), Some("c"));
        assert_eq!(detect("main.c.bak"), None);
    }

    #[test]
    fn test_detect_no_match() {
        assert!(detect("notes.txt").is_none());
        assert!(detect("Makefile").is_none());
        assert!(detect("").is_none());
    }
}
