//! Highlight-attribute to ANSI color mapping.

use crate::highlight::Highlight;

/// Returns the ANSI SGR foreground color code for a highlight attribute.
///
/// `Normal` maps to 37, though the renderer emits the default-foreground
/// code (39) for it rather than an explicit white.
pub fn ansi_color(hl: Highlight) -> u8 {
    match hl {
        Highlight::Comment | Highlight::MultiLineComment => 36,
        Highlight::Number => 31,
        Highlight::String => 35,
        Highlight::Match => 34,
        Highlight::Keyword1 => 33,
        Highlight::Keyword2 => 32,
        Highlight::Normal => 37,
    }
}
