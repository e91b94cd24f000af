//! A single buffer row: logical bytes plus the derived render view.

use kilo_edit_syntax::Highlight;

/// Render positions advance to the next multiple of this on a tab.
pub const TAB_STOP: usize = 4;

/// One logical line of the buffer.
///
/// `chars` holds the line's bytes with no terminator. `render` is derived
/// from `chars` by tab expansion and is what the screen and the search
/// subsystem operate on. `hl` holds one attribute per render byte.
#[derive(Debug, Clone)]
pub struct Row {
    pub(crate) chars: Vec<u8>,
    pub(crate) render: Vec<u8>,
    pub(crate) hl: Vec<Highlight>,
    pub(crate) hl_open_comment: bool,
    pub(crate) idx: usize,
}

impl Row {
    pub(crate) fn new(chars: Vec<u8>, idx: usize) -> Self {
        Self {
            chars,
            render: Vec::new(),
            hl: Vec::new(),
            hl_open_comment: false,
            idx,
        }
    }

    /// The logical bytes of the line.
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// The tab-expanded bytes the screen shows.
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// One highlight attribute per render byte.
    pub fn hl(&self) -> &[Highlight] {
        &self.hl
    }

    /// True if the line ends inside an unterminated multi-line comment.
    pub fn hl_open_comment(&self) -> bool {
        self.hl_open_comment
    }

    /// The row's position in the store.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// Number of logical bytes.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Rebuilds `render` from `chars`, expanding each tab to at least one
    /// space and up to the next multiple of [`TAB_STOP`].
    pub(crate) fn rebuild_render(&mut self) {
        self.render.clear();
        for &c in &self.chars {
            if c == b'\t' {
                self.render.push(b' ');
                while self.render.len() % TAB_STOP != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(c);
            }
        }
    }

    /// Maps a `chars` index to the corresponding `render` index.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &c in self.chars.iter().take(cx) {
            if c == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Maps a `render` index back to a `chars` index: the smallest `cx`
    /// whose expansion reaches `rx`. This is the exact inverse of
    /// [`cx_to_rx`](Self::cx_to_rx) on its image; render columns inside a
    /// tab's padding map to the tab itself, and columns past the end map to
    /// `chars.len()`.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &c) in self.chars.iter().enumerate() {
            if cur_rx >= rx {
                return cx;
            }
            if c == b'\t' {
                cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
            }
            cur_rx += 1;
        }
        self.chars.len()
    }
}
