//! Framebuffer and style types for terminal rendering.
//!
//! One cell is one terminal column. A double-width glyph occupies its lead
//! cell plus a [`WIDE_CONTINUATION`] cell to its right.

use unicode_width::UnicodeWidthChar;

/// Placeholder for the right half of a double-width glyph. Never printed.
pub const WIDE_CONTINUATION: char = '\0';

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl CellStyle {
    pub const PLAIN: CellStyle = CellStyle {
        fg: Rgb::new(220, 220, 220),
        bg: Rgb::new(0, 0, 0),
        bold: false,
        dim: false,
        reverse: false,
    };

    pub const fn fg(self, fg: Rgb) -> Self {
        Self { fg, ..self }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub const fn reverse(self) -> Self {
        Self {
            reverse: true,
            ..self
        }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::PLAIN
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::PLAIN,
        }
    }
}

/// 2D grid of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize and blank the buffer, keeping the allocation when possible.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = Cell { ch, style };
        }
    }

    /// Write `s` starting at `(x, y)`, clipped to `max_w` columns and the buffer edge.
    ///
    /// Widths come from `unicode-width`; a wide glyph that does not fit whole
    /// is not written. Zero-width characters are dropped. Returns the number
    /// of columns written.
    pub fn put_str_clipped(&mut self, x: u16, y: u16, s: &str, max_w: u16, style: CellStyle) -> u16 {
        let mut n = 0u16;
        for ch in s.chars() {
            // Control characters would move the terminal cursor.
            let ch = if ch.is_control() { ' ' } else { ch };
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            let end = n.saturating_add(w);
            if end > max_w || x.saturating_add(end) > self.width {
                break;
            }
            self.put_char(x + n, y, ch, style);
            if w == 2 {
                self.put_char(x + n + 1, y, WIDE_CONTINUATION, style);
            }
            n += w;
        }
        n
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        self.put_str_clipped(x, y, s, u16::MAX, style)
    }

    pub fn fill_row(&mut self, x: u16, y: u16, w: u16, ch: char, style: CellStyle) {
        for dx in 0..w {
            self.put_char(x.saturating_add(dx), y, ch, style);
        }
    }

    /// Text content of one row, for tests and debugging.
    ///
    /// Continuation cells are skipped, so wide glyphs read naturally.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).map(|c| c.ch))
            .filter(|&ch| ch != WIDE_CONTINUATION)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_char(5, 0, 'x', CellStyle::PLAIN);
        fb.put_char(0, 4, 'x', CellStyle::PLAIN);
        assert_eq!(fb.row_text(0), "   ");
        assert!(fb.get(3, 0).is_none());
    }

    #[test]
    fn strings_are_clipped() {
        let mut fb = FrameBuffer::new(6, 1);
        assert_eq!(fb.put_str_clipped(1, 0, "abcdef", 3, CellStyle::PLAIN), 3);
        assert_eq!(fb.row_text(0), " abc  ");
        assert_eq!(fb.put_str(4, 0, "xyz", CellStyle::PLAIN), 2);
        assert_eq!(fb.row_text(0), " abcxy");
    }

    #[test]
    fn control_characters_are_blanked() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "a\nb\t", CellStyle::PLAIN);
        assert_eq!(fb.row_text(0), "a b ");
    }

    #[test]
    fn wide_glyphs_take_two_columns() {
        let mut fb = FrameBuffer::new(8, 1);
        assert_eq!(fb.put_str(1, 0, "たろう", CellStyle::PLAIN), 6);
        assert_eq!(fb.get(1, 0).map(|c| c.ch), Some('た'));
        assert_eq!(fb.get(2, 0).map(|c| c.ch), Some(WIDE_CONTINUATION));
        assert_eq!(fb.get(7, 0).map(|c| c.ch), Some(' '));
        assert_eq!(fb.row_text(0), " たろう ");
    }

    #[test]
    fn wide_glyph_is_not_split_by_clipping() {
        let mut fb = FrameBuffer::new(6, 1);
        assert_eq!(fb.put_str_clipped(0, 0, "あい", 3, CellStyle::PLAIN), 2);
        assert_eq!(fb.get(2, 0).map(|c| c.ch), Some(' '));
        // Buffer edge clips the same way.
        assert_eq!(fb.put_str(3, 0, "かき", CellStyle::PLAIN), 2);
        assert_eq!(fb.get(5, 0).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn reset_blanks_and_resizes() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_char(0, 0, 'z', CellStyle::PLAIN.bold());
        fb.reset(3, 1);
        assert_eq!((fb.width(), fb.height()), (3, 1));
        assert_eq!(fb.row_text(0), "   ");
    }
}
