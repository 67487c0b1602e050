//! Screen: flushes framebuffers to the real terminal.
//!
//! Frames are diffed against the previous one and only changed runs of cells
//! are written. Encoding goes into a byte buffer first so it can be tested
//! without a terminal.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb, WIDE_CONTINUATION};

pub struct Screen {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor, window title.
    pub fn enter(&mut self, title: &str) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::SetTitle(title))?;
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn leave(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next frame to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then keep it as the diff base.
    ///
    /// The caller gets the previous frame back in `fb` so both buffers are reused.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.last.as_ref(), fb, &mut self.buf)?;
        self.flush_buf()?;

        match self.last.as_mut() {
            Some(prev) => std::mem::swap(prev, fb),
            None => self.last = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode `next` into `out`, as a diff against `prev` when sizes match.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let runs = match prev {
        Some(p) if p.width() == next.width() && p.height() == next.height() => {
            changed_runs(p, next)
        }
        _ => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            (0..next.height()).map(|y| (0, y, next.width())).collect()
        }
    };

    let mut current: Option<CellStyle> = None;
    for (x, y, len) in runs {
        // Start at the lead cell so the whole wide glyph is redrawn.
        let (x, len) = if x > 0 && is_continuation(next, x, y) {
            (x - 1, len + 1)
        } else {
            (x, len)
        };
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            // The terminal already advanced past it when the lead was printed.
            if cell.ch == WIDE_CONTINUATION {
                continue;
            }
            if current != Some(cell.style) {
                apply_style(out, cell.style)?;
                current = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn is_continuation(fb: &FrameBuffer, x: u16, y: u16) -> bool {
    fb.get(x, y).map_or(false, |c| c.ch == WIDE_CONTINUATION)
}

fn apply_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    if style.reverse {
        out.queue(SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Horizontal runs `(x, y, len)` of cells that differ. Sizes must match.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let mut runs = Vec::new();
    for y in 0..next.height() {
        let mut start: Option<u16> = None;
        for x in 0..next.width() {
            let dirty = prev.get(x, y) != next.get(x, y);
            match (dirty, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, y, x - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, y, next.width() - s));
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_frames_produce_no_runs() {
        let a = FrameBuffer::new(4, 2);
        assert!(changed_runs(&a, &a.clone()).is_empty());
    }

    #[test]
    fn adjacent_changes_coalesce_per_row() {
        let a = FrameBuffer::new(6, 2);
        let mut b = a.clone();
        for x in 1..=3 {
            b.put_char(x, 0, 'X', CellStyle::PLAIN);
        }
        b.put_char(5, 1, 'Y', CellStyle::PLAIN);
        assert_eq!(changed_runs(&a, &b), vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn style_only_change_is_dirty() {
        let a = FrameBuffer::new(2, 1);
        let mut b = a.clone();
        b.put_char(0, 0, ' ', CellStyle::PLAIN.reverse());
        assert_eq!(changed_runs(&a, &b), vec![(0, 0, 1)]);
    }

    #[test]
    fn continuation_cells_are_never_printed() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "たx", CellStyle::PLAIN);

        let mut out = Vec::new();
        encode_frame(None, &fb, &mut out).unwrap();
        assert!(!out.contains(&0u8));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("たx"));
    }

    #[test]
    fn run_on_a_continuation_redraws_its_lead() {
        let mut prev = FrameBuffer::new(4, 1);
        prev.put_str(0, 0, "た", CellStyle::PLAIN);
        let mut next = prev.clone();
        next.put_char(1, 0, WIDE_CONTINUATION, CellStyle::PLAIN.reverse());
        assert_eq!(changed_runs(&prev, &next), vec![(1, 0, 1)]);

        let mut out = Vec::new();
        encode_frame(Some(&prev), &next, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // MoveTo(0, 0) is 1-based on the wire.
        assert!(text.contains("\x1b[1;1H"));
        assert!(text.contains('た'));
    }

    #[test]
    fn diff_encoding_is_smaller_than_full() {
        let a = FrameBuffer::new(40, 10);
        let mut b = a.clone();
        b.put_str(0, 0, "hi", CellStyle::PLAIN);

        let mut full = Vec::new();
        encode_frame(None, &b, &mut full).unwrap();
        let mut diff = Vec::new();
        encode_frame(Some(&a), &b, &mut diff).unwrap();
        assert!(!diff.is_empty());
        assert!(diff.len() < full.len());
    }
}
