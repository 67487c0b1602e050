//! FormView: maps `core::EntryForm` into a terminal framebuffer.
//!
//! Pure (no I/O), so layout can be unit-tested.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::{EntryForm, FormField};
use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub const TITLE: &str = "Trinity Bullet";
pub const SUBTITLE: &str = "Game Management Application";
pub const BUTTON_LABEL: &str = "[ Player Entry ]";
pub const KEY_HINT: &str = "Tab/↑↓ field  ←→ change  Enter entry  Esc quit";

/// Outer panel size including the border.
pub const PANEL_W: u16 = 52;
pub const PANEL_H: u16 = 12;

const LABEL_COL: u16 = 3;
const VALUE_COL: u16 = 17;
const NAME_BOX_W: u16 = 26;

const ROW_SUBTITLE: u16 = 1;
const ROW_NAME: u16 = 3;
const ROW_TEAM: u16 = 4;
const ROW_DIFFICULTY: u16 = 5;
const ROW_BUTTON: u16 = 7;
const ROW_DIVIDER: u16 = 9;
const ROW_STATUS: u16 = 10;

const BORDER: CellStyle = CellStyle::PLAIN.fg(Rgb::new(160, 160, 170));
const LABEL: CellStyle = CellStyle::PLAIN.fg(Rgb::new(200, 200, 200));
const VALUE: CellStyle = CellStyle::PLAIN.fg(Rgb::new(240, 240, 240));

/// Renders the player-entry form centred in the viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormView;

impl FormView {
    pub fn new() -> Self {
        Self
    }

    /// Top-left corner of the panel for a viewport.
    pub fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let h = PANEL_H + 1;
        (
            viewport.width.saturating_sub(PANEL_W) / 2,
            viewport.height.saturating_sub(h) / 2,
        )
    }

    pub fn render_into(&self, form: &EntryForm, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.reset(viewport.width, viewport.height);
        let (x0, y0) = self.origin(viewport);
        let inner_w = PANEL_W - 2;

        self.draw_frame(fb, x0, y0);
        self.centered(fb, x0, y0, TITLE, BORDER.fg(Rgb::new(255, 255, 255)).bold());
        self.centered(fb, x0, y0 + ROW_SUBTITLE, SUBTITLE, LABEL);

        // Fields.
        let focus = form.focus();
        self.label(fb, x0, y0 + ROW_NAME, "Player Name");
        self.draw_name(fb, x0 + VALUE_COL, y0 + ROW_NAME, form.name(), focus == FormField::Name);

        self.label(fb, x0, y0 + ROW_TEAM, "Team");
        self.draw_choice(
            fb,
            x0 + VALUE_COL,
            y0 + ROW_TEAM,
            form.team_label(),
            VALUE.fg(team_color(form.team_label())),
            focus == FormField::Team,
        );

        self.label(fb, x0, y0 + ROW_DIFFICULTY, "Difficulty");
        self.draw_choice(
            fb,
            x0 + VALUE_COL,
            y0 + ROW_DIFFICULTY,
            form.difficulty_label(),
            VALUE,
            focus == FormField::Difficulty,
        );

        // Entry button.
        let button_w = BUTTON_LABEL.chars().count() as u16;
        let mut button = VALUE.bold();
        if !form.input_enabled() {
            button = CellStyle::PLAIN.fg(Rgb::new(110, 110, 110)).dim();
        } else if focus == FormField::EntryButton {
            button = button.reverse();
        }
        fb.put_str(x0 + PANEL_W - 3 - button_w, y0 + ROW_BUTTON, BUTTON_LABEL, button);

        // Status line.
        let status = if form.input_enabled() {
            VALUE
        } else {
            VALUE.fg(Rgb::new(240, 200, 90))
        };
        fb.put_str_clipped(x0 + 2, y0 + ROW_STATUS, form.status_text(), inner_w - 2, status);

        // Key hint under the panel.
        let hint_y = y0 + PANEL_H;
        if hint_y < viewport.height {
            let hint_w = KEY_HINT.chars().count() as u16;
            let hx = x0 + PANEL_W.saturating_sub(hint_w) / 2;
            fb.put_str(hx, hint_y, KEY_HINT, LABEL.dim());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, form: &EntryForm, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(form, viewport, &mut fb);
        fb
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let right = x + PANEL_W - 1;
        let bottom = y + PANEL_H - 1;

        fb.fill_row(x + 1, y, PANEL_W - 2, '─', BORDER);
        fb.fill_row(x + 1, y + ROW_DIVIDER, PANEL_W - 2, '─', BORDER);
        fb.fill_row(x + 1, bottom, PANEL_W - 2, '─', BORDER);
        for dy in 1..PANEL_H - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(right, y + dy, '│', BORDER);
        }
        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(right, y, '┐', BORDER);
        fb.put_char(x, y + ROW_DIVIDER, '├', BORDER);
        fb.put_char(right, y + ROW_DIVIDER, '┤', BORDER);
        fb.put_char(x, bottom, '└', BORDER);
        fb.put_char(right, bottom, '┘', BORDER);
    }

    fn centered(&self, fb: &mut FrameBuffer, x0: u16, y: u16, text: &str, style: CellStyle) {
        // Pad with spaces so a title sits cleanly on the border line.
        let padded_w = text.width() as u16 + 2;
        let x = x0 + PANEL_W.saturating_sub(padded_w) / 2;
        fb.put_char(x, y, ' ', style);
        fb.put_str(x + 1, y, text, style);
        fb.put_char(x + padded_w - 1, y, ' ', style);
    }

    fn label(&self, fb: &mut FrameBuffer, x0: u16, y: u16, text: &str) {
        fb.put_str(x0 + LABEL_COL, y, text, LABEL);
    }

    fn draw_name(&self, fb: &mut FrameBuffer, x: u16, y: u16, name: &str, focused: bool) {
        let room = (NAME_BOX_W - 2) as usize;
        let style = if focused { VALUE.reverse() } else { VALUE };

        fb.put_char(x, y, '[', LABEL);
        fb.fill_row(x + 1, y, room as u16, '_', style.dim());
        // Show the tail so the caret end stays visible.
        fb.put_str_clipped(x + 1, y, tail_within(name, room), room as u16, style);
        fb.put_char(x + NAME_BOX_W - 1, y, ']', LABEL);
    }

    fn draw_choice(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        label: &str,
        style: CellStyle,
        focused: bool,
    ) {
        let arrows = if focused { LABEL.bold() } else { LABEL.dim() };
        let value = if focused { style.reverse() } else { style };
        fb.put_str(x, y, "< ", arrows);
        // Fixed width keeps the right arrow still while cycling.
        let w = fb.put_str(x + 2, y, &format!("{:<8}", label), value);
        fb.put_str(x + 2 + w, y, " >", arrows);
    }
}

/// Longest suffix of `s` that fits in `cols` terminal columns.
fn tail_within(s: &str, cols: usize) -> &str {
    let mut used = 0;
    let mut start = s.len();
    for (i, ch) in s.char_indices().rev() {
        used += ch.width().unwrap_or(0);
        if used > cols {
            break;
        }
        start = i;
    }
    &s[start..]
}

fn team_color(label: &str) -> Rgb {
    match label {
        "Red" => Rgb::new(230, 90, 90),
        "Green" => Rgb::new(100, 220, 120),
        "Blue" => Rgb::new(90, 140, 235),
        _ => Rgb::new(240, 240, 240),
    }
}
