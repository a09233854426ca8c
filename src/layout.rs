//! Drawing command list and the layout cursor.
//!
//! Composers append [`DrawOp`]s to a buffer and thread a [`Cursor`] through
//! every call; nothing reads hidden shared state. Coordinates are in
//! millimeters on an A4 page with a bottom-left origin (the PDF backend's
//! native space), so the flowing y decreases as content moves down.

pub const PAGE_W: f32 = 210.0;
pub const PAGE_H: f32 = 297.0;
pub const MARGIN_X: f32 = 15.0;
pub const MARGIN_TOP: f32 = 12.0;

pub const CONTENT_LEFT: f32 = MARGIN_X;
pub const CONTENT_RIGHT: f32 = PAGE_W - MARGIN_X;
pub const CONTENT_W: f32 = CONTENT_RIGHT - CONTENT_LEFT;

/// Lowest y a section may write to; the band below is reserved for footers.
pub const BOTTOM_LIMIT: f32 = 24.0;

pub const LINE_H: f32 = 4.4;

/// RGB in 0..=1, the backend's fill/stroke color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Tint {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

pub const BLACK: Tint = Tint::new(0.0, 0.0, 0.0);
pub const WHITE: Tint = Tint::new(1.0, 1.0, 1.0);
pub const GRAY_TEXT: Tint = Tint::new(0.42, 0.44, 0.47);
pub const GRAY_FILL: Tint = Tint::new(0.93, 0.93, 0.94);
pub const GRAY_RULE: Tint = Tint::new(0.72, 0.74, 0.76);
pub const HIGHLIGHT_FILL: Tint = Tint::new(0.85, 0.90, 0.97);
pub const ACCENT_BLUE: Tint = Tint::new(0.13, 0.28, 0.52);
pub const POSITIVE_GREEN: Tint = Tint::new(0.09, 0.42, 0.22);
pub const WARNING_RED: Tint = Tint::new(0.62, 0.13, 0.11);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Tint,
    pub thickness: f32,
}

/// One drawing command. `Text` y is the baseline; `Rect`/`Image` y is the
/// top edge of the box.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    NewPage,
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        color: Tint,
        align: Align,
        text: String,
    },
    Rect {
        x: f32,
        y_top: f32,
        w: f32,
        h: f32,
        fill: Option<Tint>,
        stroke: Option<Stroke>,
        dashed: bool,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        thickness: f32,
        color: Tint,
    },
    /// Raw image bytes, scaled to fit the box by the backend.
    Image {
        data: Vec<u8>,
        x: f32,
        y_top: f32,
        w: f32,
        h: f32,
    },
}

/// Current page index and vertical write position during composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

impl Cursor {
    /// Page 0, top margin.
    pub fn start() -> Self {
        Self {
            page: 0,
            y: PAGE_H - MARGIN_TOP,
        }
    }

    pub fn advance(mut self, height: f32) -> Self {
        self.y -= height;
        self
    }

    /// True when `required` more millimeters would cross into the reserved
    /// bottom band.
    pub fn needs_break(&self, required: f32) -> bool {
        self.y - required < BOTTOM_LIMIT
    }

    /// Emit a new-page command and reset to the top margin.
    pub fn break_page(mut self, ops: &mut Vec<DrawOp>) -> Self {
        ops.push(DrawOp::NewPage);
        self.page += 1;
        self.y = PAGE_H - MARGIN_TOP;
        self
    }

    /// Break first if `required` does not fit; greedy, never reflows.
    pub fn ensure_room(self, required: f32, ops: &mut Vec<DrawOp>) -> Self {
        if self.needs_break(required) {
            self.break_page(ops)
        } else {
            self
        }
    }

    /// The lower (further advanced) of two side-by-side column ends.
    pub fn max_advance(self, other: Cursor) -> Self {
        if other.page > self.page || (other.page == self.page && other.y < self.y) {
            other
        } else {
            self
        }
    }
}

/// Greedy word wrap by character budget. Height estimation and wrapping use
/// the same routine so estimates stay consistent with what gets drawn.
pub fn wrap_text_lines(input: &str, max_chars: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in input.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Character-count height heuristic for a wrapped text block. Approximate by
/// design, but deterministic for identical input.
pub fn estimate_text_height(text: &str, max_chars: usize) -> f32 {
    wrap_text_lines(text, max_chars).len() as f32 * LINE_H
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_starts_at_top_of_page_zero() {
        let cur = Cursor::start();
        assert_eq!(cur.page, 0);
        assert_eq!(cur.y, PAGE_H - MARGIN_TOP);
    }

    #[test]
    fn advance_moves_down() {
        let cur = Cursor::start().advance(10.0);
        assert_eq!(cur.y, PAGE_H - MARGIN_TOP - 10.0);
    }

    #[test]
    fn needs_break_at_bottom_band() {
        let cur = Cursor { page: 0, y: 30.0 };
        assert!(!cur.needs_break(5.0));
        assert!(cur.needs_break(10.0));
    }

    #[test]
    fn break_page_emits_command_and_resets() {
        let mut ops = Vec::new();
        let cur = Cursor { page: 0, y: 25.0 }.break_page(&mut ops);
        assert_eq!(ops, vec![DrawOp::NewPage]);
        assert_eq!(cur.page, 1);
        assert_eq!(cur.y, PAGE_H - MARGIN_TOP);
    }

    #[test]
    fn ensure_room_only_breaks_when_needed() {
        let mut ops = Vec::new();
        let cur = Cursor { page: 0, y: 200.0 }.ensure_room(50.0, &mut ops);
        assert!(ops.is_empty());
        assert_eq!(cur.page, 0);

        let cur = Cursor { page: 0, y: 30.0 }.ensure_room(50.0, &mut ops);
        assert_eq!(ops.len(), 1);
        assert_eq!(cur.page, 1);
    }

    #[test]
    fn max_advance_picks_the_taller_column() {
        let left = Cursor { page: 0, y: 120.0 };
        let right = Cursor { page: 0, y: 95.0 };
        assert_eq!(left.max_advance(right).y, 95.0);
        assert_eq!(right.max_advance(left).y, 95.0);
    }

    #[test]
    fn wrap_respects_character_budget() {
        let lines = wrap_text_lines("ein zwei drei vier fünf", 9);
        assert_eq!(lines, vec!["ein zwei", "drei vier", "fünf"]);
        assert!(wrap_text_lines("   ", 10).is_empty());
    }

    #[test]
    fn height_estimate_is_line_count_times_line_height() {
        let h = estimate_text_height("ein zwei drei vier fünf", 9);
        assert_eq!(h, 3.0 * LINE_H);
    }
}
