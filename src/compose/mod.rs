//! Report orchestration: runs the section composers in a fixed order,
//! threading the layout cursor, and hands the command list to a canvas.

pub mod photos;
pub mod sections;
pub mod signatures;

use time::OffsetDateTime;

use crate::assets::AssetResolver;
use crate::canvas::{execute, Canvas};
use crate::error::ReportError;
use crate::layout::{Align, Cursor, DrawOp, Stroke, Tint, BLACK, GRAY_RULE};
use crate::model::OrderAggregate;

pub const IMAGES_PER_PAGE: usize = 4;

/// Total page count for the "Seite X von Y" labels: two base pages (main
/// and signatures) plus the photo pages. Computed up front from known
/// content; unexpected section overflow is not folded back into the label.
pub fn total_pages(image_count: usize) -> usize {
    2 + image_count.div_ceil(IMAGES_PER_PAGE)
}

/// Composes one order snapshot into a paginated command list. Holds no
/// mutable state: composing the same snapshot twice with the same
/// `generated_at` yields identical commands.
pub struct ReportComposer<'a> {
    resolver: &'a dyn AssetResolver,
    generated_at: OffsetDateTime,
}

impl<'a> ReportComposer<'a> {
    pub fn new(resolver: &'a dyn AssetResolver, generated_at: OffsetDateTime) -> Self {
        Self { resolver, generated_at }
    }

    pub fn compose(&self, order: &OrderAggregate) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        let cur = Cursor::start();

        let cur = sections::header(order, self.resolver, cur, &mut ops);
        let cur = sections::order_info(order, cur, &mut ops);
        let cur = sections::persons_and_vehicle(order, cur, &mut ops);
        let cur = sections::locations(order, cur, &mut ops);
        let cur = sections::equipment_and_damages(order, cur, &mut ops);
        let cur = sections::expenses(order, cur, &mut ops);
        sections::footer(order, self.generated_at, &mut ops);

        let cur = signatures::signature_page(order, self.resolver, self.generated_at, cur, &mut ops);
        photos::photo_pages(order, self.resolver, cur, &mut ops);

        ops
    }

    /// Compose and encode in one step.
    pub fn render<C: Canvas>(&self, order: &OrderAggregate, canvas: C) -> Result<Vec<u8>, ReportError> {
        execute(&self.compose(order), canvas)
    }
}

// Command-buffer helpers shared by the section composers; the thin layer
// that keeps the composers themselves close to plain geometry.

pub(crate) fn text(ops: &mut Vec<DrawOp>, x: f32, y: f32, size: f32, s: impl Into<String>) {
    styled(ops, x, y, size, false, BLACK, Align::Left, s);
}

pub(crate) fn text_bold(ops: &mut Vec<DrawOp>, x: f32, y: f32, size: f32, s: impl Into<String>) {
    styled(ops, x, y, size, true, BLACK, Align::Left, s);
}

pub(crate) fn styled(
    ops: &mut Vec<DrawOp>,
    x: f32,
    y: f32,
    size: f32,
    bold: bool,
    color: Tint,
    align: Align,
    s: impl Into<String>,
) {
    ops.push(DrawOp::Text {
        x,
        y,
        size,
        bold,
        color,
        align,
        text: s.into(),
    });
}

pub(crate) fn rule(ops: &mut Vec<DrawOp>, x1: f32, x2: f32, y: f32, thickness: f32) {
    ops.push(DrawOp::Line {
        x1,
        y1: y,
        x2,
        y2: y,
        thickness,
        color: GRAY_RULE,
    });
}

pub(crate) fn fill_rect(ops: &mut Vec<DrawOp>, x: f32, y_top: f32, w: f32, h: f32, tint: Tint) {
    ops.push(DrawOp::Rect {
        x,
        y_top,
        w,
        h,
        fill: Some(tint),
        stroke: None,
        dashed: false,
    });
}

pub(crate) fn frame_rect(ops: &mut Vec<DrawOp>, x: f32, y_top: f32, w: f32, h: f32, color: Tint, thickness: f32) {
    ops.push(DrawOp::Rect {
        x,
        y_top,
        w,
        h,
        fill: None,
        stroke: Some(Stroke { color, thickness }),
        dashed: false,
    });
}

pub(crate) fn dashed_rect(ops: &mut Vec<DrawOp>, x: f32, y_top: f32, w: f32, h: f32) {
    ops.push(DrawOp::Rect {
        x,
        y_top,
        w,
        h,
        fill: None,
        stroke: Some(Stroke {
            color: GRAY_RULE,
            thickness: 0.4,
        }),
        dashed: true,
    });
}

#[cfg(test)]
pub(crate) fn collect_texts(ops: &[DrawOp]) -> Vec<&str> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testdata::{sample_order, NullResolver};
    use time::format_description::well_known::Rfc3339;

    fn fixed_now() -> OffsetDateTime {
        OffsetDateTime::parse("2024-03-15T12:00:00Z", &Rfc3339).unwrap()
    }

    #[test]
    fn page_total_follows_image_count() {
        assert_eq!(total_pages(0), 2);
        assert_eq!(total_pages(1), 3);
        assert_eq!(total_pages(4), 3);
        assert_eq!(total_pages(5), 4);
        assert_eq!(total_pages(9), 5);
    }

    #[test]
    fn composition_is_idempotent_for_fixed_clock() {
        let order = sample_order();
        let composer = ReportComposer::new(&NullResolver, fixed_now());
        assert_eq!(composer.compose(&order), composer.compose(&order));
    }

    #[test]
    fn order_without_photos_breaks_to_exactly_one_extra_page() {
        let order = sample_order();
        let ops = ReportComposer::new(&NullResolver, fixed_now()).compose(&order);
        let breaks = ops.iter().filter(|op| **op == DrawOp::NewPage).count();
        // Signature page only; no photo pages for an order without images.
        assert_eq!(breaks, 1);
        assert!(!matches!(ops.first(), Some(DrawOp::NewPage)));
    }

    #[test]
    fn footer_carries_page_one_of_total() {
        let order = sample_order();
        let ops = ReportComposer::new(&NullResolver, fixed_now()).compose(&order);
        let texts = collect_texts(&ops);
        assert!(texts.iter().any(|t| *t == "Seite 1 von 2"));
    }
}
