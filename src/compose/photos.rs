//! Photo documentation pages: a 2×2 grid, four images per page.

use super::{dashed_rect, fill_rect, rule, styled, text_bold, total_pages, IMAGES_PER_PAGE};
use crate::assets::AssetResolver;
use crate::format::format_date_time;
use crate::labels::{
    DOCUMENT_TITLE, PHOTO_CAPTION_DEFAULT, PHOTO_FOOTER_NOTICE, PHOTO_LOAD_ERROR,
    PHOTO_NOT_AVAILABLE,
};
use crate::layout::{
    wrap_text_lines, Align, Cursor, DrawOp, ACCENT_BLUE, BLACK, CONTENT_LEFT, CONTENT_RIGHT,
    GRAY_FILL, GRAY_TEXT, PAGE_W, WARNING_RED, WHITE,
};
use crate::model::{ImageRecord, OrderAggregate};
use crate::sanitize::sanitize;

const CELL_W: f32 = 87.0;
const CELL_H: f32 = 100.0;
const CELL_GAP_X: f32 = 6.0;
const CELL_GAP_Y: f32 = 5.0;
const BAR_H: f32 = 7.0;
const CAPTION_H: f32 = 8.0;
const PHOTO_AREA_H: f32 = CELL_H - BAR_H - CAPTION_H;

/// Emit `ceil(n / 4)` photo pages; none when the order has no images.
pub fn photo_pages(
    order: &OrderAggregate,
    resolver: &dyn AssetResolver,
    cur: Cursor,
    ops: &mut Vec<DrawOp>,
) -> Cursor {
    let count = order.images.len();
    if count == 0 {
        return cur;
    }

    let total = total_pages(count);
    let photo_page_count = count.div_ceil(IMAGES_PER_PAGE);
    let mut cur = cur;

    for p in 0..photo_page_count {
        cur = cur.break_page(ops);

        // Repeated page header with the document reference.
        text_bold(
            ops,
            CONTENT_LEFT,
            cur.y - 2.0,
            10.0,
            format!("{} – Auftrag {}", DOCUMENT_TITLE, sanitize(&order.order_number)),
        );
        styled(
            ops,
            CONTENT_RIGHT,
            cur.y - 2.0,
            8.0,
            false,
            GRAY_TEXT,
            Align::Right,
            format!("Seite {} von {}", 3 + p, total),
        );
        rule(ops, CONTENT_LEFT, CONTENT_RIGHT, cur.y - 6.0, 0.6);
        cur = cur.advance(12.0);

        let grid_top = cur.y;
        let start = p * IMAGES_PER_PAGE;
        let end = (start + IMAGES_PER_PAGE).min(count);
        for (j, image) in order.images[start..end].iter().enumerate() {
            let col = (j % 2) as f32;
            let row = (j / 2) as f32;
            let x = CONTENT_LEFT + col * (CELL_W + CELL_GAP_X);
            let y_top = grid_top - row * (CELL_H + CELL_GAP_Y);
            photo_cell(ops, resolver, x, y_top, start + j, image);
        }
        cur = cur.advance(2.0 * CELL_H + CELL_GAP_Y + 6.0);

        styled(
            ops,
            PAGE_W / 2.0,
            10.0,
            6.5,
            false,
            GRAY_TEXT,
            Align::Center,
            PHOTO_FOOTER_NOTICE,
        );
    }
    cur
}

fn photo_cell(
    ops: &mut Vec<DrawOp>,
    resolver: &dyn AssetResolver,
    x: f32,
    y_top: f32,
    index: usize,
    image: &ImageRecord,
) {
    // Header bar: global sequence number and capture timestamp.
    fill_rect(ops, x, y_top, CELL_W, BAR_H, ACCENT_BLUE);
    styled(ops, x + 2.0, y_top - 5.0, 8.0, true, WHITE, Align::Left, format!("Foto {}", index + 1));
    styled(
        ops,
        x + CELL_W - 2.0,
        y_top - 5.0,
        7.0,
        false,
        WHITE,
        Align::Right,
        format_date_time(&image.created_at),
    );

    let content_top = y_top - BAR_H;
    dashed_rect(ops, x, content_top, CELL_W, PHOTO_AREA_H);

    match resolver.resolve(&image.asset_ref) {
        Ok(Some(bytes)) => ops.push(DrawOp::Image {
            data: bytes,
            x: x + 1.5,
            y_top: content_top - 1.5,
            w: CELL_W - 3.0,
            h: PHOTO_AREA_H - 3.0,
        }),
        Ok(None) => styled(
            ops,
            x + CELL_W / 2.0,
            content_top - PHOTO_AREA_H / 2.0,
            8.0,
            false,
            GRAY_TEXT,
            Align::Center,
            PHOTO_NOT_AVAILABLE,
        ),
        Err(e) => {
            log::warn!("photo asset {} unreadable: {e}", image.asset_ref);
            styled(
                ops,
                x + CELL_W / 2.0,
                content_top - PHOTO_AREA_H / 2.0,
                8.0,
                false,
                WARNING_RED,
                Align::Center,
                PHOTO_LOAD_ERROR,
            );
        }
    }

    // Caption bar: description or a generated default.
    let caption_top = content_top - PHOTO_AREA_H;
    fill_rect(ops, x, caption_top, CELL_W, CAPTION_H, GRAY_FILL);
    let caption = match image.description.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(desc) => wrap_text_lines(&sanitize(desc), 48)
            .into_iter()
            .next()
            .unwrap_or_else(|| format!("{} {}", PHOTO_CAPTION_DEFAULT, index + 1)),
        None => format!("{} {}", PHOTO_CAPTION_DEFAULT, index + 1),
    };
    styled(ops, x + 2.0, caption_top - 5.2, 7.5, false, BLACK, Align::Left, caption);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::collect_texts;
    use crate::testdata::{sample_order, NullResolver};

    fn order_with_images(n: usize) -> OrderAggregate {
        let mut order = sample_order();
        order.images = (0..n)
            .map(|i| ImageRecord {
                name: format!("IMG_{i:04}.jpg"),
                asset_ref: format!("photos/IMG_{i:04}.jpg"),
                category: "HANDOVER".to_string(),
                description: None,
                created_at: "2024-03-15T10:15:00Z".to_string(),
            })
            .collect();
        order
    }

    fn compose(n: usize) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        photo_pages(&order_with_images(n), &NullResolver, Cursor::start(), &mut ops);
        ops
    }

    fn page_breaks(ops: &[DrawOp]) -> usize {
        ops.iter().filter(|op| **op == DrawOp::NewPage).count()
    }

    // "Foto <n>" header labels only; the not-available placeholder also
    // starts with "Foto ".
    fn is_cell_header(text: &str) -> bool {
        text.strip_prefix("Foto ")
            .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()) && !rest.is_empty())
    }

    fn cells_per_page(ops: &[DrawOp]) -> Vec<usize> {
        let mut pages = Vec::new();
        for op in ops {
            match op {
                DrawOp::NewPage => pages.push(0),
                DrawOp::Text { text, .. } if is_cell_header(text) => {
                    if let Some(last) = pages.last_mut() {
                        *last += 1;
                    }
                }
                _ => {}
            }
        }
        pages
    }

    #[test]
    fn no_images_emit_no_pages() {
        assert!(compose(0).is_empty());
    }

    #[test]
    fn page_count_is_ceil_of_quarters() {
        assert_eq!(page_breaks(&compose(1)), 1);
        assert_eq!(page_breaks(&compose(4)), 1);
        assert_eq!(page_breaks(&compose(5)), 2);
        assert_eq!(page_breaks(&compose(9)), 3);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        assert_eq!(cells_per_page(&compose(5)), vec![4, 1]);
        assert_eq!(cells_per_page(&compose(8)), vec![4, 4]);
        assert_eq!(cells_per_page(&compose(3)), vec![3]);
    }

    #[test]
    fn unresolvable_assets_render_not_available_placeholders() {
        let ops = compose(2);
        let texts = collect_texts(&ops);
        assert_eq!(texts.iter().filter(|t| **t == PHOTO_NOT_AVAILABLE).count(), 2);
    }

    #[test]
    fn missing_description_gets_generated_caption() {
        let ops = compose(1);
        let texts = collect_texts(&ops);
        assert!(texts.iter().any(|t| *t == "Dokumentation 1"));
    }

    #[test]
    fn photo_page_numbers_continue_after_base_pages() {
        let ops = compose(5);
        let texts = collect_texts(&ops);
        assert!(texts.contains(&"Seite 3 von 4"));
        assert!(texts.contains(&"Seite 4 von 4"));
    }
}
