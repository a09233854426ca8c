//! Signature page: always on its own page, never fails on missing
//! signatures or unreadable signature assets.

use time::OffsetDateTime;

use super::{dashed_rect, fill_rect, frame_rect, rule, styled, text, text_bold, total_pages};
use crate::assets::AssetResolver;
use crate::format::{date_time_value, format_date_time};
use crate::labels::{
    self, COMPANY_NAME, CONFIRMATION_BANNER, LEGAL_BINDING_TEXT, LEGAL_BINDING_TITLE,
    LEGAL_PRIVACY_TEXT, LEGAL_PRIVACY_TITLE, LEGAL_VALIDITY_TEXT, LEGAL_VALIDITY_TITLE,
    SIGNATURE_NOT_AVAILABLE, SIGNATURE_PENDING,
};
use crate::layout::{
    wrap_text_lines, Align, Cursor, DrawOp, CONTENT_LEFT, CONTENT_RIGHT, CONTENT_W, GRAY_FILL,
    GRAY_RULE, GRAY_TEXT, LINE_H, PAGE_W,
};
use crate::model::{OrderAggregate, Signature};
use crate::sanitize::sanitize;

const BLOCK_H: f32 = 58.0;
const BLOCK_GAP: f32 = 10.0;
const AREA_H: f32 = 28.0;

pub fn signature_page(
    order: &OrderAggregate,
    resolver: &dyn AssetResolver,
    generated_at: OffsetDateTime,
    cur: Cursor,
    ops: &mut Vec<DrawOp>,
) -> Cursor {
    let mut cur = cur.break_page(ops);

    styled(ops, PAGE_W / 2.0, cur.y - 2.0, 13.0, true, crate::layout::BLACK, Align::Center, "Unterschriften");
    cur = cur.advance(12.0);

    let block_w = (CONTENT_W - BLOCK_GAP) / 2.0;
    let top = cur.y;
    signature_block(ops, resolver, CONTENT_LEFT, top, block_w, "Fahrer", order.driver_signature.as_ref());
    signature_block(
        ops,
        resolver,
        CONTENT_LEFT + block_w + BLOCK_GAP,
        top,
        block_w,
        "Kunde",
        order.customer_signature.as_ref(),
    );
    cur = cur.advance(BLOCK_H + 8.0);

    // Confirmation banner (fixed legal text, interpolated order number).
    let banner_lines = wrap_text_lines(CONFIRMATION_BANNER, 100);
    let banner_h = banner_lines.len() as f32 * LINE_H + 11.0;
    fill_rect(ops, CONTENT_LEFT, cur.y, CONTENT_W, banner_h, GRAY_FILL);
    text_bold(
        ops,
        CONTENT_LEFT + 3.0,
        cur.y - 5.5,
        9.0,
        format!("Bestätigung – Auftrag {}", sanitize(&order.order_number)),
    );
    let mut line_y = cur.y - 10.5;
    for line in banner_lines {
        text(ops, CONTENT_LEFT + 3.0, line_y, 8.0, line);
        line_y -= LINE_H;
    }
    cur = cur.advance(banner_h + 8.0);

    // Three fixed legal notice boxes.
    const BOX_H: f32 = 32.0;
    const BOX_GAP: f32 = 6.0;
    let box_w = (CONTENT_W - 2.0 * BOX_GAP) / 3.0;
    let notices = [
        (LEGAL_VALIDITY_TITLE, LEGAL_VALIDITY_TEXT),
        (LEGAL_PRIVACY_TITLE, LEGAL_PRIVACY_TEXT),
        (LEGAL_BINDING_TITLE, LEGAL_BINDING_TEXT),
    ];
    for (i, (title, body)) in notices.into_iter().enumerate() {
        let x = CONTENT_LEFT + i as f32 * (box_w + BOX_GAP);
        frame_rect(ops, x, cur.y, box_w, BOX_H, GRAY_RULE, 0.4);
        text_bold(ops, x + 2.5, cur.y - 5.5, 8.0, title);
        let mut body_y = cur.y - 10.0;
        for line in wrap_text_lines(body, 34) {
            styled(ops, x + 2.5, body_y, 6.5, false, GRAY_TEXT, Align::Left, line);
            body_y -= 3.4;
        }
    }
    cur = cur.advance(BOX_H + 10.0);

    // Closing certification band.
    let y = 14.0;
    rule(ops, CONTENT_LEFT, CONTENT_RIGHT, y + 4.0, 0.4);
    styled(ops, CONTENT_LEFT, y, 7.0, false, GRAY_TEXT, Align::Left, COMPANY_NAME);
    styled(
        ops,
        PAGE_W / 2.0,
        y,
        7.0,
        false,
        GRAY_TEXT,
        Align::Center,
        format!(
            "Erstellt am {} – Status: {}",
            date_time_value(generated_at),
            labels::status_label(&order.status)
        ),
    );
    styled(
        ops,
        CONTENT_RIGHT,
        y,
        7.0,
        false,
        GRAY_TEXT,
        Align::Right,
        format!("Seite 2 von {}", total_pages(order.images.len())),
    );

    cur
}

fn signature_block(
    ops: &mut Vec<DrawOp>,
    resolver: &dyn AssetResolver,
    x: f32,
    top: f32,
    w: f32,
    title: &str,
    signature: Option<&Signature>,
) {
    frame_rect(ops, x, top, w, BLOCK_H, GRAY_RULE, 0.5);
    text_bold(ops, x + 3.0, top - 6.0, 9.5, title);

    let area_x = x + 3.0;
    let area_w = w - 6.0;
    let area_top = top - 10.0;
    dashed_rect(ops, area_x, area_top, area_w, AREA_H);

    let Some(sig) = signature else {
        styled(
            ops,
            x + w / 2.0,
            area_top - AREA_H / 2.0 - 1.0,
            8.0,
            false,
            GRAY_TEXT,
            Align::Center,
            SIGNATURE_PENDING,
        );
        return;
    };

    match resolver.resolve(&sig.asset_ref) {
        Ok(Some(bytes)) => ops.push(DrawOp::Image {
            data: bytes,
            x: area_x + 1.0,
            y_top: area_top - 1.0,
            w: area_w - 2.0,
            h: AREA_H - 2.0,
        }),
        Ok(None) => styled(
            ops,
            x + w / 2.0,
            area_top - AREA_H / 2.0 - 1.0,
            8.0,
            false,
            GRAY_TEXT,
            Align::Center,
            SIGNATURE_NOT_AVAILABLE,
        ),
        Err(e) => {
            log::warn!("signature asset {} unreadable: {e}", sig.asset_ref);
            styled(
                ops,
                x + w / 2.0,
                area_top - AREA_H / 2.0 - 1.0,
                8.0,
                false,
                GRAY_TEXT,
                Align::Center,
                SIGNATURE_NOT_AVAILABLE,
            );
        }
    }

    text(ops, x + 3.0, area_top - AREA_H - 5.0, 8.5, sanitize(&sig.signer_name));
    styled(
        ops,
        x + 3.0,
        area_top - AREA_H - 9.5,
        7.5,
        false,
        GRAY_TEXT,
        Align::Left,
        format!("Unterzeichnet am {}", format_date_time(&sig.signed_at)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::collect_texts;
    use crate::testdata::{sample_order, NullResolver};
    use time::format_description::well_known::Rfc3339;

    fn fixed_now() -> OffsetDateTime {
        OffsetDateTime::parse("2024-03-15T12:00:00Z", &Rfc3339).unwrap()
    }

    fn compose(order: &OrderAggregate) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        signature_page(order, &NullResolver, fixed_now(), Cursor::start(), &mut ops);
        ops
    }

    #[test]
    fn always_starts_on_a_fresh_page() {
        let ops = compose(&sample_order());
        assert_eq!(ops.first(), Some(&DrawOp::NewPage));
    }

    #[test]
    fn driver_signed_customer_pending() {
        let mut order = sample_order();
        order.driver_signature = Some(Signature {
            signer_name: "Max Fahrer".to_string(),
            asset_ref: "signatures/driver.png".to_string(),
            signed_at: "2024-03-15T10:00:00Z".to_string(),
            is_driver: true,
        });
        order.customer_signature = None;

        let ops = compose(&order);
        let texts = collect_texts(&ops);

        assert!(texts.iter().any(|t| *t == "Max Fahrer"));
        assert!(texts.iter().any(|t| t.starts_with("Unterzeichnet am 15.03.2024")));
        // Asset is unresolvable through the null resolver.
        assert!(texts.contains(&SIGNATURE_NOT_AVAILABLE));
        assert!(texts.contains(&SIGNATURE_PENDING));
    }

    #[test]
    fn both_missing_render_two_pending_notes() {
        let order = sample_order();
        let texts_owned = compose(&order);
        let texts = collect_texts(&texts_owned);
        assert_eq!(texts.iter().filter(|t| **t == SIGNATURE_PENDING).count(), 2);
    }

    #[test]
    fn certification_band_carries_status_and_timestamp() {
        let ops = compose(&sample_order());
        let texts = collect_texts(&ops);
        assert!(texts
            .iter()
            .any(|t| t.contains("Status: Zugewiesen") && t.contains("Erstellt am")));
    }
}
