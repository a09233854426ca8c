//! Section composers for the main report page.
//!
//! Each composer is a pure function over the order snapshot and the current
//! cursor; it appends draw commands and returns the advanced cursor. The
//! fixed invocation order lives in [`super::ReportComposer::compose`].

use time::OffsetDateTime;

use super::{fill_rect, rule, styled, text, text_bold, total_pages};
use crate::assets::AssetResolver;
use crate::format::{date_time_value, format_date, format_date_time, format_eur, round2};
use crate::labels::{
    self, COMPANY_ADDRESS, COMPANY_CONTACT, COMPANY_NAME, DOCUMENT_TITLE, NO_ADDRESS,
    NO_DAMAGES, NO_EXTRA_COSTS, NOT_SPECIFIED,
};
use crate::layout::{
    estimate_text_height, wrap_text_lines, Align, Cursor, DrawOp, ACCENT_BLUE, BLACK,
    CONTENT_LEFT, CONTENT_RIGHT, CONTENT_W, GRAY_FILL, GRAY_TEXT, HIGHLIGHT_FILL, LINE_H,
    PAGE_W, POSITIVE_GREEN, WARNING_RED, WHITE,
};
use crate::model::{Address, OrderAggregate};
use crate::sanitize::{sanitize, sanitize_or};

const COL2_X: f32 = CONTENT_LEFT + CONTENT_W / 2.0 + 5.0;
const WRAP_FULL: usize = 95;
const WRAP_HALF: usize = 45;

const BADGE_W: f32 = 44.0;
const BADGE_H: f32 = 7.0;

// Free-text fields inside the two-column sections are capped so a single
// oversized remark or damage note cannot outgrow a page.
const REMARK_LINES_MAX: usize = 3;
const DAMAGE_DESC_LINES_MAX: usize = 2;

/// Logo (if resolvable), company title block, centered document title,
/// separating rule.
pub fn header(
    _order: &OrderAggregate,
    resolver: &dyn AssetResolver,
    cur: Cursor,
    ops: &mut Vec<DrawOp>,
) -> Cursor {
    let top = cur.y;

    if let Some(bytes) = resolver.find_logo() {
        ops.push(DrawOp::Image {
            data: bytes,
            x: CONTENT_RIGHT - 42.0,
            y_top: top,
            w: 42.0,
            h: 15.0,
        });
    }

    text_bold(ops, CONTENT_LEFT, top - 4.0, 11.0, COMPANY_NAME);
    styled(ops, CONTENT_LEFT, top - 9.0, 7.5, false, GRAY_TEXT, Align::Left, COMPANY_ADDRESS);
    styled(ops, CONTENT_LEFT, top - 13.0, 7.5, false, GRAY_TEXT, Align::Left, COMPANY_CONTACT);

    let cur = cur.advance(20.0);
    styled(ops, PAGE_W / 2.0, cur.y, 14.0, true, BLACK, Align::Center, DOCUMENT_TITLE);
    let cur = cur.advance(4.0);
    rule(ops, CONTENT_LEFT, CONTENT_RIGHT, cur.y, 0.85);
    cur.advance(8.0)
}

/// Fixed 4-column card grid plus the optional description/comment blocks.
pub fn order_info(order: &OrderAggregate, cur: Cursor, ops: &mut Vec<DrawOp>) -> Cursor {
    const CARD_H: f32 = 16.0;
    const CARD_GAP: f32 = 4.0;
    let card_w = (CONTENT_W - 3.0 * CARD_GAP) / 4.0;

    let cards = [
        ("Auftragsnummer", sanitize(&order.order_number), true),
        ("Status", labels::status_label(&order.status), false),
        ("Serviceart", labels::service_type_label(&order.service_type), false),
        ("Fahrzeugtyp", sanitize(&order.vehicle_type), false),
    ];

    for (i, (label, value, highlighted)) in cards.into_iter().enumerate() {
        let x = CONTENT_LEFT + i as f32 * (card_w + CARD_GAP);
        let fill = if highlighted { HIGHLIGHT_FILL } else { GRAY_FILL };
        fill_rect(ops, x, cur.y, card_w, CARD_H, fill);
        styled(ops, x + 2.0, cur.y - 4.8, 6.5, false, GRAY_TEXT, Align::Left, label);
        text_bold(ops, x + 2.0, cur.y - 11.8, 9.0, value);
    }
    let mut cur = cur.advance(CARD_H + 5.0);

    styled(
        ops,
        CONTENT_LEFT,
        cur.y,
        7.5,
        false,
        GRAY_TEXT,
        Align::Left,
        format!("Angelegt am {}", format_date(&order.created_at)),
    );
    cur = cur.advance(7.0);

    cur = text_block(ops, cur, "Beschreibung", order.description.trim());
    if let Some(comments) = order.comments.as_deref() {
        cur = text_block(ops, cur, "Bemerkungen", comments.trim());
    }
    cur
}

/// Titled free-text block with char-count height estimation; skipped when
/// the text is empty.
fn text_block(ops: &mut Vec<DrawOp>, cur: Cursor, title: &str, raw: &str) -> Cursor {
    if raw.is_empty() {
        return cur;
    }
    let body = sanitize(raw);
    let needed = estimate_text_height(&body, WRAP_FULL) + 10.0;
    let mut cur = cur.ensure_room(needed, ops);

    text_bold(ops, CONTENT_LEFT, cur.y, 10.0, title);
    cur = cur.advance(5.4);
    for line in wrap_text_lines(&body, WRAP_FULL) {
        text(ops, CONTENT_LEFT, cur.y, 8.5, line);
        cur = cur.advance(LINE_H);
    }
    cur.advance(3.0)
}

/// Client stack (above the optional driver stack) beside the vehicle stack,
/// both starting at the same y. Returns the maximum of the two end positions.
pub fn persons_and_vehicle(order: &OrderAggregate, cur: Cursor, ops: &mut Vec<DrawOp>) -> Cursor {
    let cur = cur.ensure_room(persons_and_vehicle_height(order), ops);
    let top = cur.y;

    // Left stack: client, then driver.
    let mut y_left = top;
    text_bold(ops, CONTENT_LEFT, y_left, 10.0, "Auftraggeber");
    y_left -= 5.6;

    let a = &order.client_address;
    let client_name = sanitize_or(
        a.company.as_deref().or(a.contact_name.as_deref()),
        NOT_SPECIFIED,
    );
    text_bold(ops, CONTENT_LEFT, y_left, 8.5, client_name);
    y_left -= LINE_H;

    if a.company.is_some() {
        if let Some(contact) = a.contact_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            text(ops, CONTENT_LEFT, y_left, 8.5, sanitize(contact));
            y_left -= LINE_H;
        }
    }
    for value in [a.contact_phone.as_deref(), a.contact_email.as_deref()] {
        if let Some(v) = value.map(str::trim).filter(|s| !s.is_empty()) {
            text(ops, CONTENT_LEFT, y_left, 8.5, sanitize(v));
            y_left -= LINE_H;
        }
    }
    text(ops, CONTENT_LEFT, y_left, 8.5, address_line(a));
    y_left -= LINE_H;
    text(ops, CONTENT_LEFT, y_left, 8.5, city_line(a));
    y_left -= LINE_H;

    if let Some(billing) = &order.billing_address {
        y_left -= 2.0;
        styled(ops, CONTENT_LEFT, y_left, 7.5, false, GRAY_TEXT, Align::Left, "Rechnungsanschrift");
        y_left -= LINE_H;
        let line = format!("{}, {}", address_line(billing), city_line(billing));
        styled(ops, CONTENT_LEFT, y_left, 7.5, false, GRAY_TEXT, Align::Left, line);
        y_left -= LINE_H;
    }

    if let Some(driver) = &order.driver {
        y_left -= 3.0;
        text_bold(ops, CONTENT_LEFT, y_left, 10.0, "Fahrer");
        y_left -= 5.6;
        for value in [driver.name.as_str(), driver.phone.as_str(), driver.email.as_str()] {
            text(ops, CONTENT_LEFT, y_left, 8.5, sanitize(value));
            y_left -= LINE_H;
        }
    }

    // Right stack: vehicle.
    let mut y_right = top;
    text_bold(ops, COL2_X, y_right, 10.0, "Fahrzeug");
    y_right -= 6.4;

    // Plate as a highlighted badge.
    fill_rect(ops, COL2_X, y_right, BADGE_W, BADGE_H, ACCENT_BLUE);
    styled(
        ops,
        COL2_X + BADGE_W / 2.0,
        y_right - 5.0,
        10.0,
        true,
        WHITE,
        Align::Center,
        sanitize(&order.vehicle.plate),
    );
    y_right -= BADGE_H + 4.5;

    let v = &order.vehicle;
    let pairs = [
        ("Halter", sanitize(&v.owner)),
        ("Marke", sanitize(&v.brand)),
        ("Modell", sanitize(&v.model)),
        ("Baujahr", sanitize(&v.year)),
        ("Farbe", sanitize(&v.color)),
        ("FIN", sanitize(&v.vin)),
    ];
    let half_w = (CONTENT_RIGHT - COL2_X) / 2.0;
    for row in pairs.chunks(2) {
        for (j, (label, value)) in row.iter().enumerate() {
            let x = COL2_X + j as f32 * half_w;
            styled(ops, x, y_right, 6.5, false, GRAY_TEXT, Align::Left, *label);
            text(ops, x, y_right - 3.8, 8.5, value.clone());
        }
        y_right -= 9.2;
    }

    for (label, value) in [
        ("Bestellnr.", v.order_code.as_deref()),
        ("Vertragsnr.", v.contract_code.as_deref()),
        ("Kostenstelle", v.cost_center.as_deref()),
    ] {
        if let Some(code) = value.map(str::trim).filter(|s| !s.is_empty()) {
            let line = format!("{}: {}", label, sanitize(code));
            styled(ops, COL2_X, y_right, 7.5, false, GRAY_TEXT, Align::Left, line);
            y_right -= LINE_H;
        }
    }
    if let Some(remark) = v.remark.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        for line in wrap_text_lines(&sanitize(remark), WRAP_HALF)
            .into_iter()
            .take(REMARK_LINES_MAX)
        {
            styled(ops, COL2_X, y_right, 7.5, false, GRAY_TEXT, Align::Left, line);
            y_right -= LINE_H;
        }
    }

    let left_end = Cursor { page: cur.page, y: y_left };
    let right_end = Cursor { page: cur.page, y: y_right };
    left_end.max_advance(right_end).advance(6.0)
}

/// Height the two stacks will actually occupy, mirroring the presence checks
/// of the rendering code above.
fn persons_and_vehicle_height(order: &OrderAggregate) -> f32 {
    let a = &order.client_address;
    let mut left = 5.6 + LINE_H;
    if a.company.is_some()
        && a.contact_name.as_deref().map(str::trim).filter(|s| !s.is_empty()).is_some()
    {
        left += LINE_H;
    }
    for value in [a.contact_phone.as_deref(), a.contact_email.as_deref()] {
        if value.map(str::trim).filter(|s| !s.is_empty()).is_some() {
            left += LINE_H;
        }
    }
    left += 2.0 * LINE_H;
    if order.billing_address.is_some() {
        left += 2.0 + 2.0 * LINE_H;
    }
    if order.driver.is_some() {
        left += 3.0 + 5.6 + 3.0 * LINE_H;
    }

    let v = &order.vehicle;
    let mut right = 6.4 + BADGE_H + 4.5 + 3.0 * 9.2;
    for value in [v.order_code.as_deref(), v.contract_code.as_deref(), v.cost_center.as_deref()] {
        if value.map(str::trim).filter(|s| !s.is_empty()).is_some() {
            right += LINE_H;
        }
    }
    if let Some(remark) = v.remark.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let lines = wrap_text_lines(&sanitize(remark), WRAP_HALF).len().min(REMARK_LINES_MAX);
        right += lines as f32 * LINE_H;
    }

    left.max(right) + 6.0
}

/// Pickup and delivery blocks side by side at a shared y, each falling back
/// to a placeholder when absent.
pub fn locations(order: &OrderAggregate, cur: Cursor, ops: &mut Vec<DrawOp>) -> Cursor {
    let cur = cur.ensure_room(46.0, ops);
    let top = cur.y;

    let y1 = address_block(ops, CONTENT_LEFT, top, "Abholadresse", order.pickup_address.as_ref());
    let y2 = address_block(ops, COL2_X, top, "Zustelladresse", order.delivery_address.as_ref());

    Cursor { page: cur.page, y: y1.min(y2) }.advance(6.0)
}

fn address_block(ops: &mut Vec<DrawOp>, x: f32, top: f32, title: &str, address: Option<&Address>) -> f32 {
    text_bold(ops, x, top, 10.0, title);
    let mut y = top - 5.6;

    let Some(a) = address else {
        styled(ops, x, y, 8.5, false, GRAY_TEXT, Align::Left, NO_ADDRESS);
        return y - LINE_H;
    };

    if let Some(company) = a.company.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        text_bold(ops, x, y, 8.5, sanitize(company));
        y -= LINE_H;
    }
    if let Some(contact) = a.contact_name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        text(ops, x, y, 8.5, sanitize(contact));
        y -= LINE_H;
    }
    text(ops, x, y, 8.5, address_line(a));
    y -= LINE_H;
    text(ops, x, y, 8.5, city_line(a));
    y -= LINE_H;

    if let Some(event) = a.event_date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let line = format!("Termin: {}", format_date_time(event));
        styled(ops, x, y, 7.5, false, GRAY_TEXT, Align::Left, line);
        y -= LINE_H;
    }
    if let Some(level) = a.fuel_level {
        let line = format!("Tankstand: {}/8", level.min(8));
        styled(ops, x, y, 7.5, false, GRAY_TEXT, Align::Left, line);
        y -= LINE_H;
    }
    if let Some(meter) = a.fuel_meter {
        let line = format!("Kilometerstand: {:.0} km", meter);
        styled(ops, x, y, 7.5, false, GRAY_TEXT, Align::Left, line);
        y -= LINE_H;
    }
    y
}

fn address_line(a: &Address) -> String {
    sanitize(&format!("{} {}", a.street.trim(), a.house_number.trim()))
}

fn city_line(a: &Address) -> String {
    let mut line = format!("{} {}", a.zip.trim(), a.city.trim());
    let country = a.country.trim();
    if !country.is_empty() {
        line.push_str(", ");
        line.push_str(country);
    }
    sanitize(&line)
}

/// Equipment (positive styling, at most five items) beside damages (warning
/// styling, at most five), both starting at the same y.
pub fn equipment_and_damages(order: &OrderAggregate, cur: Cursor, ops: &mut Vec<DrawOp>) -> Cursor {
    let equipment_lines = order.equipment.iter().take(5).count().max(1);
    let damage_lines: usize = if order.damages.is_empty() {
        1
    } else {
        order
            .damages
            .iter()
            .take(5)
            .map(|d| {
                let desc = d
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|desc| {
                        wrap_text_lines(&sanitize(desc), WRAP_HALF)
                            .len()
                            .min(DAMAGE_DESC_LINES_MAX)
                    })
                    .unwrap_or(0);
                1 + desc
            })
            .sum()
    };
    let needed = 5.6 + equipment_lines.max(damage_lines) as f32 * LINE_H + 6.0;

    let cur = cur.ensure_room(needed, ops);
    let top = cur.y;

    let mut y_left = top;
    text_bold(ops, CONTENT_LEFT, y_left, 10.0, "Übergebene Ausstattung");
    y_left -= 5.6;
    if order.equipment.is_empty() {
        styled(ops, CONTENT_LEFT, y_left, 8.5, false, GRAY_TEXT, Align::Left, NOT_SPECIFIED);
        y_left -= LINE_H;
    } else {
        // More than five items are silently truncated.
        for code in order.equipment.iter().take(5) {
            let (icon, label) = labels::equipment_label(code);
            let line = format!("{} {}", icon, label);
            styled(ops, CONTENT_LEFT, y_left, 8.5, false, POSITIVE_GREEN, Align::Left, line);
            y_left -= LINE_H;
        }
    }

    let mut y_right = top;
    text_bold(ops, COL2_X, y_right, 10.0, "Schäden");
    y_right -= 5.6;
    if order.damages.is_empty() {
        let line = format!("✓ {}", NO_DAMAGES);
        styled(ops, COL2_X, y_right, 8.5, false, POSITIVE_GREEN, Align::Left, line);
        y_right -= LINE_H;
    } else {
        for damage in order.damages.iter().take(5) {
            let line = format!(
                "{}: {}",
                labels::vehicle_side_label(&damage.side),
                labels::damage_type_label(&damage.damage_type)
            );
            styled(ops, COL2_X, y_right, 8.5, false, WARNING_RED, Align::Left, line);
            y_right -= LINE_H;
            if let Some(desc) = damage.description.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                for line in wrap_text_lines(&sanitize(desc), WRAP_HALF)
                    .into_iter()
                    .take(DAMAGE_DESC_LINES_MAX)
                {
                    styled(ops, COL2_X + 3.0, y_right, 7.5, false, GRAY_TEXT, Align::Left, line);
                    y_right -= LINE_H;
                }
            }
        }
    }

    Cursor { page: cur.page, y: y_left.min(y_right) }.advance(6.0)
}

const VAT_RATE: f64 = 0.19;

/// Positive expense line items with subtotal, 19 % VAT and gross total, or
/// the "no additional costs" placeholder.
pub fn expenses(order: &OrderAggregate, cur: Cursor, ops: &mut Vec<DrawOp>) -> Cursor {
    let items = order
        .expenses
        .as_ref()
        .map(|e| e.positive_items())
        .unwrap_or_default();

    let needed = 12.0 + (items.len() as f32 + 3.0) * LINE_H + 8.0;
    let mut cur = cur.ensure_room(needed, ops);

    text_bold(ops, CONTENT_LEFT, cur.y, 10.0, "Zusatzkosten");
    cur = cur.advance(5.6);

    if items.is_empty() {
        styled(ops, CONTENT_LEFT, cur.y, 8.5, false, GRAY_TEXT, Align::Left, NO_EXTRA_COSTS);
        return cur.advance(LINE_H + 3.0);
    }

    for (label, amount) in &items {
        text(ops, CONTENT_LEFT, cur.y, 8.5, *label);
        styled(ops, CONTENT_RIGHT, cur.y, 8.5, false, BLACK, Align::Right, format_eur(*amount));
        cur = cur.advance(LINE_H);
    }

    rule(ops, CONTENT_LEFT, CONTENT_RIGHT, cur.y + 1.2, 0.4);
    cur = cur.advance(3.4);

    let subtotal = round2(order.expenses.as_ref().map(|e| e.subtotal()).unwrap_or_default());
    let vat = round2(subtotal * VAT_RATE);
    let gross = round2(subtotal * (1.0 + VAT_RATE));

    text(ops, CONTENT_LEFT, cur.y, 8.5, "Zwischensumme");
    styled(ops, CONTENT_RIGHT, cur.y, 8.5, false, BLACK, Align::Right, format_eur(subtotal));
    cur = cur.advance(LINE_H);

    text(ops, CONTENT_LEFT, cur.y, 8.5, "MwSt. (19 %)");
    styled(ops, CONTENT_RIGHT, cur.y, 8.5, false, BLACK, Align::Right, format_eur(vat));
    cur = cur.advance(LINE_H);

    text_bold(ops, CONTENT_LEFT, cur.y, 9.5, "Gesamtbetrag");
    styled(ops, CONTENT_RIGHT, cur.y, 9.5, true, BLACK, Align::Right, format_eur(gross));
    cur = cur.advance(LINE_H + 1.0);

    if let Some(note) = order
        .expenses
        .as_ref()
        .and_then(|e| e.note.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        for line in wrap_text_lines(&sanitize(note), WRAP_FULL) {
            styled(ops, CONTENT_LEFT, cur.y, 7.5, false, GRAY_TEXT, Align::Left, line);
            cur = cur.advance(LINE_H);
        }
    }
    cur.advance(3.0)
}

/// Fixed band near the bottom margin of the main page.
pub fn footer(order: &OrderAggregate, generated_at: OffsetDateTime, ops: &mut Vec<DrawOp>) {
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
        format!("Erstellt am {}", date_time_value(generated_at)),
    );
    styled(
        ops,
        CONTENT_RIGHT,
        y,
        7.0,
        false,
        GRAY_TEXT,
        Align::Right,
        format!("Seite 1 von {}", total_pages(order.images.len())),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::collect_texts;
    use crate::model::{DamageRecord, ExpensesRecord};
    use crate::testdata::sample_order;

    #[test]
    fn empty_expenses_render_placeholder_and_no_totals() {
        let mut order = sample_order();
        order.expenses = Some(ExpensesRecord::default());

        let mut ops = Vec::new();
        expenses(&order, Cursor::start(), &mut ops);
        let texts = collect_texts(&ops);

        assert!(texts.contains(&NO_EXTRA_COSTS));
        assert!(!texts.iter().any(|t| *t == "Zwischensumme"));
        assert!(!texts.iter().any(|t| t.starts_with("MwSt.")));
    }

    #[test]
    fn expense_totals_use_19_percent_vat() {
        let mut order = sample_order();
        order.expenses = Some(ExpensesRecord {
            fuel: Some(85.0),
            wash: Some(20.0),
            toll: Some(35.0),
            parking: Some(15.0),
            ..Default::default()
        });

        let mut ops = Vec::new();
        expenses(&order, Cursor::start(), &mut ops);
        let texts = collect_texts(&ops);

        assert!(texts.contains(&"155,00 €"));
        assert!(texts.contains(&"29,45 €"));
        assert!(texts.contains(&"184,45 €"));
        assert!(!texts.contains(&NO_EXTRA_COSTS));
    }

    #[test]
    fn missing_addresses_fall_back_to_placeholder_lines() {
        let mut order = sample_order();
        order.pickup_address = None;
        order.delivery_address = None;

        let mut ops = Vec::new();
        locations(&order, Cursor::start(), &mut ops);
        let texts = collect_texts(&ops);

        assert_eq!(texts.iter().filter(|t| **t == NO_ADDRESS).count(), 2);
    }

    #[test]
    fn no_damages_renders_positive_confirmation() {
        let order = sample_order();
        let mut ops = Vec::new();
        equipment_and_damages(&order, Cursor::start(), &mut ops);
        let texts = collect_texts(&ops);

        assert!(texts.iter().any(|t| t.contains(NO_DAMAGES)));
    }

    #[test]
    fn unmapped_damage_code_renders_literally() {
        let mut order = sample_order();
        order.damages = vec![DamageRecord {
            side: "FRONT".to_string(),
            damage_type: "HAIL_DAMAGE".to_string(),
            description: None,
        }];

        let mut ops = Vec::new();
        equipment_and_damages(&order, Cursor::start(), &mut ops);
        let texts = collect_texts(&ops);

        assert!(texts.iter().any(|t| *t == "Front: HAIL_DAMAGE"));
    }

    #[test]
    fn equipment_list_is_truncated_to_five() {
        let mut order = sample_order();
        order.equipment = (0..8).map(|i| format!("ITEM_{i}")).collect();

        let mut ops = Vec::new();
        equipment_and_damages(&order, Cursor::start(), &mut ops);
        let texts = collect_texts(&ops);

        let items = texts.iter().filter(|t| t.contains("ITEM_")).count();
        assert_eq!(items, 5);
    }

    fn lowest_text_y(ops: &[DrawOp]) -> f32 {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y),
                _ => None,
            })
            .fold(f32::MAX, f32::min)
    }

    #[test]
    fn long_damage_descriptions_break_instead_of_overflowing() {
        let mut order = sample_order();
        let long = "sehr langer Schadenstext mit vielen Einzelheiten ".repeat(30);
        order.damages = (0..5)
            .map(|_| DamageRecord {
                side: "FRONT".to_string(),
                damage_type: "SCRATCH".to_string(),
                description: Some(long.clone()),
            })
            .collect();

        let mut ops = Vec::new();
        let end = equipment_and_damages(&order, Cursor { page: 0, y: 90.0 }, &mut ops);

        assert!(ops.contains(&DrawOp::NewPage));
        assert!(lowest_text_y(&ops) >= crate::layout::BOTTOM_LIMIT);
        assert!(end.y >= crate::layout::BOTTOM_LIMIT);

        // Each description is capped, not rendered in full.
        let desc_lines = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { x, .. } if *x == COL2_X + 3.0))
            .count();
        assert_eq!(desc_lines, 5 * DAMAGE_DESC_LINES_MAX);
    }

    #[test]
    fn long_vehicle_remark_breaks_instead_of_overflowing() {
        let mut order = sample_order();
        order.vehicle.remark = Some("Hinweis zum Fahrzeugzustand ".repeat(40));

        let mut ops = Vec::new();
        let end = persons_and_vehicle(&order, Cursor { page: 0, y: 70.0 }, &mut ops);

        assert!(ops.contains(&DrawOp::NewPage));
        assert!(lowest_text_y(&ops) >= crate::layout::BOTTOM_LIMIT);
        assert!(end.y >= crate::layout::BOTTOM_LIMIT);
    }

    #[test]
    fn side_by_side_stacks_return_the_max_end_position() {
        // A long left stack (driver present) against a short right stack.
        let mut order = sample_order();
        order.vehicle.remark = None;

        let mut ops = Vec::new();
        let end = persons_and_vehicle(&order, Cursor::start(), &mut ops);
        assert!(end.y < Cursor::start().y - 40.0);
    }
}
