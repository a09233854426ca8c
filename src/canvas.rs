//! Canvas capability boundary and the PDF backend.
//!
//! Composers only produce [`DrawOp`] lists; a [`Canvas`] turns them into the
//! final byte stream. [`PdfCanvas`] is the printpdf-backed implementation:
//! A4 pages, one embedded Unicode font for all text, ttf-parser metrics for
//! center/right alignment.

use printpdf::path::PaintMode;
use printpdf::{
    Color, IndirectFontRef, LineDashPattern, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};

use crate::error::ReportError;
use crate::layout::{Align, DrawOp, Stroke, Tint, BLACK, PAGE_H, PAGE_W};

pub trait Canvas {
    fn new_page(&mut self);
    fn draw_text(&mut self, x: f32, y: f32, size: f32, bold: bool, color: Tint, align: Align, text: &str);
    fn draw_rect(&mut self, x: f32, y_top: f32, w: f32, h: f32, fill: Option<Tint>, stroke: Option<Stroke>, dashed: bool);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Tint);
    /// Scale-to-fit into the box; undecodable bytes are logged and skipped so
    /// the placeholder drawn underneath stays visible.
    fn draw_image(&mut self, data: &[u8], x: f32, y_top: f32, w: f32, h: f32);
    fn measure_text(&self, text: &str, size: f32) -> f32;
    fn finish(self) -> Result<Vec<u8>, ReportError>
    where
        Self: Sized;
}

/// Run a composed command list against a canvas and return the final bytes.
pub fn execute<C: Canvas>(ops: &[DrawOp], mut canvas: C) -> Result<Vec<u8>, ReportError> {
    for op in ops {
        match op {
            DrawOp::NewPage => canvas.new_page(),
            DrawOp::Text { x, y, size, bold, color, align, text } => {
                canvas.draw_text(*x, *y, *size, *bold, *color, *align, text)
            }
            DrawOp::Rect { x, y_top, w, h, fill, stroke, dashed } => {
                canvas.draw_rect(*x, *y_top, *w, *h, *fill, *stroke, *dashed)
            }
            DrawOp::Line { x1, y1, x2, y2, thickness, color } => {
                canvas.draw_line(*x1, *y1, *x2, *y2, *thickness, *color)
            }
            DrawOp::Image { data, x, y_top, w, h } => canvas.draw_image(data, *x, *y_top, *w, *h),
        }
    }
    canvas.finish()
}

const IMAGE_DPI: f32 = 300.0;

pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bytes: Vec<u8>,
}

impl PdfCanvas {
    /// A4 document with one embedded TTF used for all text (regular and
    /// bold), so Unicode rendering stays consistent.
    pub fn new(title: &str, font_bytes: Vec<u8>) -> Result<Self, ReportError> {
        // Validate the face up front; measurement re-parses on demand.
        ttf_parser::Face::parse(&font_bytes, 0)
            .map_err(|e| ReportError::Encode(format!("font not parseable: {e}")))?;

        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let font = doc
            .add_external_font(std::io::Cursor::new(font_bytes.as_slice()))
            .map_err(|e| ReportError::Encode(e.to_string()))?;

        Ok(Self { doc, layer, font, font_bytes })
    }

    pub fn from_font_file(title: &str, font_path: &std::path::Path) -> Result<Self, ReportError> {
        let bytes = std::fs::read(font_path)
            .map_err(|e| ReportError::Encode(format!("font {}: {e}", font_path.display())))?;
        Self::new(title, bytes)
    }

    fn color(tint: Tint) -> Color {
        Color::Rgb(Rgb::new(tint.r, tint.g, tint.b, None))
    }

    fn text_width_mm(&self, text: &str, font_size_pt: f32) -> f32 {
        // PDF font sizes are in points; coordinates are in millimeters.
        const PT_TO_MM: f32 = 25.4 / 72.0;
        let Ok(face) = ttf_parser::Face::parse(&self.font_bytes, 0) else {
            // Pragmatic estimate, good enough for placement.
            return text.chars().count() as f32 * font_size_pt * 0.42;
        };
        let units_per_em = face.units_per_em() as f32;
        if units_per_em <= 0.0 {
            return 0.0;
        }

        let mut width_units: i32 = 0;
        for ch in text.chars() {
            let Some(gid) = face.glyph_index(ch) else {
                continue;
            };
            width_units += face.glyph_hor_advance(gid).unwrap_or(0) as i32;
        }

        (width_units as f32 / units_per_em) * font_size_pt * PT_TO_MM
    }

    fn dash_pattern(on: bool) -> LineDashPattern {
        if on {
            LineDashPattern {
                dash_1: Some(2),
                gap_1: Some(2),
                ..Default::default()
            }
        } else {
            LineDashPattern::default()
        }
    }
}

impl Canvas for PdfCanvas {
    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    fn draw_text(&mut self, x: f32, y: f32, size: f32, _bold: bool, color: Tint, align: Align, text: &str) {
        let x = match align {
            Align::Left => x,
            Align::Center => (x - self.text_width_mm(text, size) / 2.0).max(0.0),
            Align::Right => (x - self.text_width_mm(text, size)).max(0.0),
        };
        self.layer.set_fill_color(Self::color(color));
        self.layer.use_text(text, size, Mm(x), Mm(y), &self.font);
        self.layer.set_fill_color(Self::color(BLACK));
    }

    fn draw_rect(&mut self, x: f32, y_top: f32, w: f32, h: f32, fill: Option<Tint>, stroke: Option<Stroke>, dashed: bool) {
        let mode = match (&fill, &stroke) {
            (Some(_), Some(_)) => PaintMode::FillStroke,
            (Some(_), None) => PaintMode::Fill,
            _ => PaintMode::Stroke,
        };

        if let Some(tint) = fill {
            self.layer.set_fill_color(Self::color(tint));
        }
        if let Some(s) = stroke {
            self.layer.set_outline_color(Self::color(s.color));
            self.layer.set_outline_thickness(s.thickness);
        }
        self.layer.set_line_dash_pattern(Self::dash_pattern(dashed));

        let rect = Rect::new(Mm(x), Mm(y_top - h), Mm(x + w), Mm(y_top)).with_mode(mode);
        self.layer.add_rect(rect);

        self.layer.set_line_dash_pattern(Self::dash_pattern(false));
        self.layer.set_fill_color(Self::color(BLACK));
        self.layer.set_outline_color(Self::color(BLACK));
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Tint) {
        self.layer.set_outline_color(Self::color(color));
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(printpdf::Line {
            points: vec![
                (printpdf::Point::new(Mm(x1), Mm(y1)), false),
                (printpdf::Point::new(Mm(x2), Mm(y2)), false),
            ],
            is_closed: false,
        });
        self.layer.set_outline_color(Self::color(BLACK));
    }

    fn draw_image(&mut self, data: &[u8], x: f32, y_top: f32, w: f32, h: f32) {
        let img = match printpdf::image_crate::load_from_memory(data) {
            Ok(img) => img,
            Err(e) => {
                log::warn!("image bytes not decodable, keeping placeholder: {e}");
                return;
            }
        };

        let px_w = img.width().max(1) as f32;
        let px_h = img.height().max(1) as f32;
        let natural_w_mm = px_w / IMAGE_DPI * 25.4;
        let natural_h_mm = px_h / IMAGE_DPI * 25.4;

        let scale = (w / natural_w_mm).min(h / natural_h_mm).max(0.01);
        let scaled_w = natural_w_mm * scale;
        let scaled_h = natural_h_mm * scale;

        // Center the scaled image inside the target box.
        let img_x = x + (w - scaled_w) / 2.0;
        let img_bottom_y = y_top - h + (h - scaled_h) / 2.0;

        let image = printpdf::Image::from_dynamic_image(&img);
        image.add_to_layer(
            self.layer.clone(),
            printpdf::ImageTransform {
                translate_x: Some(Mm(img_x)),
                translate_y: Some(Mm(img_bottom_y)),
                rotate: None,
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(IMAGE_DPI),
            },
        );
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        self.text_width_mm(text, size)
    }

    fn finish(self) -> Result<Vec<u8>, ReportError> {
        let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| ReportError::Encode(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| ReportError::Encode(e.to_string()))
    }
}
