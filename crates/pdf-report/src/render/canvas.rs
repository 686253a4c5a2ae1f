//! Drawing primitives over printpdf operations
//!
//! Callers position everything in centimeters from the page's top-left
//! corner; the canvas flips to PDF's bottom-left origin.

use crate::constants::{LINE_HEIGHT_FACTOR, cm_to_pt, pt_to_cm};
use crate::plan::{Alignment, BorderColor, Inline, Paragraph};
use crate::text::{text_width_pt, wrap_text};
use printpdf::*;

/// An image registered with the document, ready to place
#[derive(Debug, Clone)]
pub struct PlacedImage {
    pub id: XObjectId,
    pub width_px: usize,
    pub height_px: usize,
}

impl PlacedImage {
    /// Height that keeps the aspect ratio at `width_cm`
    pub fn height_for_width(&self, width_cm: f32) -> f32 {
        if self.width_px == 0 {
            return 0.0;
        }
        width_cm * self.height_px as f32 / self.width_px as f32
    }
}

pub struct Canvas {
    page_height_cm: f32,
    ops: Vec<Op>,
}

impl Canvas {
    pub fn new(page_height_cm: f32) -> Self {
        Self {
            page_height_cm,
            ops: Vec::new(),
        }
    }

    pub fn into_ops(self) -> Vec<Op> {
        self.ops
    }

    fn point(&self, x_cm: f32, top_cm: f32) -> Point {
        Point {
            x: Pt(cm_to_pt(x_cm)),
            y: Pt(cm_to_pt(self.page_height_cm - top_cm)),
        }
    }

    /// Draw one line of text with its baseline `baseline_cm` from the top
    pub fn text(&mut self, x_cm: f32, baseline_cm: f32, text: &str, font_size: f32, bold: bool) {
        if text.is_empty() {
            return;
        }
        let pos = self.point(x_cm, baseline_cm);
        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor { pos });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            font: builtin_font(bold),
            size: Pt(font_size),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font: builtin_font(bold),
        });
        self.ops.push(Op::EndTextSection);
    }

    /// Horizontal rule at `y_cm` from the top
    pub fn hline(&mut self, x1_cm: f32, x2_cm: f32, y_cm: f32, thickness_pt: f32, color: BorderColor) {
        if thickness_pt <= 0.0 {
            return;
        }
        let grey = match color {
            BorderColor::Black => 0.0,
            BorderColor::Gray => 0.5,
        };
        let start = self.point(x1_cm, y_cm);
        let end = self.point(x2_cm, y_cm);
        self.ops.push(Op::SaveGraphicsState);
        self.ops.push(Op::SetOutlineColor {
            col: Color::Rgb(Rgb {
                r: grey,
                g: grey,
                b: grey,
                icc_profile: None,
            }),
        });
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(thickness_pt),
        });
        self.ops.push(Op::DrawLine {
            line: Line {
                points: vec![
                    LinePoint {
                        p: start,
                        bezier: false,
                    },
                    LinePoint {
                        p: end,
                        bezier: false,
                    },
                ],
                is_closed: false,
            },
        });
        self.ops.push(Op::RestoreGraphicsState);
    }

    /// Place an image with its top-left corner at (`x_cm`, `top_cm`)
    pub fn image(&mut self, image: &PlacedImage, x_cm: f32, top_cm: f32, width_cm: f32, height_cm: f32) {
        if image.width_px == 0 || image.height_px == 0 {
            return;
        }
        // At 72 dpi one pixel is one point before scaling
        let scale_x = cm_to_pt(width_cm) / image.width_px as f32;
        let scale_y = cm_to_pt(height_cm) / image.height_px as f32;
        let origin = self.point(x_cm, top_cm + height_cm);
        self.ops.push(Op::UseXobject {
            id: image.id.clone(),
            transform: XObjectTransform {
                translate_x: Some(origin.x),
                translate_y: Some(origin.y),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(72.0),
                ..Default::default()
            },
        });
    }

    /// Draw a paragraph inside a box and return the height it used.
    ///
    /// Paragraphs whose runs mix bold and regular text are drawn on a
    /// single line; uniform paragraphs wrap to `width_cm`.
    pub fn paragraph(
        &mut self,
        paragraph: &Paragraph,
        left_cm: f32,
        top_cm: f32,
        width_cm: f32,
        page: usize,
        total: usize,
    ) -> f32 {
        let size = paragraph.font_size;
        let line_cm = line_height_cm(size);
        let mut y = top_cm + paragraph.space_before_cm;

        let runs = resolve_runs(paragraph, page, total);
        let mixed = runs.windows(2).any(|pair| pair[0].1 != pair[1].1);

        if mixed {
            let total_width = pt_to_cm(
                runs.iter()
                    .map(|(text, bold)| text_width_pt(text, size, *bold))
                    .sum(),
            );
            let mut x = aligned_x(paragraph.alignment, left_cm, width_cm, total_width);
            let baseline = y + size_cm(size);
            for (text, bold) in &runs {
                self.text(x, baseline, text, size, *bold);
                x += pt_to_cm(text_width_pt(text, size, *bold));
            }
            y += line_cm;
        } else {
            let bold = runs.first().is_some_and(|(_, bold)| *bold);
            let text: String = runs.iter().map(|(text, _)| text.as_str()).collect();
            for line in wrap_text(&text, cm_to_pt(width_cm), size, bold) {
                let line_width = pt_to_cm(text_width_pt(&line, size, bold));
                let x = aligned_x(paragraph.alignment, left_cm, width_cm, line_width);
                self.text(x, y + size_cm(size), &line, size, bold);
                y += line_cm;
            }
        }

        y + paragraph.space_after_cm - top_cm
    }
}

fn builtin_font(bold: bool) -> BuiltinFont {
    if bold {
        BuiltinFont::HelveticaBold
    } else {
        BuiltinFont::Helvetica
    }
}

/// Height of one line of text (cm)
pub fn line_height_cm(font_size: f32) -> f32 {
    pt_to_cm(font_size * LINE_HEIGHT_FACTOR)
}

fn size_cm(font_size: f32) -> f32 {
    pt_to_cm(font_size)
}

fn resolve_runs(paragraph: &Paragraph, page: usize, total: usize) -> Vec<(String, bool)> {
    paragraph
        .inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text { text, bold } => (text.clone(), *bold),
            Inline::PageNumber => (page.to_string(), false),
            Inline::PageCount => (total.to_string(), false),
        })
        .collect()
}

fn aligned_x(alignment: Alignment, left_cm: f32, width_cm: f32, content_cm: f32) -> f32 {
    match alignment {
        Alignment::Left => left_cm,
        Alignment::Center => left_cm + (width_cm - content_cm) / 2.0,
        Alignment::Right => left_cm + width_cm - content_cm,
    }
}
