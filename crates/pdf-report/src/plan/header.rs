//! Header and footer directives
//!
//! Both depend on the page they sit on only through the page width, which
//! positions the right-hand header frame.

use crate::assets::AssetLocator;
use crate::constants::*;
use crate::metadata::{FooterSpec, HeaderSpec};
use crate::options::FontSizes;

use super::{
    Alignment, Frame, FrameItem, FooterDirective, HeaderDirective, ImageDirective, ImageSource,
    Inline, Paragraph,
};

/// Build the two header frames for a page `page_width_cm` wide
pub fn build_header(
    spec: &HeaderSpec,
    fonts: &FontSizes,
    page_width_cm: f32,
    locator: &dyn AssetLocator,
) -> HeaderDirective {
    HeaderDirective {
        left: left_frame(spec, fonts, locator),
        right: right_frame(spec, fonts, page_width_cm),
    }
}

/// Logo, title and generation date, top-left
fn left_frame(spec: &HeaderSpec, fonts: &FontSizes, locator: &dyn AssetLocator) -> Frame {
    let mut items = Vec::with_capacity(3);

    let placeholder = Paragraph::text(LOGO_NOT_FOUND, fonts.header_text, Alignment::Left, false);
    match locator.locate(&spec.logo_path) {
        Some(path) => items.push(FrameItem::Image(ImageDirective {
            source: ImageSource::Path(path),
            width_cm: LOGO_WIDTH_CM,
            lock_aspect_ratio: true,
            alignment: Alignment::Left,
            space_before_cm: 0.0,
            fallback: Some(placeholder),
        })),
        None => {
            log::warn!(
                "Logo not found at {}; using placeholder text",
                spec.logo_path.display()
            );
            items.push(FrameItem::Paragraph(placeholder));
        }
    }

    items.push(FrameItem::Paragraph(
        Paragraph::text(spec.title.as_str(), fonts.title, Alignment::Left, true)
            .with_spacing(0.3, 0.3),
    ));
    items.push(FrameItem::Paragraph(
        Paragraph::new(fonts.header_text, Alignment::Left)
            .with_text("Generated on ", true)
            .with_text(spec.generated_date.as_str(), false),
    ));

    Frame {
        left_cm: LEFT_FRAME_LEFT_CM,
        top_cm: LEFT_FRAME_TOP_CM,
        width_cm: LEFT_FRAME_WIDTH_CM,
        height_cm: HEADER_FRAME_HEIGHT_CM,
        items,
    }
}

/// Company, inspector and date range, top-right
fn right_frame(spec: &HeaderSpec, fonts: &FontSizes, page_width_cm: f32) -> Frame {
    let items = vec![
        FrameItem::Paragraph(
            Paragraph::text(spec.company_name.as_str(), fonts.company, Alignment::Right, true)
                .with_spacing(0.0, 0.5),
        ),
        FrameItem::Paragraph(
            Paragraph::text(
                spec.inspector_name.as_str(),
                fonts.header_text,
                Alignment::Right,
                false,
            )
            .with_spacing(0.0, 0.5),
        ),
        FrameItem::Paragraph(Paragraph::text(
            format!("Data from {}", spec.date_range),
            fonts.header_text,
            Alignment::Right,
            false,
        )),
    ];

    Frame {
        left_cm: page_width_cm - RIGHT_FRAME_NOMINAL_WIDTH_CM - RIGHT_FRAME_RIGHT_MARGIN_CM,
        top_cm: RIGHT_FRAME_TOP_CM,
        width_cm: RIGHT_FRAME_WIDTH_CM,
        height_cm: HEADER_FRAME_HEIGHT_CM,
        items,
    }
}

/// Footer paragraphs: optional left text, then right text and page numbers
pub fn build_footer(spec: &FooterSpec, fonts: &FontSizes) -> FooterDirective {
    let mut paragraphs = Vec::new();

    if let Some(left) = spec.left_text.as_deref().filter(|text| !text.is_empty()) {
        paragraphs.push(Paragraph::text(left, fonts.footer, Alignment::Left, false));
    }

    let mut right = Paragraph::new(fonts.footer, Alignment::Right);
    let right_text = spec.right_text.as_deref().filter(|text| !text.is_empty());
    if let Some(text) = right_text {
        right = right.with_text(text, false);
    }
    if spec.show_page_numbers {
        if right_text.is_some() {
            right = right.with_text(" | ", false);
        }
        right = right
            .with_text("Page ", false)
            .with_inline(Inline::PageNumber)
            .with_text(" of ", false)
            .with_inline(Inline::PageCount);
    }
    if !right.inlines.is_empty() {
        paragraphs.push(right);
    }

    FooterDirective { paragraphs }
}
