//! Layout plan data types
//!
//! A plan is plain data: page geometry plus the ordered directives a
//! renderer needs to paint each section. It is built once and handed to
//! the renderer as a single value.

use crate::layout::PageGeometry;
use crate::metadata::{FooterSpec, HeaderSpec};
use std::path::PathBuf;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Horizontal alignment of a paragraph or image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A piece of paragraph content
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Inline {
    Text { text: String, bold: bool },
    /// Number of the page being drawn
    PageNumber,
    /// Total pages in the document
    PageCount,
}

/// One paragraph of text
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Paragraph {
    pub inlines: Vec<Inline>,
    pub font_size: f32,
    pub alignment: Alignment,
    pub space_before_cm: f32,
    pub space_after_cm: f32,
}

impl Paragraph {
    pub fn new(font_size: f32, alignment: Alignment) -> Self {
        Self {
            inlines: Vec::new(),
            font_size,
            alignment,
            space_before_cm: 0.0,
            space_after_cm: 0.0,
        }
    }

    /// Single-run paragraph
    pub fn text(text: impl Into<String>, font_size: f32, alignment: Alignment, bold: bool) -> Self {
        Self::new(font_size, alignment).with_text(text, bold)
    }

    pub fn with_text(mut self, text: impl Into<String>, bold: bool) -> Self {
        self.inlines.push(Inline::Text {
            text: text.into(),
            bold,
        });
        self
    }

    pub fn with_inline(mut self, inline: Inline) -> Self {
        self.inlines.push(inline);
        self
    }

    pub fn with_spacing(mut self, before_cm: f32, after_cm: f32) -> Self {
        self.space_before_cm = before_cm;
        self.space_after_cm = after_cm;
        self
    }

    /// Whether every text run is bold
    pub fn is_bold(&self) -> bool {
        let mut runs = self.inlines.iter().filter_map(|inline| match inline {
            Inline::Text { bold, .. } => Some(*bold),
            _ => None,
        });
        runs.next().is_some_and(|first| first && runs.all(|bold| bold))
    }

    /// Text with page fields filled in
    pub fn resolve(&self, page: usize, total: usize) -> String {
        self.inlines
            .iter()
            .map(|inline| match inline {
                Inline::Text { text, .. } => text.clone(),
                Inline::PageNumber => page.to_string(),
                Inline::PageCount => total.to_string(),
            })
            .collect()
    }
}

/// Where an image's bytes come from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ImageSource {
    /// A file the renderer reads itself
    Path(PathBuf),
    /// Bytes already in memory (the uploaded image)
    Embedded(#[cfg_attr(feature = "serde", serde(serialize_with = "byte_count"))] Arc<[u8]>),
}

#[cfg(feature = "serde")]
fn byte_count<S: Serializer>(bytes: &Arc<[u8]>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{} bytes", bytes.len()))
}

/// Place an image at a fixed width
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ImageDirective {
    pub source: ImageSource,
    pub width_cm: f32,
    /// Height follows the image's aspect ratio
    pub lock_aspect_ratio: bool,
    pub alignment: Alignment,
    pub space_before_cm: f32,
    /// Drawn instead when the image cannot be loaded at render time
    pub fallback: Option<Paragraph>,
}

/// Content of a header frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FrameItem {
    Paragraph(Paragraph),
    Image(ImageDirective),
}

/// An absolutely positioned box, measured from the page's top-left corner
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Frame {
    pub left_cm: f32,
    pub top_cm: f32,
    pub width_cm: f32,
    pub height_cm: f32,
    pub items: Vec<FrameItem>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HeaderDirective {
    pub left: Frame,
    pub right: Frame,
}

/// Footer paragraphs, drawn in the bottom margin
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FooterDirective {
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum BorderColor {
    Black,
    Gray,
}

/// Formatting shared by every cell of a row
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RowStyle {
    pub font_size: f32,
    pub bold: bool,
    pub alignment: Alignment,
    pub space_before_cm: f32,
    pub space_after_cm: f32,
    pub bottom_border_pt: f32,
    pub border_color: BorderColor,
}

/// A table with fixed column widths. Cell text already carries soft breaks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TableDirective {
    pub column_widths_cm: Vec<f32>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub header_style: RowStyle,
    pub body_style: RowStyle,
    /// Outer border width (points)
    pub border_width_pt: f32,
    /// Repeat the header row at the top of every page
    pub repeat_header: bool,
}

impl TableDirective {
    pub fn width_cm(&self) -> f32 {
        self.column_widths_cm.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum SectionBody {
    Image(ImageDirective),
    Table(TableDirective),
}

/// One report section: pages sharing geometry, header and footer
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PageSection {
    pub geometry: PageGeometry,
    pub header: HeaderDirective,
    pub footer: FooterDirective,
    pub body: SectionBody,
}

/// Everything a renderer needs to produce the report
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LayoutPlan {
    pub header: HeaderSpec,
    pub footer: FooterSpec,
    pub image_page: PageSection,
    pub table_page: PageSection,
}

impl LayoutPlan {
    pub fn file_name(&self) -> String {
        self.header.file_name()
    }

    pub fn sections(&self) -> [&PageSection; 2] {
        [&self.image_page, &self.table_page]
    }

    /// The table directive of the table section
    pub fn table(&self) -> Option<&TableDirective> {
        match &self.table_page.body {
            SectionBody::Table(table) => Some(table),
            SectionBody::Image(_) => None,
        }
    }
}
