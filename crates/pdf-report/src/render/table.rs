//! Table row layout and pagination

use crate::constants::{cm_to_pt, pt_to_cm};
use crate::plan::{Alignment, RowStyle, TableDirective};
use crate::text::{text_width_pt, wrap_text};
use std::ops::Range;

use super::canvas::{Canvas, line_height_cm};

/// Horizontal padding inside each cell (cm)
const CELL_PADDING_CM: f32 = 0.12;

/// A row with its cells already wrapped into lines
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub cells: Vec<Vec<String>>,
    pub height_cm: f32,
}

/// Wrap every cell of `cells` to its column and measure the row
pub fn layout_row(cells: &[String], widths_cm: &[f32], style: &RowStyle) -> RowLayout {
    let wrapped: Vec<Vec<String>> = widths_cm
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let text = cells.get(i).map(String::as_str).unwrap_or("");
            let inner = (width - 2.0 * CELL_PADDING_CM).max(0.1);
            wrap_text(text, cm_to_pt(inner), style.font_size, style.bold)
        })
        .collect();

    let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
    RowLayout {
        cells: wrapped,
        height_cm: style.space_before_cm
            + lines as f32 * line_height_cm(style.font_size)
            + style.space_after_cm,
    }
}

/// Split rows into pages of at most `available_cm` each, counting a
/// repeated header of `header_cm` on every page.
///
/// A row taller than a whole page still gets a page of its own. An empty
/// table yields a single empty page so the header row is still drawn.
pub fn paginate(header_cm: f32, row_heights_cm: &[f32], available_cm: f32) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut used = header_cm;

    for (i, height) in row_heights_cm.iter().enumerate() {
        if i > start && used + height > available_cm {
            pages.push(start..i);
            start = i;
            used = header_cm;
        }
        used += height;
    }
    pages.push(start..row_heights_cm.len());
    pages
}

/// Draw `row` with its top edge at `top_cm` and return the row height
pub fn draw_row(
    canvas: &mut Canvas,
    row: &RowLayout,
    widths_cm: &[f32],
    left_cm: f32,
    top_cm: f32,
    style: &RowStyle,
) -> f32 {
    let line_cm = line_height_cm(style.font_size);
    let baseline_offset = pt_to_cm(style.font_size);
    let mut x = left_cm;

    for (lines, width) in row.cells.iter().zip(widths_cm) {
        let inner = (width - 2.0 * CELL_PADDING_CM).max(0.1);
        let mut y = top_cm + style.space_before_cm + baseline_offset;
        for line in lines {
            let line_width = pt_to_cm(text_width_pt(line, style.font_size, style.bold));
            let line_x = match style.alignment {
                Alignment::Left => x + CELL_PADDING_CM,
                Alignment::Center => x + CELL_PADDING_CM + (inner - line_width) / 2.0,
                Alignment::Right => x + CELL_PADDING_CM + inner - line_width,
            };
            canvas.text(line_x, y, line, style.font_size, style.bold);
            y += line_cm;
        }
        canvas.hline(
            x,
            x + width,
            top_cm + row.height_cm,
            style.bottom_border_pt,
            style.border_color,
        );
        x += width;
    }

    row.height_cm
}

/// Lay out every body row of `table`
pub fn layout_body(table: &TableDirective) -> Vec<RowLayout> {
    table
        .rows
        .iter()
        .map(|row| layout_row(row, &table.column_widths_cm, &table.body_style))
        .collect()
}
