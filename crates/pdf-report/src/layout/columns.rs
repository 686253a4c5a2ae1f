//! Column width estimation
//!
//! A column is sized from a high percentile of its cell lengths instead of
//! the longest cell, so one outlier row cannot force the whole table wide.
//! The longest word of the header sets a floor so the header never breaks
//! mid-word.

use crate::options::ColumnSizing;
use crate::types::Table;

/// Width (cm) for one column of `data_rows`.
///
/// Rows shorter than `column + 1` cells are skipped. A missing header cell
/// counts as an empty one. The result is always within
/// `[sizing.min_width_cm, sizing.max_width_cm]`.
pub fn percentile_column_width(
    header: &[String],
    data_rows: &[Vec<String>],
    column: usize,
    sizing: &ColumnSizing,
) -> f32 {
    let header_cell = header.get(column).map(String::as_str).unwrap_or("");

    // Longest word in the header cell
    let header_word_len = header_cell
        .split_whitespace()
        .map(|word| word.chars().count())
        .max()
        .unwrap_or(0);

    // Header length plus every data cell present in this column
    let mut lengths = Vec::with_capacity(data_rows.len() + 1);
    lengths.push(header_cell.chars().count());
    lengths.extend(
        data_rows
            .iter()
            .filter_map(|row| row.get(column))
            .map(|cell| cell.chars().count()),
    );

    let percentile_len = nearest_rank(&mut lengths, sizing.percentile);

    let header_word_width = header_word_len as f32 * sizing.char_width_cm;
    let percentile_width = percentile_len as f32 * sizing.char_width_cm;

    header_word_width
        .max(percentile_width)
        .max(sizing.min_width_cm)
        .min(sizing.max_width_cm)
}

/// Widths (cm) for every column of `table`, in column order
pub fn column_widths(table: &Table, sizing: &ColumnSizing) -> Vec<f32> {
    let header = table.header();
    let data_rows = table.data_rows();
    (0..table.column_count())
        .map(|column| percentile_column_width(header, data_rows, column, sizing))
        .collect()
}

/// Nearest-rank percentile: sort ascending and take `floor(p * n)`,
/// clamped to the last element. Returns 0 for an empty slice.
fn nearest_rank(lengths: &mut [usize], percentile: f64) -> usize {
    if lengths.is_empty() {
        return 0;
    }
    lengths.sort_unstable();
    let index = (percentile * lengths.len() as f64).floor() as usize;
    lengths[index.min(lengths.len() - 1)]
}
