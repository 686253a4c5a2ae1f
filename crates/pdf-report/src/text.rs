//! Soft breaks and text measurement helpers

use crate::constants::{HELVETICA_BOLD_CHAR_WIDTH_RATIO, HELVETICA_CHAR_WIDTH_RATIO, SOFT_BREAK};

/// Insert a zero-width break before every character whose index is a
/// positive multiple of `interval`.
///
/// Strings shorter than `interval` come back unchanged, as does anything
/// when `interval` is zero.
pub fn insert_soft_breaks(input: &str, interval: usize) -> String {
    if interval == 0 || input.chars().count() < interval {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len() + input.len() / interval * 3);
    for (i, c) in input.chars().enumerate() {
        if i > 0 && i % interval == 0 {
            out.push(SOFT_BREAK);
        }
        out.push(c);
    }
    out
}

/// Remove soft breaks, recovering the original text
pub fn strip_soft_breaks(input: &str) -> String {
    input.chars().filter(|c| *c != SOFT_BREAK).collect()
}

/// Approximate rendered width of `text` in points
pub fn text_width_pt(text: &str, font_size_pt: f32, bold: bool) -> f32 {
    let ratio = if bold {
        HELVETICA_BOLD_CHAR_WIDTH_RATIO
    } else {
        HELVETICA_CHAR_WIDTH_RATIO
    };
    let visible = text.chars().filter(|c| *c != SOFT_BREAK).count();
    visible as f32 * font_size_pt * ratio
}

/// Greedy line wrapping at spaces and soft breaks.
///
/// Segments that still do not fit on their own are cut at character
/// boundaries. The returned lines never contain soft breaks.
pub fn wrap_text(text: &str, max_width_pt: f32, font_size_pt: f32, bold: bool) -> Vec<String> {
    let fits = |s: &str| text_width_pt(s.trim_end(), font_size_pt, bold) <= max_width_pt;

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for segment in split_keeping_spaces(paragraph) {
            let candidate = format!("{}{}", current, segment);
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            if !current.trim().is_empty() {
                lines.push(current.trim_end().to_string());
            }
            current = segment.trim_start().to_string();
            while !fits(&current) && current.chars().count() > 1 {
                let (head, tail) = split_to_fit(&current, max_width_pt, font_size_pt, bold);
                lines.push(head);
                current = tail;
            }
        }
        lines.push(current.trim_end().to_string());
    }
    lines
}

/// Split into wrap segments: each segment ends after a space or right
/// before a soft break. Soft breaks are dropped.
fn split_keeping_spaces(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c == SOFT_BREAK {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(c);
        if c == ' ' {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn split_to_fit(text: &str, max_width_pt: f32, font_size_pt: f32, bold: bool) -> (String, String) {
    let mut head = String::new();
    let mut chars = text.chars();
    for c in chars.by_ref() {
        head.push(c);
        if text_width_pt(&head, font_size_pt, bold) > max_width_pt && head.chars().count() > 1 {
            head.pop();
            let mut tail = String::from(c);
            tail.extend(chars);
            return (head, tail);
        }
    }
    (head, String::new())
}
