//! Minimal draw-data service: content + style → positioned row boxes.
//!
//! This stands in for a full shaping/layout engine, which the render
//! contract treats as an opaque collaborator. Rows are split on
//! newlines, positioned by line height, and measured with a coarse
//! per-character advance; shaping correctness is out of scope.

use crate::geometry::Bounds;
use crate::style::{TextAlign, TextStyle};

/// Fraction of the font size used as the per-character advance.
const ADVANCE_RATIO: f32 = 0.6;

/// Fraction of the font size from the row top to the baseline.
const ASCENT_RATIO: f32 = 0.8;

#[derive(Clone, Debug, PartialEq)]
pub struct TextRow {
    pub text: String,
    /// Left edge in text-local coordinates.
    pub x: f32,
    /// Baseline position.
    pub y: f32,
    pub width: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawData {
    pub rows: Vec<TextRow>,
    /// Content box in text-local coordinates.
    pub bounds: Bounds,
}

/// Lay out the style's content into rows.
pub fn compute(style: &TextStyle) -> DrawData {
    let font_size = style.font_size_or_default();
    let line_height = style.line_height.unwrap_or(font_size * 1.2);
    let letter_spacing = style.letter_spacing.unwrap_or(0.0);
    let advance = font_size * ADVANCE_RATIO + letter_spacing;

    let mut rows = Vec::new();
    let mut max_width = 0f32;
    for (index, line) in style.text.lines().enumerate() {
        let text = line.trim_end_matches(' ');
        let width = text.chars().count() as f32 * advance;
        max_width = max_width.max(width);
        rows.push(TextRow {
            text: text.to_string(),
            x: 0.0,
            y: index as f32 * line_height + font_size * ASCENT_RATIO,
            width,
        });
    }

    for row in &mut rows {
        row.x = match style.text_align {
            TextAlign::Left => 0.0,
            TextAlign::Center => (max_width - row.width) / 2.0,
            TextAlign::Right => max_width - row.width,
        };
    }

    DrawData {
        bounds: Bounds::new(0.0, 0.0, max_width, rows.len() as f32 * line_height),
        rows,
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn style_with(text: &str) -> TextStyle {
        TextStyle {
            text: text.to_string(),
            font_size: Some(10.0),
            ..TextStyle::default()
        }
    }

    #[test]
    fn test_empty_text_has_no_rows() {
        let data = compute(&style_with(""));
        assert!(data.rows.is_empty());
        assert_eq!(data.bounds.width, 0.0);
    }

    #[test]
    fn test_rows_advance_by_line_height() {
        let mut style = style_with("one\ntwo");
        style.line_height = Some(14.0);
        let data = compute(&style);
        assert_eq!(data.rows.len(), 2);
        assert!((data.rows[1].y - data.rows[0].y - 14.0).abs() < f32::EPSILON);
        assert_eq!(data.bounds.height, 28.0);
    }

    #[test]
    fn test_trailing_spaces_trimmed() {
        let data = compute(&style_with("hi   "));
        assert_eq!(data.rows[0].text, "hi");
        let untrimmed = compute(&style_with("hi"));
        assert_eq!(data.rows[0].width, untrimmed.rows[0].width);
    }

    #[test]
    fn test_right_align_offsets_short_rows() {
        let mut style = style_with("wide line\nhi");
        style.text_align = TextAlign::Right;
        let data = compute(&style);
        assert_eq!(data.rows[0].x, 0.0);
        assert!(data.rows[1].x > 0.0);
    }
}
