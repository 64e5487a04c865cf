//! Rebasing helpers for fixed-size previews.
//!
//! An editor that shows a constant-size preview of styled text needs
//! the effect configuration and the style's own strokes/shadows
//! re-expressed for a different font size while keeping proportions.
//! Both helpers return new values; inputs are never mutated.

use halo_core::{Shadow, Stroke, TextStyle, DEFAULT_FONT_SIZE};

use crate::config::{sub_enabled, TextEffect};
use crate::ratio::MIN_RATIO_FONT_SIZE;

fn scale_stroke(stroke: &mut Stroke, scale: f32) {
    if let Some(style) = stroke.style.as_mut() {
        if let Some(width) = style.stroke_width.as_mut() {
            *width *= scale;
        }
        if let Some(dash) = style.dash_pattern.as_mut() {
            for value in dash {
                *value *= scale;
            }
        }
    }
}

fn scale_shadow(shadow: &mut Shadow, scale: f32) {
    shadow.x *= scale;
    shadow.y *= scale;
    shadow.blur *= scale;
    shadow.spread *= scale;
}

/// Rebase an effect array from one font size to another. Visible
/// offsets, stroke widths, and dash patterns scale by
/// `target / source`; everything else is copied through.
pub fn normalize_text_effects(
    effects: &[TextEffect],
    source_font_size: f32,
    target_font_size: f32,
) -> Vec<TextEffect> {
    if effects.is_empty() || source_font_size == target_font_size {
        return effects.to_vec();
    }
    let scale = target_font_size / source_font_size.max(MIN_RATIO_FONT_SIZE);

    effects
        .iter()
        .cloned()
        .map(|mut effect| {
            if let Some(offset) = effect.offset.as_mut() {
                if sub_enabled(offset.visible) {
                    offset.x = Some(offset.x.unwrap_or(0.0) * scale);
                    offset.y = Some(offset.y.unwrap_or(0.0) * scale);
                }
            }
            if let Some(stroke) = effect.stroke.as_mut() {
                scale_stroke(stroke, scale);
            }
            effect
        })
        .collect()
}

/// Rebase a style's own strokes, dash patterns, and shadows to a target
/// font size. The source size is the style's own font size (default
/// when absent); the font size itself is left for the caller to set on
/// the preview copy.
pub fn normalize_text_style(style: &TextStyle, target_font_size: f32) -> TextStyle {
    let source = style.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    if source == target_font_size {
        return style.clone();
    }
    let scale = target_font_size / source.max(MIN_RATIO_FONT_SIZE);

    let mut next = style.clone();
    for stroke in &mut next.stroke {
        scale_stroke(stroke, scale);
    }
    if let Some(width) = next.stroke_width.as_mut() {
        *width *= scale;
    }
    if let Some(dash) = next.dash_pattern.as_mut() {
        for value in dash {
            *value *= scale;
        }
    }
    for shadow in &mut next.shadow {
        scale_shadow(shadow, scale);
    }
    for shadow in &mut next.inner_shadow {
        scale_shadow(shadow, scale);
    }
    next
}

// ===================================================================
// Tests
// ===================================================================
