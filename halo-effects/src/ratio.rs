//! Ratio-based responsive scaling.
//!
//! Absolute layer values (offset, stroke width, dash pattern) are
//! rebased to fractions of the font size at capture time, then
//! re-expanded for whatever font size the host currently has. Capture
//! is lazy: a config assignment stores raw absolutes, and the first
//! position update divides them by the font size it observes (the
//! size read at assignment time may not yet reflect a pending layout
//! pass). Only reassigning the configuration resets the basis.
//!
//! `HostRatios` is the separate ratio set for the host's *own* paint
//! (strokes, shadows, inner shadows), which scales with the font size
//! independently of the per-layer records.

use halo_core::{TextPrimitive, TextStyle, DEFAULT_FONT_SIZE};

use crate::config::TextEffect;
use crate::pool::EffectPool;

/// Lower clamp applied to the font size before any ratio capture or
/// application, so a zero or negative size never divides by zero.
pub const MIN_RATIO_FONT_SIZE: f32 = 0.01;

pub(crate) fn effective_font_size(font_size: Option<f32>) -> f32 {
    font_size.unwrap_or(DEFAULT_FONT_SIZE).max(MIN_RATIO_FONT_SIZE)
}

/// Per-layer derived state. Holds raw absolutes until the first
/// [`EffectRatios::apply`], ratios afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectRatio {
    pub offset_x: f32,
    pub offset_y: f32,
    pub stroke_width: f32,
    pub dash_pattern: Option<Vec<f32>>,
}

#[derive(Clone, Debug, Default)]
pub struct EffectRatios {
    records: Vec<EffectRatio>,
    initialized: bool,
}

impl EffectRatios {
    /// Capture the absolute values of a freshly assigned effect array.
    /// Resets the ratio basis; the division happens on the next apply.
    pub fn record_absolute_values(&mut self, effects: &[TextEffect]) {
        self.records = effects
            .iter()
            .map(|effect| {
                let offset = effect.offset_value();
                EffectRatio {
                    offset_x: offset.x,
                    offset_y: offset.y,
                    stroke_width: effect.stroke_width(),
                    dash_pattern: effect.dash_pattern().map(<[f32]>::to_vec),
                }
            })
            .collect();
        self.initialized = false;
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.initialized = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn records(&self) -> &[EffectRatio] {
        &self.records
    }

    /// Expand the ratios for the current font size and write the
    /// results into both the pooled layer instances and the host-owned
    /// resolved effect array, then refresh each touched layer's
    /// transforms. Entries with a missing layer or effect counterpart
    /// are skipped.
    pub fn apply<T: TextPrimitive>(
        &mut self,
        font_size: Option<f32>,
        effects: &mut [TextEffect],
        pool: &mut EffectPool<T>,
    ) {
        let font_size = effective_font_size(font_size);

        if !self.initialized {
            for record in &mut self.records {
                record.offset_x /= font_size;
                record.offset_y /= font_size;
                record.stroke_width /= font_size;
                if let Some(dash) = &mut record.dash_pattern {
                    for value in dash {
                        *value /= font_size;
                    }
                }
            }
            self.initialized = true;
            log::debug!("effect ratios captured at font size {font_size}");
        }

        for (index, record) in self.records.iter().enumerate() {
            let Some(layer) = pool.get_mut(index) else { continue };
            let Some(effect) = effects.get_mut(index) else { continue };

            let x = record.offset_x * font_size;
            let y = record.offset_y * font_size;
            let stroke_width = record.stroke_width * font_size;
            let dash_pattern = record
                .dash_pattern
                .as_ref()
                .map(|dash| dash.iter().map(|value| value * font_size).collect::<Vec<_>>());

            let mut style = layer.style().clone();
            style.x = x;
            style.y = y;
            let layer_stroke_styled =
                if let Some(stroke_style) = style.stroke.first_mut().and_then(|s| s.style.as_mut()) {
                    stroke_style.stroke_width = Some(stroke_width);
                    if let Some(dash) = &dash_pattern {
                        stroke_style.dash_pattern = Some(dash.clone());
                    }
                    true
                } else {
                    false
                };
            layer.set_computed_style(style);

            // Mirror into the resolved view so external readers observe
            // the same scaled values the layers carry.
            let offset = effect.offset.get_or_insert_with(Default::default);
            offset.x = Some(x);
            offset.y = Some(y);
            if layer_stroke_styled {
                if let Some(stroke_style) = effect.stroke.as_mut().and_then(|s| s.style.as_mut()) {
                    stroke_style.stroke_width = Some(stroke_width);
                    if let Some(dash) = dash_pattern {
                        stroke_style.dash_pattern = Some(dash);
                    }
                }
            }

            layer.refresh_local_transform();
            layer.refresh_world_transform();
        }
    }
}

// -------------------------------------------------------------------
// Host self-scaling ratios
// -------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeRatio {
    pub width: f32,
    pub dash_pattern: Vec<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShadowRatio {
    pub x: f32,
    pub y: f32,
    pub blur: f32,
    pub spread: f32,
}

/// Ratio set for the host's own strokes and shadows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostRatios {
    pub stroke: Vec<StrokeRatio>,
    pub shadow: Vec<ShadowRatio>,
    pub inner_shadow: Vec<ShadowRatio>,
}

impl HostRatios {
    pub fn collect(style: &TextStyle) -> Self {
        let font_size = effective_font_size(style.font_size);
        // An absent width keeps a unit ratio; the apply side only
        // writes fields the style actually carries.
        let ratio = |value: Option<f32>| value.map(|v| v / font_size).unwrap_or(1.0);
        let list_ratio = |values: Option<&Vec<f32>>| -> Vec<f32> {
            values
                .map(|list| list.iter().map(|v| v / font_size).collect())
                .unwrap_or_default()
        };
        let shadow_ratio = |shadow: &halo_core::Shadow| ShadowRatio {
            x: shadow.x / font_size,
            y: shadow.y / font_size,
            blur: shadow.blur / font_size,
            spread: shadow.spread / font_size,
        };

        Self {
            stroke: style
                .stroke
                .iter()
                .map(|item| {
                    let item_style = item.style.as_ref();
                    StrokeRatio {
                        width: ratio(
                            item_style
                                .and_then(|s| s.stroke_width)
                                .or(style.stroke_width),
                        ),
                        dash_pattern: list_ratio(
                            item_style
                                .and_then(|s| s.dash_pattern.as_ref())
                                .or(style.dash_pattern.as_ref()),
                        ),
                    }
                })
                .collect(),
            shadow: style.shadow.iter().map(shadow_ratio).collect(),
            inner_shadow: style.inner_shadow.iter().map(shadow_ratio).collect(),
        }
    }

    /// Re-derive the host's own absolutes for its current font size.
    /// Only fields the style actually carries are written. Returns the
    /// updated style, or `None` when nothing applied.
    pub fn apply(&self, style: &TextStyle) -> Option<TextStyle> {
        let font_size = effective_font_size(style.font_size);
        let mut next = style.clone();
        let mut touched = false;

        for (item, ratio) in next.stroke.iter_mut().zip(&self.stroke) {
            if let Some(item_style) = item.style.as_mut() {
                if item_style.stroke_width.is_some() {
                    item_style.stroke_width = Some(ratio.width * font_size);
                    touched = true;
                }
                if let Some(dash) = item_style.dash_pattern.as_mut() {
                    if !dash.is_empty() {
                        *dash = ratio.dash_pattern.iter().map(|v| v * font_size).collect();
                        touched = true;
                    }
                }
            }
        }
        if let Some(first) = self.stroke.first() {
            if next.stroke_width.is_some() {
                next.stroke_width = Some(first.width * font_size);
                touched = true;
            }
            if let Some(dash) = next.dash_pattern.as_mut() {
                if !dash.is_empty() {
                    *dash = first.dash_pattern.iter().map(|v| v * font_size).collect();
                    touched = true;
                }
            }
        }

        for (shadow, ratio) in next.shadow.iter_mut().zip(&self.shadow) {
            shadow.x = ratio.x * font_size;
            shadow.y = ratio.y * font_size;
            shadow.blur = ratio.blur * font_size;
            shadow.spread = ratio.spread * font_size;
            touched = true;
        }
        for (shadow, ratio) in next.inner_shadow.iter_mut().zip(&self.inner_shadow) {
            shadow.x = ratio.x * font_size;
            shadow.y = ratio.y * font_size;
            shadow.blur = ratio.blur * font_size;
            shadow.spread = ratio.spread * font_size;
            touched = true;
        }

        touched.then_some(next)
    }
}

// ===================================================================
// Tests
// ===================================================================
