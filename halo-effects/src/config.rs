//! Effect configuration: the per-layer spec entries and their
//! visibility-aware accessors.
//!
//! A sub-object with `visible: Some(false)` counts as absent, so offsets
//! degrade to zero and stroke widths to zero. Nothing here errors;
//! malformed or missing fields resolve to neutral defaults.

use halo_core::{Paint, PaintFilter, Point, Stroke};
use serde::{Deserialize, Serialize};

/// Positional offset of one effect layer relative to its host.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectOffset {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub visible: Option<bool>,
}

/// One entry of the effect configuration array. Order is z-order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextEffect {
    pub visible: Option<bool>,
    pub offset: Option<EffectOffset>,
    pub stroke: Option<Stroke>,
    pub fill: Option<Paint>,
    pub filter: Option<PaintFilter>,
}

pub(crate) fn sub_enabled(visible: Option<bool>) -> bool {
    visible != Some(false)
}

impl TextEffect {
    pub fn is_enabled(&self) -> bool {
        sub_enabled(self.visible)
    }

    /// Offset with visibility applied; absent or disabled → zero.
    pub fn offset_value(&self) -> Point {
        match &self.offset {
            Some(offset) if sub_enabled(offset.visible) => {
                Point::new(offset.x.unwrap_or(0.0), offset.y.unwrap_or(0.0))
            }
            _ => Point::ZERO,
        }
    }

    /// Stroke width with visibility applied; absent or disabled → zero.
    pub fn stroke_width(&self) -> f32 {
        self.enabled_stroke()
            .and_then(|stroke| stroke.style.as_ref())
            .and_then(|style| style.stroke_width)
            .unwrap_or(0.0)
    }

    /// Dash pattern with visibility applied; absent, disabled, or empty → `None`.
    pub fn dash_pattern(&self) -> Option<&[f32]> {
        let dash = self
            .enabled_stroke()?
            .style
            .as_ref()?
            .dash_pattern
            .as_deref()?;
        if dash.is_empty() {
            None
        } else {
            Some(dash)
        }
    }

    fn enabled_stroke(&self) -> Option<&Stroke> {
        self.stroke.as_ref().filter(|stroke| sub_enabled(stroke.visible))
    }
}

// ===================================================================
// Tests
// ===================================================================
