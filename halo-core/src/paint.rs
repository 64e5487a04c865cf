//! Paint model: fills, strokes, shadows, and layer filters.
//!
//! Every type is a plain serde value with defaulted fields so partially
//! specified input degrades to neutral values instead of failing.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 1.0 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    Solid { color: Color },
}

impl Default for Paint {
    fn default() -> Self {
        Self::Solid { color: Color::BLACK }
    }
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self::Solid { color }
    }
}

/// Stroke geometry settings, independent of the stroke paint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub stroke_width: Option<f32>,
    pub dash_pattern: Option<Vec<f32>>,
}

/// A stroke entry: paint plus optional geometry style. Used both for
/// host strokes and for effect-layer strokes; `visible: Some(false)`
/// disables the entry without removing it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stroke {
    pub visible: Option<bool>,
    pub paint: Option<Paint>,
    pub style: Option<StrokeStyle>,
}

impl Stroke {
    pub fn with_width(paint: Paint, stroke_width: f32) -> Self {
        Self {
            visible: None,
            paint: Some(paint),
            style: Some(StrokeStyle {
                stroke_width: Some(stroke_width),
                dash_pattern: None,
            }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shadow {
    pub x: f32,
    pub y: f32,
    pub blur: f32,
    pub spread: f32,
    pub color: Option<Color>,
}

/// Post-paint filter applied to a whole layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintFilter {
    pub blur: Option<f32>,
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_round_trip() {
        let stroke = Stroke::with_width(Paint::solid(Color::rgb(255, 0, 0)), 2.0);
        let json = serde_json::to_value(&stroke).unwrap();
        let back: Stroke = serde_json::from_value(json).unwrap();
        assert_eq!(back, stroke);
    }

    #[test]
    fn test_partial_stroke_deserializes_with_defaults() {
        let stroke: Stroke = serde_json::from_str(r#"{"style":{"stroke_width":3.0}}"#).unwrap();
        assert_eq!(stroke.style.unwrap().stroke_width, Some(3.0));
        assert!(stroke.paint.is_none());
        assert!(stroke.visible.is_none());
    }

    #[test]
    fn test_empty_shadow_is_neutral() {
        let shadow: Shadow = serde_json::from_str("{}").unwrap();
        assert_eq!(shadow.x, 0.0);
        assert_eq!(shadow.blur, 0.0);
        assert!(shadow.color.is_none());
    }
}
