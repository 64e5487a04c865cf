//! The flat text style record.
//!
//! `TextStyle` is the single serializable bag of paint + layout + edit
//! state a text primitive carries. Property sync between a host and its
//! effect layers works on the serialized form: serialize, drop excluded
//! keys, apply the remainder. Every field must round-trip through
//! `serde_json` and default cleanly when absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::paint::{Paint, PaintFilter, Shadow, Stroke};

/// Font size assumed when a style does not specify one.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Flat key/value view of a style, as produced by serialization.
pub type StyleRecord = Map<String, Value>;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("malformed style record: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub text: String,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub line_height: Option<f32>,
    pub letter_spacing: Option<f32>,
    pub text_align: TextAlign,

    pub fill: Option<Paint>,
    pub stroke: Vec<Stroke>,
    pub stroke_width: Option<f32>,
    pub dash_pattern: Option<Vec<f32>>,
    pub shadow: Vec<Shadow>,
    pub inner_shadow: Vec<Shadow>,
    pub filter: Option<PaintFilter>,

    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: f32,
    pub skew_x: f32,
    pub skew_y: f32,

    pub visible: bool,
    pub editable: bool,
    pub text_editing: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: None,
            font_family: None,
            line_height: None,
            letter_spacing: None,
            text_align: TextAlign::Left,
            fill: None,
            stroke: Vec::new(),
            stroke_width: None,
            dash_pattern: None,
            shadow: Vec::new(),
            inner_shadow: Vec::new(),
            filter: None,
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            visible: true,
            editable: false,
            text_editing: false,
        }
    }
}

impl TextStyle {
    pub fn font_size_or_default(&self) -> f32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Full flat serialization.
    pub fn to_record(&self) -> StyleRecord {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => StyleRecord::new(),
        }
    }

    /// Partial apply of a flat record over this style.
    ///
    /// A `null` value clears the field back to its default; unknown keys
    /// are ignored. Returns the keys whose value actually changed, in
    /// record order. On a malformed value the style is left untouched.
    pub fn merge_record(&mut self, record: &StyleRecord) -> Result<Vec<String>, StyleError> {
        let mut base = self.to_record();
        let defaults = TextStyle::default().to_record();
        let mut changed = Vec::new();

        for (key, value) in record {
            let next = if value.is_null() {
                defaults.get(key).cloned().unwrap_or(Value::Null)
            } else {
                value.clone()
            };
            if base.get(key) != Some(&next) {
                changed.push(key.clone());
            }
            base.insert(key.clone(), next);
        }

        let merged: TextStyle = serde_json::from_value(Value::Object(base))?;
        *self = merged;
        Ok(changed)
    }
}

// ===================================================================
// Tests
// ===================================================================
