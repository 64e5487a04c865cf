//! Core scene-graph surface for the halo text-effect system.
//!
//! This crate provides the render contract an effect-decorated text
//! object is built on: the flat [`TextStyle`] record, the paint model,
//! geometry and spread types, the synchronous property-change hub, the
//! [`TextPrimitive`] capability trait, and the [`TextNode`] reference
//! implementation together with a recording draw context for headless
//! use.
//!
//! The decorative effect-layer machinery itself lives in `halo-effects`
//! and consumes everything here strictly through [`TextPrimitive`].

pub mod canvas;
pub mod draw_data;
pub mod event;
pub mod geometry;
pub mod node;
pub mod paint;
pub mod style;

pub use canvas::{Canvas, CanvasCommand, RecordingCanvas};
pub use event::{ChangeHub, ListenerId};
pub use geometry::{Bounds, Matrix, Point, Spread};
pub use node::{RenderOptions, TextNode, TextPrimitive};
pub use paint::{Color, Paint, PaintFilter, Shadow, Stroke, StrokeStyle};
pub use style::{StyleError, StyleRecord, TextAlign, TextStyle, DEFAULT_FONT_SIZE};
