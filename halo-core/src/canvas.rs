//! Drawing context abstraction.
//!
//! Primitives draw themselves into a `Canvas`; the `RecordingCanvas`
//! implementation captures the command stream for headless use and for
//! asserting draw order in tests.

use crate::geometry::Matrix;
use crate::paint::{Paint, Stroke};

pub trait Canvas {
    /// Set the world transform for subsequent draw calls.
    fn set_world(&mut self, world: Matrix);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint);
    fn stroke_text(&mut self, text: &str, x: f32, y: f32, stroke: &Stroke);
}

#[derive(Clone, Debug, PartialEq)]
pub enum CanvasCommand {
    SetWorld(Matrix),
    FillText {
        text: String,
        x: f32,
        y: f32,
        paint: Paint,
    },
    StrokeText {
        text: String,
        x: f32,
        y: f32,
        stroke: Stroke,
    },
}

/// Canvas that records every command instead of rasterizing.
#[derive(Default)]
pub struct RecordingCanvas {
    pub commands: Vec<CanvasCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text-producing commands only (fills and strokes, no transforms).
    pub fn text_commands(&self) -> impl Iterator<Item = &CanvasCommand> {
        self.commands
            .iter()
            .filter(|command| !matches!(command, CanvasCommand::SetWorld(_)))
    }
}

impl Canvas for RecordingCanvas {
    fn set_world(&mut self, world: Matrix) {
        self.commands.push(CanvasCommand::SetWorld(world));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint) {
        self.commands.push(CanvasCommand::FillText {
            text: text.to_string(),
            x,
            y,
            paint: paint.clone(),
        });
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32, stroke: &Stroke) {
        self.commands.push(CanvasCommand::StrokeText {
            text: text.to_string(),
            x,
            y,
            stroke: stroke.clone(),
        });
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_call_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_world(Matrix::translate(1.0, 2.0));
        canvas.fill_text("a", 0.0, 0.0, &Paint::default());

        assert_eq!(canvas.commands.len(), 2);
        assert!(matches!(canvas.commands[0], CanvasCommand::SetWorld(_)));
        assert!(matches!(canvas.commands[1], CanvasCommand::FillText { .. }));
    }

    #[test]
    fn test_text_commands_skip_transforms() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_world(Matrix::IDENTITY);
        canvas.fill_text("a", 0.0, 0.0, &Paint::default());
        canvas.stroke_text("a", 0.0, 0.0, &Stroke::default());
        assert_eq!(canvas.text_commands().count(), 2);
    }
}
