//! The text-primitive render contract and its reference implementation.
//!
//! `TextPrimitive` is the capability surface the effect subsystem
//! consumes: settable style properties, flat-record serialization, a
//! property-change subscription, transform/bounds refresh, and a draw
//! entry point. `TextNode` implements it over a plain `TextStyle` with
//! cached matrices and bounds.

use uuid::Uuid;

use crate::canvas::Canvas;
use crate::draw_data;
use crate::event::{ChangeHub, ListenerId};
use crate::geometry::{Bounds, Matrix, Spread};
use crate::style::{StyleRecord, TextStyle};

/// Per-draw options.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderOptions {
    /// Export-style rendering: edit-state suppression is bypassed.
    pub exporting: bool,
    /// Extra render transform applied on top of the world matrix.
    pub matrix: Option<Matrix>,
}

/// Render contract for a text-capable scene object.
pub trait TextPrimitive {
    /// Factory: construct a fresh instance from a flat style record.
    fn from_record(record: &StyleRecord) -> Self
    where
        Self: Sized;

    fn id(&self) -> Uuid;
    fn style(&self) -> &TextStyle;

    /// Replace the style, broadcasting a change per key that differs.
    fn set_style(&mut self, style: TextStyle);

    /// Replace the style without broadcasting. Used when derived values
    /// (scaled strokes, effect positions) are written back, so the write
    /// does not re-trigger ratio collection.
    fn set_computed_style(&mut self, style: TextStyle);

    /// Partial apply of a flat record, broadcasting changed keys.
    fn apply_record(&mut self, record: &StyleRecord);
    fn style_record(&self) -> StyleRecord;

    fn font_size(&self) -> Option<f32>;
    fn set_position(&mut self, x: f32, y: f32);
    fn visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);

    fn subscribe(&mut self, callback: Box<dyn FnMut(&str)>) -> ListenerId;
    fn unsubscribe(&mut self, id: ListenerId) -> bool;

    fn reparent(&mut self, parent: Uuid, parent_world: Matrix);
    fn refresh_local_transform(&mut self);
    fn refresh_world_transform(&mut self);
    fn refresh_box_bounds(&mut self);
    fn refresh_local_bounds(&mut self);
    fn refresh_world_bounds(&mut self);

    fn world_matrix(&self) -> Matrix;
    /// World transform effective for this draw, render options applied.
    fn world_for(&self, options: &RenderOptions) -> Matrix;

    /// The primitive's own render-bounds overflow, effects not included.
    fn render_spread(&self) -> Spread;

    fn draw(&mut self, canvas: &mut dyn Canvas, options: &RenderOptions);
    fn destroy(&mut self);
}

/// Reference text primitive.
pub struct TextNode {
    id: Uuid,
    style: TextStyle,
    hub: ChangeHub,
    parent: Option<Uuid>,
    parent_world: Matrix,
    local_matrix: Matrix,
    world_matrix: Matrix,
    box_bounds: Bounds,
    local_bounds: Bounds,
    world_bounds: Bounds,
    destroyed: bool,
}

impl TextNode {
    pub fn new(style: TextStyle) -> Self {
        let mut node = Self {
            id: Uuid::new_v4(),
            style,
            hub: ChangeHub::new(),
            parent: None,
            parent_world: Matrix::IDENTITY,
            local_matrix: Matrix::IDENTITY,
            world_matrix: Matrix::IDENTITY,
            box_bounds: Bounds::default(),
            local_bounds: Bounds::default(),
            world_bounds: Bounds::default(),
            destroyed: false,
        };
        node.refresh_local_transform();
        node.refresh_world_transform();
        node.refresh_box_bounds();
        node.refresh_local_bounds();
        node.refresh_world_bounds();
        node
    }

    pub fn parent(&self) -> Option<Uuid> {
        self.parent
    }

    pub fn box_bounds(&self) -> Bounds {
        self.box_bounds
    }

    pub fn local_bounds(&self) -> Bounds {
        self.local_bounds
    }

    pub fn world_bounds(&self) -> Bounds {
        self.world_bounds
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn enabled_strokes(&self) -> impl Iterator<Item = &crate::paint::Stroke> {
        self.style
            .stroke
            .iter()
            .filter(|stroke| stroke.visible != Some(false))
    }
}

impl TextPrimitive for TextNode {
    fn from_record(record: &StyleRecord) -> Self {
        let mut style = TextStyle::default();
        if let Err(error) = style.merge_record(record) {
            log::warn!("node factory: style record rejected, using defaults: {error}");
        }
        Self::new(style)
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn style(&self) -> &TextStyle {
        &self.style
    }

    fn set_style(&mut self, style: TextStyle) {
        let before = self.style.to_record();
        let after = style.to_record();
        self.style = style;
        for (key, value) in &after {
            if before.get(key) != Some(value) {
                self.hub.notify(key);
            }
        }
    }

    fn set_computed_style(&mut self, style: TextStyle) {
        self.style = style;
    }

    fn apply_record(&mut self, record: &StyleRecord) {
        match self.style.merge_record(record) {
            Ok(changed) => {
                for key in changed {
                    self.hub.notify(&key);
                }
            }
            Err(error) => {
                log::warn!("node {}: style record rejected: {error}", self.id);
            }
        }
    }

    fn style_record(&self) -> StyleRecord {
        self.style.to_record()
    }

    fn font_size(&self) -> Option<f32> {
        self.style.font_size
    }

    fn set_position(&mut self, x: f32, y: f32) {
        if self.style.x != x {
            self.style.x = x;
            self.hub.notify("x");
        }
        if self.style.y != y {
            self.style.y = y;
            self.hub.notify("y");
        }
    }

    fn visible(&self) -> bool {
        self.style.visible
    }

    fn set_visible(&mut self, visible: bool) {
        if self.style.visible != visible {
            self.style.visible = visible;
            self.hub.notify("visible");
        }
    }

    fn subscribe(&mut self, callback: Box<dyn FnMut(&str)>) -> ListenerId {
        self.hub.subscribe(callback)
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.hub.unsubscribe(id)
    }

    fn reparent(&mut self, parent: Uuid, parent_world: Matrix) {
        self.parent = Some(parent);
        self.parent_world = parent_world;
    }

    fn refresh_local_transform(&mut self) {
        self.local_matrix = Matrix::compose(
            self.style.x,
            self.style.y,
            self.style.scale_x,
            self.style.scale_y,
            self.style.rotation,
        );
    }

    fn refresh_world_transform(&mut self) {
        self.world_matrix = self.parent_world.multiply(&self.local_matrix);
    }

    fn refresh_box_bounds(&mut self) {
        self.box_bounds = draw_data::compute(&self.style).bounds;
    }

    fn refresh_local_bounds(&mut self) {
        self.local_bounds = self.local_matrix.transform_bounds(&self.box_bounds);
    }

    fn refresh_world_bounds(&mut self) {
        self.world_bounds = self.world_matrix.transform_bounds(&self.box_bounds);
    }

    fn world_matrix(&self) -> Matrix {
        self.world_matrix
    }

    fn world_for(&self, options: &RenderOptions) -> Matrix {
        match options.matrix {
            Some(render) => render.multiply(&self.world_matrix),
            None => self.world_matrix,
        }
    }

    fn render_spread(&self) -> Spread {
        let mut width = self.style.stroke_width.unwrap_or(0.0);
        for stroke in self.enabled_strokes() {
            if let Some(stroke_width) = stroke.style.as_ref().and_then(|s| s.stroke_width) {
                width = width.max(stroke_width);
            }
        }
        let mut spread = Spread::uniform(width / 2.0);
        for shadow in &self.style.shadow {
            let reach = shadow.blur + shadow.spread;
            spread = spread.max(&Spread {
                top: (reach - shadow.y).max(0.0),
                right: (reach + shadow.x).max(0.0),
                bottom: (reach + shadow.y).max(0.0),
                left: (reach - shadow.x).max(0.0),
            });
        }
        spread
    }

    fn draw(&mut self, canvas: &mut dyn Canvas, options: &RenderOptions) {
        if self.destroyed || !self.style.visible {
            return;
        }
        // While the text is being edited an editor overlay takes over;
        // export-style rendering bypasses that suppression.
        if self.style.text_editing && !options.exporting {
            return;
        }

        let data = draw_data::compute(&self.style);
        if let Some(fill) = &self.style.fill {
            for row in &data.rows {
                if !row.text.is_empty() {
                    canvas.fill_text(&row.text, row.x, row.y, fill);
                }
            }
        }
        for stroke in self.style.stroke.iter().filter(|s| s.visible != Some(false)) {
            for row in &data.rows {
                if !row.text.is_empty() {
                    canvas.stroke_text(&row.text, row.x, row.y, stroke);
                }
            }
        }
    }

    fn destroy(&mut self) {
        self.hub.clear();
        self.destroyed = true;
    }
}

// ===================================================================
// Tests
// ===================================================================
