//! The effect-decorated text host.
//!
//! `EffectHost` wraps a text primitive by composition and layers the
//! effect machinery around it: the layer pool, both ratio sets, the
//! resolved effect array, and the property-change listener. It
//! implements the same render contract surface (style sync, draw,
//! bounds, destroy) by delegating to the wrapped primitive.

use halo_core::{Canvas, RenderOptions, Spread, StyleRecord, TextNode, TextPrimitive, TextStyle};

use crate::config::TextEffect;
use crate::listener::{classify, ChangeAction, ChangeListener};
use crate::orchestrator;
use crate::pool::EffectPool;
use crate::ratio::{EffectRatios, HostRatios};

pub struct EffectHost<T: TextPrimitive = TextNode> {
    inner: T,
    /// Host-owned resolved view of the assigned effects. Scaled values
    /// are written here, never into caller-supplied arrays.
    effects: Vec<TextEffect>,
    pool: EffectPool<T>,
    ratios: EffectRatios,
    host_ratios: Option<HostRatios>,
    font_size_effect: bool,
    listener: ChangeListener,
    destroyed: bool,
}

impl<T: TextPrimitive> EffectHost<T> {
    pub fn new(mut inner: T) -> Self {
        let listener = ChangeListener::attach(&mut inner);
        Self {
            inner,
            effects: Vec::new(),
            pool: EffectPool::new(),
            ratios: EffectRatios::default(),
            host_ratios: None,
            font_size_effect: true,
            listener,
            destroyed: false,
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Direct access to the wrapped primitive. Changes made through it
    /// are picked up on the next subsystem call via the queued
    /// notifications.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn pool(&self) -> &EffectPool<T> {
        &self.pool
    }

    /// The resolved effect view external readers observe.
    pub fn text_effects(&self) -> &[TextEffect] {
        &self.effects
    }

    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    pub fn font_size_effect(&self) -> bool {
        self.font_size_effect
    }

    /// Enable or disable responsive scaling. While disabled, layers
    /// keep whatever absolute values were last applied.
    pub fn set_font_size_effect(&mut self, enabled: bool) {
        self.font_size_effect = enabled;
    }

    /// Assign the effect configuration. Non-empty: capture absolutes
    /// and materialize/reuse layer instances. Empty: hide the pool and
    /// reset the ratio basis; instances are kept for reuse.
    pub fn set_text_effects(&mut self, effects: Vec<TextEffect>) {
        if effects.is_empty() {
            self.pool.clear();
            self.ratios.clear();
        } else {
            self.ratios.record_absolute_values(&effects);
            self.pool.sync(&effects);
        }
        self.effects = effects;
    }

    pub fn set_style(&mut self, style: TextStyle) {
        self.inner.set_style(style);
        self.process_changes();
    }

    pub fn apply_record(&mut self, record: &StyleRecord) {
        self.inner.apply_record(record);
        self.process_changes();
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        let mut style = self.inner.style().clone();
        style.font_size = Some(font_size);
        self.inner.set_style(style);
        self.process_changes();
    }

    /// On-change orchestration: dispatch queued notifications, refresh
    /// the host's own transforms, then propagate shared style and
    /// re-apply effect positions.
    pub fn update_change(&mut self) {
        self.process_changes();
        if self.host_ratios.is_none() {
            self.host_ratios = Some(HostRatios::collect(self.inner.style()));
        }

        self.inner.refresh_local_transform();
        self.inner.refresh_world_transform();
        orchestrator::sync_shared_style(&self.inner, &mut self.pool);
        if self.has_effects() {
            self.ratios
                .apply(self.inner.font_size(), &mut self.effects, &mut self.pool);
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, options: &RenderOptions) {
        orchestrator::draw(&mut self.inner, &mut self.pool, canvas, options);
    }

    pub fn update_box_bounds(&mut self) {
        orchestrator::update_box_bounds(&mut self.inner, &mut self.pool);
    }

    pub fn render_spread(&self) -> Spread {
        orchestrator::render_spread(&self.inner, &self.effects)
    }

    /// Drain queued property notifications and dispatch them. Inactive
    /// while `font_size_effect` is off.
    fn process_changes(&mut self) {
        for property in self.listener.drain() {
            if !self.font_size_effect {
                continue;
            }
            match classify(&property) {
                ChangeAction::RescaleEffects => {
                    if let Some(ratios) = &self.host_ratios {
                        if let Some(next) = ratios.apply(self.inner.style()) {
                            self.inner.set_computed_style(next);
                        }
                    }
                    if self.has_effects() {
                        self.ratios.apply(
                            self.inner.font_size(),
                            &mut self.effects,
                            &mut self.pool,
                        );
                    }
                }
                ChangeAction::CollectHostRatios => {
                    self.host_ratios = Some(HostRatios::collect(self.inner.style()));
                }
                ChangeAction::Ignore => {}
            }
        }
    }

    /// Teardown: unsubscribe the listener first so no notification can
    /// fire against a partially-torn-down pool, then destroy the
    /// instances, then the wrapped primitive.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.listener.detach(&mut self.inner);
        self.pool.dispose();
        self.effects.clear();
        self.ratios.clear();
        self.host_ratios = None;
        self.inner.destroy();
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectOffset;
    use halo_core::{Paint, Stroke};

    fn host(text: &str, font_size: f32) -> EffectHost<TextNode> {
        EffectHost::new(TextNode::new(TextStyle {
            text: text.to_string(),
            font_size: Some(font_size),
            fill: Some(Paint::default()),
            ..TextStyle::default()
        }))
    }

    fn effect(x: f32, y: f32, width: f32) -> TextEffect {
        TextEffect {
            offset: Some(EffectOffset { x: Some(x), y: Some(y), visible: None }),
            stroke: Some(Stroke::with_width(Paint::default(), width)),
            fill: Some(Paint::default()),
            ..TextEffect::default()
        }
    }

    #[test]
    fn test_assignment_materializes_visible_layers() {
        let mut host = host("t", 12.0);
        host.set_text_effects(vec![effect(2.0, 2.0, 1.0), effect(-1.0, 0.0, 2.0)]);
        assert!(host.has_effects());
        assert_eq!(host.pool().visible_len(), 2);
        assert_eq!(host.pool().len(), 2);
    }

    #[test]
    fn test_clear_hides_and_reuses() {
        let mut host = host("t", 12.0);
        host.set_text_effects(vec![effect(2.0, 2.0, 1.0), effect(-1.0, 0.0, 2.0)]);
        let ids = host.pool().slot_ids();

        host.set_text_effects(Vec::new());
        assert!(!host.has_effects());
        assert_eq!(host.pool().visible_len(), 0);
        assert_eq!(host.pool().len(), 2);

        host.set_text_effects(vec![effect(2.0, 2.0, 1.0), effect(-1.0, 0.0, 2.0)]);
        assert_eq!(host.pool().slot_ids(), ids);
    }

    #[test]
    fn test_font_size_change_rescales_layers() {
        let mut host = host("t", 12.0);
        host.set_text_effects(vec![effect(2.0, 2.0, 1.0)]);
        host.update_change(); // captures the ratio basis at 12

        host.set_font_size(24.0);
        let layer = host.pool().get(0).unwrap();
        assert_eq!(layer.style().x, 4.0);
        assert_eq!(layer.style().y, 4.0);
        assert_eq!(
            layer.style().stroke[0].style.as_ref().unwrap().stroke_width,
            Some(2.0)
        );
        // Pool identity unchanged.
        assert_eq!(host.pool().visible_len(), 1);
    }

    #[test]
    fn test_font_size_effect_off_freezes_layers() {
        let mut host = host("t", 12.0);
        host.set_text_effects(vec![effect(2.0, 2.0, 1.0)]);
        host.update_change();
        host.set_font_size_effect(false);

        host.set_font_size(24.0);
        assert_eq!(host.pool().get(0).unwrap().style().x, 2.0);
    }

    #[test]
    fn test_resolved_view_tracks_scaling() {
        let mut host = host("t", 12.0);
        let caller_owned = vec![effect(2.0, 2.0, 1.0)];
        host.set_text_effects(caller_owned.clone());
        host.update_change();
        host.set_font_size(24.0);

        assert_eq!(host.text_effects()[0].offset.as_ref().unwrap().x, Some(4.0));
        // The caller's array is untouched.
        assert_eq!(caller_owned[0].offset.as_ref().unwrap().x, Some(2.0));
    }

    #[test]
    fn test_host_stroke_rescales_with_font_size() {
        let mut host = host("t", 10.0);
        let mut style = host.inner().style().clone();
        style.stroke = vec![Stroke::with_width(Paint::default(), 2.0)];
        host.set_style(style); // stroke change → ratio collection

        host.set_font_size(20.0);
        assert_eq!(
            host.inner().style().stroke[0].style.as_ref().unwrap().stroke_width,
            Some(4.0)
        );
    }

    #[test]
    fn test_update_change_is_idempotent() {
        let mut host = host("stable", 12.0);
        host.set_text_effects(vec![effect(2.0, 2.0, 1.0)]);
        host.update_change();
        let first = host.pool().get(0).unwrap().style().clone();
        host.update_change();
        assert_eq!(*host.pool().get(0).unwrap().style(), first);
    }

    #[test]
    fn test_destroy_detaches_and_disposes() {
        let mut host = host("t", 12.0);
        host.set_text_effects(vec![effect(2.0, 2.0, 1.0)]);
        host.destroy();
        assert!(host.pool().is_empty());
        assert!(!host.has_effects());

        // A second destroy is a no-op.
        host.destroy();
    }
}
