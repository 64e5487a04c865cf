//! Effect-layer lifecycle: a pool of reusable layer instances.
//!
//! The pool is an arena of slots addressed by effect index. Shrinking the
//! effect array hides surplus slots instead of destroying them, so
//! toggling between effect counts (undo/redo in an editor) never pays
//! reconstruction cost. Slots are only deallocated by [`EffectPool::dispose`],
//! which runs once at host teardown.

use halo_core::{StyleRecord, TextPrimitive};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::TextEffect;

pub struct EffectPool<T> {
    slots: Vec<T>,
    visible_len: usize,
}

impl<T> Default for EffectPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EffectPool<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new(), visible_len: 0 }
    }

    /// Total slots ever materialized, hidden ones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Length of the live sub-range (the current effect count).
    pub fn visible_len(&self) -> usize {
        self.visible_len
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    /// Mutable iteration over the live sub-range only.
    pub fn iter_visible_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().take(self.visible_len)
    }
}

impl<T: TextPrimitive> EffectPool<T> {
    /// Slot identities, for verifying reuse across resizes.
    pub fn slot_ids(&self) -> Vec<Uuid> {
        self.slots.iter().map(|slot| slot.id()).collect()
    }

    /// The style record a layer derives from one effect entry: the
    /// fields each layer controls independently of its host.
    fn layer_record(effect: &TextEffect) -> StyleRecord {
        let offset = effect.offset_value();
        let mut record = StyleRecord::new();
        record.insert(
            "fill".into(),
            serde_json::to_value(&effect.fill).unwrap_or(Value::Null),
        );
        record.insert(
            "stroke".into(),
            match &effect.stroke {
                Some(stroke) => {
                    serde_json::to_value(std::slice::from_ref(stroke)).unwrap_or(Value::Null)
                }
                None => Value::Null,
            },
        );
        record.insert(
            "filter".into(),
            serde_json::to_value(&effect.filter).unwrap_or(Value::Null),
        );
        record.insert("x".into(), json!(offset.x));
        record.insert("y".into(), json!(offset.y));
        record.insert("visible".into(), json!(effect.is_enabled()));
        record
    }

    /// Materialize the pool for an effect array: reuse slots in place,
    /// construct missing ones, hide the surplus.
    pub fn sync(&mut self, effects: &[TextEffect]) {
        for (index, effect) in effects.iter().enumerate() {
            let record = Self::layer_record(effect);
            match self.slots.get_mut(index) {
                Some(existing) => existing.apply_record(&record),
                None => self.slots.push(T::from_record(&record)),
            }
        }
        for slot in self.slots.iter_mut().skip(effects.len()) {
            slot.set_visible(false);
        }
        log::trace!(
            "effect pool synced: {} live of {} slots",
            effects.len(),
            self.slots.len()
        );
        self.visible_len = effects.len();
    }

    /// Resize the live sub-range, hiding or revealing slots. Never
    /// allocates or deallocates; the range is capped at the slot count.
    pub fn resize(&mut self, new_len: usize) {
        let new_len = new_len.min(self.slots.len());
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.set_visible(index < new_len);
        }
        self.visible_len = new_len;
    }

    /// Hide everything and mark the live range empty. Slots are kept
    /// for reuse.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.set_visible(false);
        }
        self.visible_len = 0;
    }

    /// Destroy every instance and drop the slots. Host-teardown only.
    pub fn dispose(&mut self) {
        for slot in &mut self.slots {
            slot.destroy();
        }
        self.slots.clear();
        self.visible_len = 0;
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectOffset;
    use halo_core::{Paint, Stroke, TextNode, TextPrimitive};

    fn offset_effect(x: f32, y: f32) -> TextEffect {
        TextEffect {
            offset: Some(EffectOffset { x: Some(x), y: Some(y), visible: None }),
            fill: Some(Paint::default()),
            ..TextEffect::default()
        }
    }

    #[test]
    fn test_sync_creates_one_slot_per_effect() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.sync(&[offset_effect(1.0, 0.0), offset_effect(2.0, 0.0)]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.visible_len(), 2);
        assert_eq!(pool.get(0).unwrap().style().x, 1.0);
        assert_eq!(pool.get(1).unwrap().style().x, 2.0);
    }

    #[test]
    fn test_shrink_hides_without_destroying() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.sync(&[offset_effect(1.0, 0.0), offset_effect(2.0, 0.0), offset_effect(3.0, 0.0)]);
        let ids = pool.slot_ids();

        pool.sync(&[offset_effect(1.0, 0.0)]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.visible_len(), 1);
        assert!(!pool.get(1).unwrap().visible());
        assert!(!pool.get(2).unwrap().visible());

        // Growing again reuses the same instances.
        pool.sync(&[offset_effect(1.0, 0.0), offset_effect(2.0, 0.0), offset_effect(3.0, 0.0)]);
        assert_eq!(pool.slot_ids(), ids);
        assert!(pool.get(2).unwrap().visible());
    }

    #[test]
    fn test_sync_applies_effect_visibility() {
        let mut effect = offset_effect(1.0, 0.0);
        effect.visible = Some(false);
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.sync(&[effect]);
        assert_eq!(pool.visible_len(), 1);
        assert!(!pool.get(0).unwrap().visible());
    }

    #[test]
    fn test_sync_carries_stroke_into_layer_style() {
        let mut effect = offset_effect(0.0, 0.0);
        effect.stroke = Some(Stroke::with_width(Paint::default(), 3.0));
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.sync(&[effect]);

        let layer = pool.get(0).unwrap();
        assert_eq!(layer.style().stroke.len(), 1);
        assert_eq!(
            layer.style().stroke[0].style.as_ref().unwrap().stroke_width,
            Some(3.0)
        );
    }

    #[test]
    fn test_reuse_clears_dropped_fields() {
        let mut with_stroke = offset_effect(0.0, 0.0);
        with_stroke.stroke = Some(Stroke::with_width(Paint::default(), 3.0));
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.sync(&[with_stroke]);
        assert!(!pool.get(0).unwrap().style().stroke.is_empty());

        pool.sync(&[offset_effect(0.0, 0.0)]);
        assert!(pool.get(0).unwrap().style().stroke.is_empty());
    }

    #[test]
    fn test_clear_keeps_slots() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.sync(&[offset_effect(1.0, 0.0)]);
        pool.clear();
        assert_eq!(pool.visible_len(), 0);
        assert_eq!(pool.len(), 1);
        assert!(!pool.get(0).unwrap().visible());
    }

    #[test]
    fn test_resize_reveals_and_caps() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.sync(&[offset_effect(1.0, 0.0), offset_effect(2.0, 0.0)]);
        pool.resize(0);
        assert_eq!(pool.visible_len(), 0);
        pool.resize(5);
        assert_eq!(pool.visible_len(), 2);
        assert!(pool.get(1).unwrap().visible());
    }

    #[test]
    fn test_dispose_drops_slots() {
        let mut pool: EffectPool<TextNode> = EffectPool::new();
        pool.sync(&[offset_effect(1.0, 0.0)]);
        pool.dispose();
        assert!(pool.is_empty());
        assert_eq!(pool.visible_len(), 0);
    }
}
