//! Render-bounds overflow introduced by visible effect layers.
//!
//! An offset layer only needs extra room on the side it is pushed
//! toward, but its stroke radiates symmetrically around the shifted
//! position, so the stroke contribution applies to both local
//! directions before landing on the shifted side.

use halo_core::Spread;

use crate::config::TextEffect;

/// Overflow of one axis: `(positive, negative)` direction amounts.
pub fn direction_spread(offset: f32, stroke_spread: f32) -> (f32, f32) {
    if offset < 0.0 {
        (0.0, offset.abs() + stroke_spread)
    } else if offset > 0.0 {
        (offset + stroke_spread, 0.0)
    } else {
        (stroke_spread, stroke_spread)
    }
}

/// Per-direction maximum over the host's own spread and every enabled
/// effect. Recomputed when effects or layer styles change, not per
/// frame.
pub fn compute_spread(effects: &[TextEffect], base: Spread) -> Spread {
    let mut spread = base;
    for effect in effects {
        if !effect.is_enabled() {
            continue;
        }
        let offset = effect.offset_value();
        let stroke_spread = effect.stroke_width() / 2.0;
        let (right, left) = direction_spread(offset.x, stroke_spread);
        let (bottom, top) = direction_spread(offset.y, stroke_spread);
        spread = spread.max(&Spread { top, right, bottom, left });
    }
    spread
}

// ===================================================================
// Tests
// ===================================================================
