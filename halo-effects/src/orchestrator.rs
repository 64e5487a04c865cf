//! Frame sequencing: shared-style propagation, draw order, and bounds
//! refresh for a host and its effect layers.

use halo_core::{Canvas, RenderOptions, Spread, TextPrimitive};

use crate::config::TextEffect;
use crate::pool::EffectPool;
use crate::spread;

/// Properties never propagated from the host to its layers: geometry
/// transform components, identity/edit state, and the fields each
/// layer controls independently.
pub const SYNC_EXCLUDE_KEYS: &[&str] = &[
    "fill",
    "stroke",
    "x",
    "y",
    "scale_x",
    "scale_y",
    "rotation",
    "skew_x",
    "skew_y",
    "text_editing",
    "editable",
    "shadow",
    "inner_shadow",
    "visible",
    "filter",
];

/// Propagate the host's shared style to every live layer, reparent the
/// layers under the host, and refresh their transforms and bounds.
/// Runs after the host's own style recomputation within the same
/// change-handling call.
pub fn sync_shared_style<T: TextPrimitive>(host: &T, pool: &mut EffectPool<T>) {
    let mut record = host.style_record();
    for key in SYNC_EXCLUDE_KEYS {
        record.remove(*key);
    }
    log::trace!(
        "host {}: syncing {} style keys to {} layers",
        host.id(),
        record.len(),
        pool.visible_len()
    );

    let parent = host.id();
    let parent_world = host.world_matrix();
    for layer in pool.iter_visible_mut() {
        layer.apply_record(&record);
        layer.reparent(parent, parent_world);
        layer.refresh_local_transform();
        layer.refresh_world_transform();
        layer.refresh_local_bounds();
        layer.refresh_world_bounds();
    }
}

/// Draw the host, then every visible layer in configured order.
///
/// The host is drawn with an export-style override so it keeps
/// rendering while its text is being edited: the effect stack must
/// stay visible under the editor overlay.
pub fn draw<T: TextPrimitive>(
    host: &mut T,
    pool: &mut EffectPool<T>,
    canvas: &mut dyn Canvas,
    options: &RenderOptions,
) {
    let host_options = RenderOptions { exporting: true, ..*options };
    host.draw(canvas, &host_options);

    for layer in pool.iter_visible_mut() {
        layer.refresh_local_transform();
        layer.refresh_world_transform();
        layer.refresh_local_bounds();
        layer.refresh_world_bounds();
        if !layer.visible() {
            continue;
        }
        canvas.set_world(layer.world_for(options));
        layer.draw(canvas, options);
    }
}

/// Refresh box bounds, layers first: the host's own bounds routine may
/// depend on children having up-to-date geometry.
pub fn update_box_bounds<T: TextPrimitive>(host: &mut T, pool: &mut EffectPool<T>) {
    for layer in pool.iter_visible_mut() {
        layer.refresh_box_bounds();
    }
    host.refresh_box_bounds();
}

/// The host's render spread with every enabled effect folded in.
pub fn render_spread<T: TextPrimitive>(host: &T, effects: &[TextEffect]) -> Spread {
    let base = host.render_spread();
    if effects.is_empty() {
        return base;
    }
    spread::compute_spread(effects, base)
}

// ===================================================================
// Tests
// ===================================================================
