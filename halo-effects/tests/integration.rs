//! End-to-end tests for the effect-layer pipeline.
//!
//! These drive a real host through assignment, property changes, and
//! draw calls, verifying the full sync/scale/draw sequence against a
//! recording canvas.

use halo_core::{
    CanvasCommand, Paint, RecordingCanvas, RenderOptions, Spread, Stroke, TextNode, TextPrimitive,
    TextStyle,
};
use halo_effects::{EffectHost, EffectOffset, TextEffect};

fn make_host(text: &str, font_size: f32) -> EffectHost<TextNode> {
    EffectHost::new(TextNode::new(TextStyle {
        text: text.to_string(),
        font_size: Some(font_size),
        fill: Some(Paint::default()),
        ..TextStyle::default()
    }))
}

fn offset_stroke_effect(x: f32, y: f32, stroke_width: f32) -> TextEffect {
    TextEffect {
        offset: Some(EffectOffset { x: Some(x), y: Some(y), visible: None }),
        stroke: Some(Stroke::with_width(Paint::default(), stroke_width)),
        fill: Some(Paint::default()),
        ..TextEffect::default()
    }
}

#[test]
fn test_end_to_end_scaling_scenario() {
    // Host at font size 12 with one offset+stroke effect.
    let mut host = make_host("halo", 12.0);
    host.set_text_effects(vec![offset_stroke_effect(2.0, 2.0, 1.0)]);
    host.update_change();

    let layer = host.pool().get(0).unwrap();
    assert!(layer.visible());
    assert_eq!(layer.style().x, 2.0);
    assert_eq!(layer.style().y, 2.0);
    assert_eq!(
        layer.style().stroke[0].style.as_ref().unwrap().stroke_width,
        Some(1.0)
    );
    let ids = host.pool().slot_ids();

    // Doubling the font size doubles offset and stroke width.
    host.set_font_size(24.0);
    let layer = host.pool().get(0).unwrap();
    assert_eq!(layer.style().x, 4.0);
    assert_eq!(layer.style().y, 4.0);
    assert_eq!(
        layer.style().stroke[0].style.as_ref().unwrap().stroke_width,
        Some(2.0)
    );

    // Same effect count, same pool identity.
    assert_eq!(host.pool().visible_len(), 1);
    assert_eq!(host.pool().slot_ids(), ids);
}

#[test]
fn test_count_synchronization_across_resizes() {
    let mut host = make_host("t", 12.0);
    let specs: Vec<_> = (0..4)
        .map(|i| offset_stroke_effect(i as f32, 0.0, 1.0))
        .collect();

    host.set_text_effects(specs.clone());
    assert_eq!(host.pool().visible_len(), 4);
    let ids = host.pool().slot_ids();

    // Shrink: hidden, not destroyed.
    host.set_text_effects(specs[..1].to_vec());
    assert_eq!(host.pool().visible_len(), 1);
    assert_eq!(host.pool().len(), 4);
    assert_eq!(
        host.pool().iter().filter(|layer| layer.visible()).count(),
        1
    );

    // Grow back: same instances.
    host.set_text_effects(specs);
    assert_eq!(host.pool().slot_ids(), ids);
    assert_eq!(host.pool().visible_len(), 4);
}

#[test]
fn test_clear_semantics() {
    let mut host = make_host("t", 12.0);
    host.set_text_effects(vec![offset_stroke_effect(2.0, 0.0, 1.0)]);
    assert!(host.has_effects());

    host.set_text_effects(Vec::new());
    assert!(!host.has_effects());
    assert_eq!(host.pool().visible_len(), 0);

    // Cleared effects contribute no spread.
    assert_eq!(host.render_spread(), Spread::ZERO);
}

#[test]
fn test_idempotent_reassignment() {
    let specs = vec![offset_stroke_effect(3.0, 1.0, 2.0)];
    let mut host = make_host("t", 12.0);

    host.set_text_effects(specs.clone());
    host.update_change();
    let first = host.pool().get(0).unwrap().style().clone();

    host.set_text_effects(specs);
    host.update_change();
    assert_eq!(*host.pool().get(0).unwrap().style(), first);
}

#[test]
fn test_spread_matches_directional_rule() {
    let mut host = make_host("t", 12.0);
    host.set_text_effects(vec![offset_stroke_effect(5.0, 0.0, 2.0)]);

    let spread = host.render_spread();
    assert_eq!(spread.right, 6.0);
    assert_eq!(spread.left, 0.0);
    assert_eq!(spread.top, 1.0);
    assert_eq!(spread.bottom, 1.0);
}

#[test]
fn test_draw_sequence_host_then_layers() {
    let mut host = make_host("x", 12.0);
    host.set_text_effects(vec![
        offset_stroke_effect(2.0, 0.0, 1.0),
        offset_stroke_effect(-2.0, 0.0, 1.0),
    ]);
    host.update_change();

    let mut canvas = RecordingCanvas::new();
    host.draw(&mut canvas, &RenderOptions::default());

    // Host fill first, then one SetWorld per visible layer.
    assert!(matches!(canvas.commands[0], CanvasCommand::FillText { .. }));
    let worlds: Vec<_> = canvas
        .commands
        .iter()
        .filter(|c| matches!(c, CanvasCommand::SetWorld(_)))
        .collect();
    assert_eq!(worlds.len(), 2);

    // Layers draw in configured order: first at +2, second at -2.
    let world_xs: Vec<f32> = canvas
        .commands
        .iter()
        .filter_map(|c| match c {
            CanvasCommand::SetWorld(m) => Some(m.e),
            _ => None,
        })
        .collect();
    assert_eq!(world_xs, vec![2.0, -2.0]);
}

#[test]
fn test_editing_host_keeps_rendering() {
    let mut host = make_host("edit me", 12.0);
    host.set_text_effects(vec![offset_stroke_effect(1.0, 1.0, 1.0)]);
    host.update_change();

    let mut style = host.inner().style().clone();
    style.text_editing = true;
    host.set_style(style);
    host.update_change();

    let mut canvas = RecordingCanvas::new();
    host.draw(&mut canvas, &RenderOptions::default());
    let host_fills = canvas
        .commands
        .iter()
        .take_while(|c| !matches!(c, CanvasCommand::SetWorld(_)))
        .filter(|c| matches!(c, CanvasCommand::FillText { .. }))
        .count();
    assert!(host_fills > 0, "host must render while being edited");
}

#[test]
fn test_layers_mirror_host_content() {
    let mut host = make_host("before", 12.0);
    host.set_text_effects(vec![offset_stroke_effect(1.0, 0.0, 1.0)]);
    host.update_change();
    assert_eq!(host.pool().get(0).unwrap().style().text, "before");

    let mut style = host.inner().style().clone();
    style.text = "edited".to_string();
    host.set_style(style);
    host.update_change();
    assert_eq!(host.pool().get(0).unwrap().style().text, "edited");
}

#[test]
fn test_scaling_survives_shared_style_sync() {
    let mut host = make_host("t", 10.0);
    host.set_text_effects(vec![offset_stroke_effect(5.0, 0.0, 2.0)]);
    host.update_change();
    host.set_font_size(30.0);
    // A later frame's shared-style sync must not disturb scaled offsets.
    host.update_change();

    let layer = host.pool().get(0).unwrap();
    assert_eq!(layer.style().x, 15.0);
    assert_eq!(
        layer.style().stroke[0].style.as_ref().unwrap().stroke_width,
        Some(6.0)
    );
}

#[test]
fn test_teardown_after_heavy_use() {
    let mut host = make_host("t", 12.0);
    for count in [3usize, 1, 5, 0, 2] {
        let specs: Vec<_> = (0..count)
            .map(|i| offset_stroke_effect(i as f32, 0.0, 1.0))
            .collect();
        host.set_text_effects(specs);
        host.update_change();
    }
    host.destroy();
    assert!(host.pool().is_empty());
    assert!(!host.has_effects());
}
