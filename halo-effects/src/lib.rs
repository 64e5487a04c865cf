//! Decorative effect layers for a scene-graph text primitive.
//!
//! Each configured effect is an independently styled copy of the host's
//! text shape (its own fill, stroke, and positional offset) drawn
//! around the host to produce outlines, drop-shadow-like offsets, and
//! layered strokes. The subsystem keeps a reusable pool of layer
//! instances synchronized with the host and keeps every layer
//! proportionally consistent under font-size changes.
//!
//! # Architecture
//!
//! ```text
//!  set_text_effects ──▸ EffectRatios (capture) ──▸ EffectPool (reuse/create)
//!                                                       │
//!  host property change ──▸ ChangeListener ──┬──────────┘
//!                                            ▼
//!                              rescale │ re-collect ratios
//!                                            │
//!  frame ──▸ orchestrator: sync shared style ▸ draw host ▸ draw layers
//!                                            │
//!  bounds recompute ──▸ spread: host base ∨ per-effect overflow
//! ```
//!
//! [`EffectHost`] composes the pieces around any [`halo_core::TextPrimitive`].

pub mod config;
pub mod host;
pub mod listener;
pub mod normalize;
pub mod orchestrator;
pub mod pool;
pub mod ratio;
pub mod spread;

pub use config::{EffectOffset, TextEffect};
pub use host::EffectHost;
pub use listener::{classify, ChangeAction, ChangeListener};
pub use normalize::{normalize_text_effects, normalize_text_style};
pub use pool::EffectPool;
pub use ratio::{EffectRatio, EffectRatios, HostRatios, MIN_RATIO_FONT_SIZE};
pub use spread::{compute_spread, direction_spread};
