//! Host property-change observation.
//!
//! The listener subscribes one callback at attach and unsubscribes it
//! exactly once at detach. The callback only enqueues property names;
//! the host wrapper drains the inbox synchronously within the same
//! change-handling call, so dispatch stays run-to-completion on the
//! single event/render thread.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use halo_core::{ListenerId, TextPrimitive};

/// What a property change requires of the effect subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeAction {
    /// Font size moved: re-apply ratios to layers and host paint.
    RescaleEffects,
    /// The host's own paint changed: re-collect its ratio set.
    CollectHostRatios,
    Ignore,
}

pub fn classify(property: &str) -> ChangeAction {
    match property {
        "font_size" => ChangeAction::RescaleEffects,
        "stroke_width" | "dash_pattern" | "stroke" | "shadow" | "inner_shadow" => {
            ChangeAction::CollectHostRatios
        }
        _ => ChangeAction::Ignore,
    }
}

pub struct ChangeListener {
    inbox: Rc<RefCell<VecDeque<String>>>,
    subscription: Option<ListenerId>,
}

impl ChangeListener {
    pub fn attach<T: TextPrimitive>(host: &mut T) -> Self {
        let inbox: Rc<RefCell<VecDeque<String>>> = Rc::default();
        let sink = Rc::clone(&inbox);
        let subscription = host.subscribe(Box::new(move |property| {
            sink.borrow_mut().push_back(property.to_string());
        }));
        Self { inbox, subscription: Some(subscription) }
    }

    /// Queued property names in arrival order; empties the inbox.
    pub fn drain(&self) -> Vec<String> {
        self.inbox.borrow_mut().drain(..).collect()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Unsubscribes exactly once; later calls are no-ops.
    pub fn detach<T: TextPrimitive>(&mut self, host: &mut T) {
        if let Some(id) = self.subscription.take() {
            host.unsubscribe(id);
        }
    }
}

// ===================================================================
// Tests
// ===================================================================
