//! Debounced reconciliation of the meal mode between two owners.
//!
//! The mode can be set by the enclosing context (launcher flags, a resumed
//! room) or by the in-wizard selector. Naive two-way binding loops, so each
//! side schedules a one-directional sync after a short delay, and a newer
//! change cancels and replaces whatever was pending. Nothing ever fires
//! synchronously from inside another update of the same value.
//!
//! Timers are plain deadlines fired from the host's poll loop via
//! [`ModeMirror::tick`]; there is only one thread, so cancel-and-replace is
//! the whole serialization story.

use crate::mode::MealMode;
use std::time::{Duration, Instant};

/// Coalescing window for mode syncs in either direction
pub const MODE_SYNC_DEBOUNCE: Duration = Duration::from_millis(120);

/// The sync that fires once a pending deadline is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAction {
    /// The context changed; the wizard adopts its value
    AdoptLocal(Option<MealMode>),
    /// The user changed the in-wizard selector; push to the context
    PushToContext(Option<MealMode>),
}

#[derive(Debug, Clone, Copy)]
struct PendingSync {
    action: MirrorAction,
    due: Instant,
}

#[derive(Debug)]
pub struct ModeMirror {
    context: Option<MealMode>,
    local: Option<MealMode>,
    pending: Option<PendingSync>,
}

impl ModeMirror {
    pub fn new(initial: Option<MealMode>) -> Self {
        Self {
            context: initial,
            local: initial,
            pending: None,
        }
    }

    /// The wizard-side value, updated immediately on local selection
    pub fn local(&self) -> Option<MealMode> {
        self.local
    }

    /// The context-side value as last observed or pushed
    pub fn context(&self) -> Option<MealMode> {
        self.context
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// A context-supplied change. Identical values (None-normalized) schedule
    /// nothing; a differing value cancels any pending sync and schedules a
    /// local adoption after the debounce window.
    pub fn observe_context(&mut self, mode: Option<MealMode>, now: Instant) {
        self.context = mode;
        if mode == self.local {
            // Values already agree; a stale pending adoption would only
            // replay history, so drop it.
            if matches!(
                self.pending,
                Some(PendingSync {
                    action: MirrorAction::AdoptLocal(_),
                    ..
                })
            ) {
                self.pending = None;
            }
            return;
        }
        self.pending = Some(PendingSync {
            action: MirrorAction::AdoptLocal(mode),
            due: now + MODE_SYNC_DEBOUNCE,
        });
    }

    /// A user interaction with the in-wizard selector. Re-selecting the active
    /// mode clears it back to unselected (toggle-off). Returns the value the
    /// wizard now holds.
    pub fn select_local(&mut self, choice: MealMode, now: Instant) -> Option<MealMode> {
        let next = if self.local == Some(choice) {
            None
        } else {
            Some(choice)
        };
        self.set_local(next, now);
        next
    }

    /// Directly set the wizard-side value (used when restoring a draft).
    pub fn set_local(&mut self, mode: Option<MealMode>, now: Instant) {
        self.local = mode;
        if mode == self.context {
            self.pending = None;
            return;
        }
        self.pending = Some(PendingSync {
            action: MirrorAction::PushToContext(mode),
            due: now + MODE_SYNC_DEBOUNCE,
        });
    }

    /// Fire the pending sync if its deadline has passed. At most one action
    /// per call; the mirror's own fields are updated before returning so the
    /// caller only has to forward the action to its side.
    pub fn tick(&mut self, now: Instant) -> Option<MirrorAction> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }
        self.pending = None;
        match pending.action {
            MirrorAction::AdoptLocal(mode) => self.local = mode,
            MirrorAction::PushToContext(mode) => self.context = mode,
        }
        Some(pending.action)
    }

    /// Teardown: a dismounted wizard must not fire stale syncs.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }
}
