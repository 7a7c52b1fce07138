use std::time::{Duration, Instant};

use crate::compose::NodeLookup;
use crate::model::ElementId;

/// Where an attachment attempt is waiting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachPhase {
    /// First lookup happens at the next paint boundary.
    AwaitPaint,
    /// First lookup missed; the single retry runs at this instant.
    RetryAt(Instant),
}

/// Handle attachment state machine:
/// `Idle -> Attaching -> Attached -> (selection change) Detaching -> Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AttachState {
    /// No handles bound.
    #[default]
    Idle,
    /// Waiting for the node of `id` to become queryable.
    Attaching {
        /// Element being bound.
        id: ElementId,
        /// Pending step.
        phase: AttachPhase,
    },
    /// Handles are bound to `id`.
    Attached {
        /// Bound element.
        id: ElementId,
    },
    /// Handles are being removed before binding `next`.
    Detaching {
        /// Element to bind once detached.
        next: Option<ElementId>,
    },
}

/// Layers the caller must repaint after a successful attachment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedrawRequest {
    /// Repaint the handle layer.
    pub handle_layer: bool,
    /// Repaint the node of this element.
    pub node: ElementId,
}

/// Binds transform handles to the selected element's render node.
///
/// Lookups are deferred to the paint boundary and retried once after a bounded delay. Every
/// step checks the caller's current selection first, so a superseded attempt is a no-op.
#[derive(Clone, Debug)]
pub struct HandleController {
    state: AttachState,
    retry_delay: Duration,
    degraded: Option<ElementId>,
}

impl HandleController {
    /// Controller in `Idle` with the given retry delay.
    pub fn new(retry_delay: Duration) -> Self {
        Self {
            state: AttachState::Idle,
            retry_delay,
            degraded: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> AttachState {
        self.state
    }

    /// Element whose handles are drawn.
    pub fn attached(&self) -> Option<ElementId> {
        match self.state {
            AttachState::Attached { id } => Some(id),
            _ => None,
        }
    }

    /// Element that stayed selected after both lookups failed.
    pub fn degraded(&self) -> Option<ElementId> {
        self.degraded
    }

    /// Retry deadline, if a retry is pending.
    pub fn retry_deadline(&self) -> Option<Instant> {
        match self.state {
            AttachState::Attaching {
                phase: AttachPhase::RetryAt(at),
                ..
            } => Some(at),
            _ => None,
        }
    }

    fn transition(&mut self, next: AttachState) {
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "handle attachment");
            self.state = next;
        }
    }

    /// React to a selection change. Deselecting goes straight to `Idle`.
    pub fn request(&mut self, selected: Option<ElementId>) {
        self.degraded = None;
        let Some(id) = selected else {
            self.detach();
            return;
        };
        let next = match self.state {
            AttachState::Attached { id: cur } if cur == id => return,
            AttachState::Attached { .. } | AttachState::Detaching { .. } => {
                AttachState::Detaching { next: Some(id) }
            }
            AttachState::Idle | AttachState::Attaching { .. } => AttachState::Attaching {
                id,
                phase: AttachPhase::AwaitPaint,
            },
        };
        self.transition(next);
    }

    /// Drop any binding without touching the scene graph.
    pub fn detach(&mut self) {
        self.transition(AttachState::Idle);
    }

    /// Detach if the removed element is the one bound or being bound.
    pub fn element_removed(&mut self, removed: ElementId) {
        let involved = match self.state {
            AttachState::Attaching { id, .. } | AttachState::Attached { id } => id == removed,
            AttachState::Detaching { next } => next == Some(removed),
            AttachState::Idle => false,
        };
        if involved {
            self.detach();
        }
        if self.degraded == Some(removed) {
            self.degraded = None;
        }
    }

    /// A render pass has been committed; `tree` is what it drew.
    pub fn on_paint_boundary(
        &mut self,
        tree: &impl NodeLookup,
        selected: Option<ElementId>,
        now: Instant,
    ) -> Option<RedrawRequest> {
        if let AttachState::Detaching { next } = self.state {
            self.transition(AttachState::Idle);
            if let Some(id) = next {
                self.transition(AttachState::Attaching {
                    id,
                    phase: AttachPhase::AwaitPaint,
                });
            }
        }
        match self.state {
            AttachState::Attaching {
                id,
                phase: AttachPhase::AwaitPaint,
            } => {
                if selected != Some(id) {
                    self.detach();
                    return None;
                }
                if tree.lookup(id).is_some() {
                    return Some(self.bind(id));
                }
                self.transition(AttachState::Attaching {
                    id,
                    phase: AttachPhase::RetryAt(now + self.retry_delay),
                });
                None
            }
            AttachState::Attaching {
                phase: AttachPhase::RetryAt(_),
                ..
            } => self.poll_retry(tree, selected, now),
            _ => None,
        }
    }

    /// Run the pending retry if its deadline has passed. Gives up after this single retry.
    pub fn poll_retry(
        &mut self,
        tree: &impl NodeLookup,
        selected: Option<ElementId>,
        now: Instant,
    ) -> Option<RedrawRequest> {
        let AttachState::Attaching {
            id,
            phase: AttachPhase::RetryAt(at),
        } = self.state
        else {
            return None;
        };
        if now < at {
            return None;
        }
        if selected != Some(id) {
            self.detach();
            return None;
        }
        if tree.lookup(id).is_some() {
            return Some(self.bind(id));
        }
        tracing::warn!(%id, "render node not found after retry; selection kept without handles");
        self.degraded = Some(id);
        self.detach();
        None
    }

    fn bind(&mut self, id: ElementId) -> RedrawRequest {
        self.transition(AttachState::Attached { id });
        RedrawRequest {
            handle_layer: true,
            node: id,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/selection/controller.rs"]
mod tests;
