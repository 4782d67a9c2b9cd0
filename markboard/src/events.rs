//! Synchronous publish/subscribe bus used for every notification the board
//! sends to its host.
//!
//! Publishing is a direct fan-out on the caller's stack: no queue, no
//! deferred delivery. Handlers run in subscription order. The handler list is
//! snapshotted before dispatch, so a handler may publish, subscribe or
//! unsubscribe through a cloned [`EventBus`] handle while it runs.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::{Key, Modifiers};
use crate::record::LabelData;
use crate::shape::ShapeId;
use crate::transform::{Point, Transform};

/// Event names handlers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ShapesChanged,
    DrawTypeChanged,
    ShapeCompleted,
    ShapesCleared,
    TransformChanged,
    PanChanged,
    KeyPressed,
    ContextMenu,
}

/// Payload of a published event.
#[derive(Debug)]
pub enum BoardEvent {
    /// The shape list, a shape's geometry/label, or the selection changed.
    ShapesChanged,
    /// A draw type was armed (`Some(tag)`) or cleared (`None`).
    DrawTypeChanged { draw_type: Option<String> },
    /// A construction is ready to finalize; confirm it with label data.
    ShapeCompleted(CompletionRequest),
    /// Every shape was removed.
    ShapesCleared,
    /// The view transform changed.
    TransformChanged { transform: Transform },
    /// Pan mode was entered or left.
    PanChanged { active: bool },
    /// A key went down (published after the board handled it).
    KeyPressed { key: Key, modifiers: Modifiers },
    /// The context menu was requested at an image-space point.
    ContextMenu { point: Point },
}

impl BoardEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ShapesChanged => EventKind::ShapesChanged,
            Self::DrawTypeChanged { .. } => EventKind::DrawTypeChanged,
            Self::ShapeCompleted(_) => EventKind::ShapeCompleted,
            Self::ShapesCleared => EventKind::ShapesCleared,
            Self::TransformChanged { .. } => EventKind::TransformChanged,
            Self::PanChanged { .. } => EventKind::PanChanged,
            Self::KeyPressed { .. } => EventKind::KeyPressed,
            Self::ContextMenu { .. } => EventKind::ContextMenu,
        }
    }
}

/// The board's request for label data when a construction completes.
///
/// The construction only finalizes if some handler calls [`confirm`]
/// before `publish` returns.
///
/// [`confirm`]: CompletionRequest::confirm
#[derive(Debug)]
pub struct CompletionRequest {
    pub shape_id: ShapeId,
    /// Tag of the shape being completed.
    pub tag: String,
    reply: RefCell<Option<LabelData>>,
}

impl CompletionRequest {
    #[must_use]
    pub fn new(shape_id: ShapeId, tag: impl Into<String>) -> Self {
        Self { shape_id, tag: tag.into(), reply: RefCell::new(None) }
    }

    /// Supply the label data. A later call overwrites an earlier one.
    pub fn confirm(&self, data: LabelData) {
        *self.reply.borrow_mut() = Some(data);
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.reply.borrow().is_some()
    }

    /// Take the confirmed label data, if any.
    #[must_use]
    pub fn into_reply(self) -> Option<LabelData> {
        self.reply.into_inner()
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&BoardEvent)>;

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<Subscription>,
}

/// Cloneable handle to a shared subscriber list.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Subscribers>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.inner.borrow().entries.len())
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`.
    pub fn subscribe(&self, kind: EventKind, handler: impl Fn(&BoardEvent) + 'static) -> SubscriptionId {
        let mut subs = self.inner.borrow_mut();
        subs.next_id += 1;
        let id = SubscriptionId(subs.next_id);
        subs.entries.push(Subscription { id, kind, handler: Rc::new(handler) });
        id
    }

    /// Remove a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.inner.borrow_mut();
        let before = subs.entries.len();
        subs.entries.retain(|s| s.id != id);
        subs.entries.len() != before
    }

    /// Deliver `event` to every handler subscribed to its kind, in order.
    pub fn publish(&self, event: &BoardEvent) {
        let kind = event.kind();
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| Rc::clone(&s.handler))
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    /// Number of handlers subscribed to `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner.borrow().entries.iter().filter(|s| s.kind == kind).count()
    }

    /// Drop every subscription.
    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }
}
