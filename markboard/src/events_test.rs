use std::cell::RefCell;
use std::rc::Rc;

use super::*;

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl Fn(&'static str) -> Box<dyn Fn(&BoardEvent)>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_for_make = Rc::clone(&log);
    let make = move |name: &'static str| -> Box<dyn Fn(&BoardEvent)> {
        let log = Rc::clone(&log_for_make);
        Box::new(move |_e: &BoardEvent| log.borrow_mut().push(name.to_owned()))
    };
    (log, make)
}

#[test]
fn event_kind_matches_payload() {
    assert_eq!(BoardEvent::ShapesChanged.kind(), EventKind::ShapesChanged);
    assert_eq!(BoardEvent::PanChanged { active: true }.kind(), EventKind::PanChanged);
    assert_eq!(
        BoardEvent::ShapeCompleted(CompletionRequest::new(1, "rect")).kind(),
        EventKind::ShapeCompleted
    );
    assert_eq!(BoardEvent::ContextMenu { point: Point::new(1.0, 2.0) }.kind(), EventKind::ContextMenu);
}

#[test]
fn publish_calls_handlers_in_subscription_order() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let first = make("first");
    let second = make("second");
    bus.subscribe(EventKind::ShapesChanged, move |e| first(e));
    bus.subscribe(EventKind::ShapesChanged, move |e| second(e));
    bus.publish(&BoardEvent::ShapesChanged);
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

#[test]
fn publish_only_reaches_matching_kind() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let h = make("cleared");
    bus.subscribe(EventKind::ShapesCleared, move |e| h(e));
    bus.publish(&BoardEvent::ShapesChanged);
    assert!(log.borrow().is_empty());
    bus.publish(&BoardEvent::ShapesCleared);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn unsubscribe_removes_handler() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let h = make("x");
    let id = bus.subscribe(EventKind::ShapesChanged, move |e| h(e));
    assert!(bus.unsubscribe(id));
    assert!(!bus.unsubscribe(id));
    bus.publish(&BoardEvent::ShapesChanged);
    assert!(log.borrow().is_empty());
}

#[test]
fn handler_can_publish_reentrantly() {
    let bus = EventBus::new();
    let (log, make) = recorder();
    let inner = make("inner");
    let outer = make("outer");
    bus.subscribe(EventKind::ShapesCleared, move |e| inner(e));
    let bus_for_handler = bus.clone();
    bus.subscribe(EventKind::ShapesChanged, move |e| {
        outer(e);
        bus_for_handler.publish(&BoardEvent::ShapesCleared);
    });
    bus.publish(&BoardEvent::ShapesChanged);
    // Nested publish completes before the outer publish returns.
    assert_eq!(*log.borrow(), vec!["outer", "inner"]);
}

#[test]
fn handler_can_unsubscribe_itself_during_dispatch() {
    let bus = EventBus::new();
    let count = Rc::new(RefCell::new(0));
    let slot: Rc<RefCell<Option<SubscriptionId>>> = Rc::new(RefCell::new(None));
    let bus_for_handler = bus.clone();
    let count_for_handler = Rc::clone(&count);
    let slot_for_handler = Rc::clone(&slot);
    let id = bus.subscribe(EventKind::ShapesChanged, move |_| {
        *count_for_handler.borrow_mut() += 1;
        if let Some(id) = *slot_for_handler.borrow() {
            bus_for_handler.unsubscribe(id);
        }
    });
    *slot.borrow_mut() = Some(id);
    bus.publish(&BoardEvent::ShapesChanged);
    bus.publish(&BoardEvent::ShapesChanged);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn listener_count_and_clear() {
    let bus = EventBus::new();
    bus.subscribe(EventKind::KeyPressed, |_| {});
    bus.subscribe(EventKind::KeyPressed, |_| {});
    bus.subscribe(EventKind::ContextMenu, |_| {});
    assert_eq!(bus.listener_count(EventKind::KeyPressed), 2);
    bus.clear();
    assert_eq!(bus.listener_count(EventKind::KeyPressed), 0);
    assert_eq!(bus.listener_count(EventKind::ContextMenu), 0);
}

#[test]
fn cloned_handles_share_subscribers() {
    let bus = EventBus::new();
    let other = bus.clone();
    other.subscribe(EventKind::ShapesChanged, |_| {});
    assert_eq!(bus.listener_count(EventKind::ShapesChanged), 1);
}

// --- CompletionRequest ---

#[test]
fn completion_request_starts_unconfirmed() {
    let req = CompletionRequest::new(4, "polygon");
    assert!(!req.is_confirmed());
    assert_eq!(req.into_reply(), None);
}

#[test]
fn completion_request_confirm_through_bus() {
    let bus = EventBus::new();
    bus.subscribe(EventKind::ShapeCompleted, |e| {
        if let BoardEvent::ShapeCompleted(req) = e {
            req.confirm(LabelData::new("cat", "red"));
        }
    });
    let event = BoardEvent::ShapeCompleted(CompletionRequest::new(9, "rect"));
    bus.publish(&event);
    let BoardEvent::ShapeCompleted(req) = event else {
        unreachable!("constructed as ShapeCompleted");
    };
    assert_eq!(req.shape_id, 9);
    assert_eq!(req.into_reply(), Some(LabelData::new("cat", "red")));
}

#[test]
fn completion_request_last_confirm_wins() {
    let req = CompletionRequest::new(1, "rect");
    req.confirm(LabelData::new("a", "red"));
    req.confirm(LabelData::new("b", "blue"));
    assert_eq!(req.into_reply(), Some(LabelData::new("b", "blue")));
}
