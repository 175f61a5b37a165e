use std::cell::RefCell;

use crate::event::{DrawingEvent, EventHandler};

/// Fan-out of [`DrawingEvent`]s to every subscribed handler, in
/// subscription order.
///
/// Emitting takes `&self` so the sketchpad can notify while it holds
/// borrows of its own state.
#[derive(Default)]
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handler_count", &self.handler_count())
            .finish_non_exhaustive()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn emit(&self, event: DrawingEvent) {
        for handler in self.handlers.borrow_mut().iter_mut() {
            handler.handle_event(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_reaches_every_handler() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        for _ in 0..2 {
            let count = count.clone();
            bus.subscribe(Box::new(move |_: &DrawingEvent| {
                count.fetch_add(1, Ordering::SeqCst);
            }));
        }
        bus.emit(DrawingEvent::Cleared);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(bus.handler_count(), 2);
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let bus = EventBus::new();
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));
        for tag in ["first", "second"] {
            let order = order.clone();
            bus.subscribe(Box::new(move |_: &DrawingEvent| order.lock().unwrap().push(tag)));
        }
        bus.emit(DrawingEvent::PreviewHidden);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
        assert_eq!(format!("{bus:?}"), "EventBus { handler_count: 2, .. }");
    }
}
