mod bus;
mod events;

pub use bus::EventBus;
pub use events::DrawingEvent;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &DrawingEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&DrawingEvent) + Send,
{
    fn handle_event(&mut self, event: &DrawingEvent) {
        self(event)
    }
}
