//! Event system for engine notifications
//!
//! Key principles:
//! - Key-value arguments (no order dependency)
//! - Registration system (only notify interested handlers)
//! - Deterministic delivery: handlers run in registration order
//! - Handlers can be removed by the id returned at registration

use std::collections::HashMap;

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// UI render texture was (re)created
    RenderTargetCreated,
    /// UI render texture was explicitly released
    RenderTargetReleased,
}

/// Variant for type-safe event arguments
/// Uses key-value pairs to avoid order dependency problems
#[derive(Debug, Clone, PartialEq)]
pub enum EventArg {
    /// Width and height in pixels
    Size(u32, u32),
    /// Creation counter value
    Generation(u64),
    /// Resource name
    Name(String),
}

/// Event with type ID and key-value arguments
#[derive(Debug, Clone)]
pub struct Event {
    /// Type of event
    pub event_type: EventType,
    /// Frame on which the event was raised
    pub frame: u64,
    args: HashMap<&'static str, EventArg>,
}

impl Event {
    /// Create a new event with the given type and frame number
    pub fn new(event_type: EventType, frame: u64) -> Self {
        Self {
            event_type,
            frame,
            args: HashMap::new(),
        }
    }

    /// Add an argument to the event (builder pattern)
    pub fn with_arg(mut self, key: &'static str, value: EventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Get an argument by key
    pub fn get_arg(&self, key: &str) -> Option<&EventArg> {
        self.args.get(key)
    }

    /// Get size argument if present
    pub fn get_size(&self) -> Option<(u32, u32)> {
        if let Some(EventArg::Size(width, height)) = self.get_arg("size") {
            Some((*width, *height))
        } else {
            None
        }
    }

    /// Get generation argument if present
    pub fn get_generation(&self) -> Option<u64> {
        if let Some(EventArg::Generation(generation)) = self.get_arg("generation") {
            Some(*generation)
        } else {
            None
        }
    }

    /// Get name argument if present
    pub fn get_name(&self) -> Option<&str> {
        if let Some(EventArg::Name(name)) = self.get_arg("name") {
            Some(name)
        } else {
            None
        }
    }
}

/// Event handler trait
pub trait EventHandler {
    /// Handle an event
    fn on_event(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> EventHandler for F {
    fn on_event(&mut self, event: &Event) {
        self(event);
    }
}

/// Identifies a registered handler so it can be removed later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// Event system with ordered handler registration
pub struct EventSystem {
    handlers: HashMap<EventType, Vec<(HandlerId, Box<dyn EventHandler>)>>,
    next_id: u64,
}

impl EventSystem {
    /// Create a new empty event system
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a handler for a specific event type
    ///
    /// Handlers for the same type are notified in the order they were registered.
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers
            .entry(event_type)
            .or_default()
            .push((id, handler));
        id
    }

    /// Remove a previously registered handler
    ///
    /// Returns false if the id is unknown (already removed).
    pub fn unregister_handler(&mut self, id: HandlerId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(index) = handlers.iter().position(|(handler_id, _)| *handler_id == id) {
                // Vec::remove keeps the remaining handlers in order
                handlers.remove(index);
                return true;
            }
        }
        false
    }

    /// Number of handlers registered for an event type
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.handlers.get(&event_type).map_or(0, Vec::len)
    }

    /// Deliver an event to every handler registered for its type, synchronously
    pub fn emit(&mut self, event: &Event) {
        if let Some(handlers) = self.handlers.get_mut(&event.event_type) {
            log::trace!("Emitting {:?} to {} handler(s)", event.event_type, handlers.len());
            for (_, handler) in handlers.iter_mut() {
                handler.on_event(event);
            }
        }
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestHandler {
        tag: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl EventHandler for TestHandler {
        fn on_event(&mut self, _event: &Event) {
            self.log.borrow_mut().push(self.tag);
        }
    }

    #[test]
    fn test_emit_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut system = EventSystem::new();

        for tag in ["first", "second", "third"] {
            system.register_handler(
                EventType::RenderTargetCreated,
                Box::new(TestHandler { tag, log: Rc::clone(&log) }),
            );
        }

        system.emit(&Event::new(EventType::RenderTargetCreated, 0));

        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_only_interested_handlers_notified() {
        let created = Rc::new(RefCell::new(0));
        let released = Rc::new(RefCell::new(0));
        let mut system = EventSystem::new();

        let counter = Rc::clone(&created);
        system.register_handler(EventType::RenderTargetCreated, Box::new(move |_: &Event| {
            *counter.borrow_mut() += 1;
        }));
        let counter = Rc::clone(&released);
        system.register_handler(EventType::RenderTargetReleased, Box::new(move |_: &Event| {
            *counter.borrow_mut() += 1;
        }));

        system.emit(&Event::new(EventType::RenderTargetCreated, 0));
        system.emit(&Event::new(EventType::RenderTargetCreated, 1));

        assert_eq!(*created.borrow(), 2);
        assert_eq!(*released.borrow(), 0);
    }

    #[test]
    fn test_unregister_handler() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut system = EventSystem::new();

        let first = system.register_handler(
            EventType::RenderTargetCreated,
            Box::new(TestHandler { tag: "first", log: Rc::clone(&log) }),
        );
        system.register_handler(
            EventType::RenderTargetCreated,
            Box::new(TestHandler { tag: "second", log: Rc::clone(&log) }),
        );

        assert!(system.unregister_handler(first));
        assert!(!system.unregister_handler(first));
        assert_eq!(system.handler_count(EventType::RenderTargetCreated), 1);

        system.emit(&Event::new(EventType::RenderTargetCreated, 0));
        assert_eq!(*log.borrow(), vec!["second"]);
    }

    #[test]
    fn test_event_args() {
        let event = Event::new(EventType::RenderTargetCreated, 7)
            .with_arg("size", EventArg::Size(640, 480))
            .with_arg("generation", EventArg::Generation(2))
            .with_arg("name", EventArg::Name("DaggerfallUI RenderTexture 2".to_string()));

        assert_eq!(event.frame, 7);
        assert_eq!(event.get_size(), Some((640, 480)));
        assert_eq!(event.get_generation(), Some(2));
        assert_eq!(event.get_name(), Some("DaggerfallUI RenderTexture 2"));
        assert_eq!(event.get_arg("missing"), None);
    }
}
