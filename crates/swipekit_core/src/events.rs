//! Pointer event types
//!
//! Platform-neutral pointer input. Hosts translate their native touch or
//! mouse events into [`Event`]s and hand them to a
//! [`DragTracker`](crate::gesture::DragTracker).

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    /// Drag event (pointer down + move)
    pub const DRAG: EventType = 6;
    /// Drag ended (pointer up after drag)
    pub const DRAG_END: EventType = 7;
    /// The platform took the pointer away (system gesture, palm rejection, ...)
    pub const POINTER_CANCEL: EventType = 8;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub target: u64, // Widget ID
    pub data: EventData,
    /// Milliseconds since an arbitrary host epoch
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
        pressure: f32,
    },
    None,
}

impl Event {
    /// Create a primary-button pointer event with no particular target
    pub fn pointer(event_type: EventType, x: f32, y: f32, timestamp: u64) -> Self {
        Self {
            event_type,
            target: 0,
            data: EventData::Pointer {
                x,
                y,
                button: 0,
                pressure: 1.0,
            },
            timestamp,
            propagation_stopped: false,
        }
    }

    /// Set the target widget
    pub fn with_target(mut self, target: u64) -> Self {
        self.target = target;
        self
    }

    /// Pointer position, if this is a pointer event
    pub fn position(&self) -> Option<(f32, f32)> {
        match self.data {
            EventData::Pointer { x, y, .. } => Some((x, y)),
            EventData::None => None,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_position() {
        let event = Event::pointer(event_types::POINTER_DOWN, 12.0, 34.0, 5).with_target(7);
        assert_eq!(event.position(), Some((12.0, 34.0)));
        assert_eq!(event.target, 7);
        assert!(!event.propagation_stopped);
    }

    #[test]
    fn test_non_pointer_has_no_position() {
        let event = Event {
            event_type: event_types::POINTER_CANCEL,
            target: 0,
            data: EventData::None,
            timestamp: 0,
            propagation_stopped: false,
        };
        assert_eq!(event.position(), None);
    }
}
