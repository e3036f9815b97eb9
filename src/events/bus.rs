//! Event Bus - observability hub for match events
//!
//! Systems emit events to the bus and a logging system drains them each
//! frame. The bus is strictly for observation; match control flow runs on
//! direct calls into the match state machine.

use bevy::prelude::*;

use super::types::GameEvent;

/// Timestamped event for the event bus
#[derive(Debug, Clone)]
pub struct BusEvent {
    /// Time in milliseconds since match start
    pub time_ms: u32,
    /// The event data
    pub event: GameEvent,
}

/// Central event bus for match observability
#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted this frame, waiting to be drained
    pending: Vec<BusEvent>,

    /// Current elapsed time in milliseconds (for timestamping)
    elapsed_ms: u32,

    /// Whether the bus is enabled (disabled in some headless runs)
    enabled: bool,
}

impl EventBus {
    /// Create a new enabled event bus
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a disabled event bus (events are dropped)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Update the elapsed time (called each frame)
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: GameEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    /// Drain pending events
    pub fn drain(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Get the number of pending events
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if the bus is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get current elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

/// System to update the event bus time each frame
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}

/// Drain the bus and write each event to the log
pub fn log_events(mut bus: ResMut<EventBus>) {
    for entry in bus.drain() {
        info!(
            "[{:>8}ms] {:<2} {:?}",
            entry.time_ms,
            entry.event.type_code(),
            entry.event
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::ControllerSource;

    #[test]
    fn emit_and_drain() {
        let mut bus = EventBus::new();
        bus.update_time(1.5);

        bus.emit(GameEvent::ControllerInput {
            team: 0,
            source: ControllerSource::Human,
            move_x: 0.5,
            jump: true,
        });

        assert_eq!(bus.pending_count(), 1);

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time_ms, 1500);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn disabled_bus_drops_events() {
        let mut bus = EventBus::disabled();
        bus.emit(GameEvent::RoundReset { scores: [0, 0] });
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn goal_event_round_trips() {
        let mut bus = EventBus::new();
        bus.emit(GameEvent::Goal {
            scoring_team: 1,
            scores: [0, 1],
        });

        let events = bus.drain();
        assert_eq!(events.len(), 1);
        if let GameEvent::Goal {
            scoring_team,
            scores,
        } = &events[0].event
        {
            assert_eq!(*scoring_team, 1);
            assert_eq!(*scores, [0, 1]);
        } else {
            panic!("Wrong event type");
        }
    }
}
