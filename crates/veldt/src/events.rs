//! # VELDT Event System
//!
//! Decouples the simulation core from its presentation shells.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │  Simulation │─────>│   Event     │─────>│     UI /    │
//! │   (core)    │      │   Channel   │      │   Renderer  │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! The core never calls into presentation code: scene transitions and hints
//! are published here and drained by whichever shell is listening. Uses
//! crossbeam channels for zero-allocation sends in the hot path.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use veldt_shared::Vec3;

use crate::locomotion::Mode;

/// Events the core publishes to its shells.
///
/// These events are the "API" between the simulation and presentation.
/// Each shell only processes the events relevant to it.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// The avatar stepped inside a building.
    ///
    /// Emitted by: scene transition (after the interior set is active)
    /// Consumed by: renderer (scene swap), UI (location banner)
    BuildingEntered {
        /// Footprint center of the entered building.
        center: Vec3,
    },

    /// The avatar stepped back outside.
    BuildingExited {
        /// World position the avatar was restored to.
        position: Vec3,
    },

    /// The avatar's simulation mode changed.
    ///
    /// Always accompanies `BuildingEntered` / `BuildingExited`; shells that
    /// only care about the mode bit can listen to this one alone.
    ModeChanged {
        /// The mode now in effect.
        mode: Mode,
    },

    /// An informational prompt for the player.
    ///
    /// Never an error: the core degrades to consistent physical behavior and
    /// at most suggests what the player could do instead.
    Hint {
        /// The prompt text.
        message: &'static str,
    },
}

/// Event bus between the core and its shells.
///
/// Pre-allocates a bounded channel to prevent memory growth in the hot path.
pub struct EventBus {
    /// Sender end - held by the core.
    sender: Sender<GameEvent>,
    /// Receiver end - cloned out to consumers.
    receiver: Receiver<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    ///
    /// `capacity` bounds the number of events in flight; 256 is plenty for
    /// one player's worth of transitions and hints.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle (clone for multiple consumers).
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }
}

/// Handle for publishing events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<GameEvent>,
}

impl EventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the channel is full; the event is dropped so the
    /// tick never stalls on a slow consumer.
    #[inline]
    pub fn send(&self, event: GameEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!(?dropped, "event channel full, dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                // Receiver gone; nothing is listening, nothing to do.
                false
            }
        }
    }
}

/// Handle for consuming events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<GameEvent>,
}

impl EventReceiver {
    /// Receives all pending events (non-blocking).
    ///
    /// Use this once per render frame to process events without blocking.
    #[inline]
    #[must_use]
    pub fn drain(&self) -> Vec<GameEvent> {
        let mut events = Vec::with_capacity(8);
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Receives one event (non-blocking). `None` if nothing is pending.
    #[inline]
    #[must_use]
    pub fn try_recv(&self) -> Option<GameEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
