//! Event sinks
//!
//! Events are fire-and-forget notifications for audio, HUD or analytics
//! layers. A sink never feeds anything back into the game.

use crate::types::GameEvent;

pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Collects events in order
impl EventSink for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_event(&mut self, event: &GameEvent) {
        (**self).on_event(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn on_event(&mut self, event: &GameEvent) {
        (**self).on_event(event);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Logs the sound cue for each event under the `web_tetris::cue` target
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameOver { score } | GameEvent::HighScore { score } => {
                log::info!(target: "web_tetris::cue", "{} (score {score})", event.cue())
            }
            _ => log::debug!(target: "web_tetris::cue", "{}", event.cue()),
        }
    }
}
