//! Terminal event polling

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::time::Duration;

use crate::app::Action;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// No input within the tick rate
    Tick,
}

impl From<TuiEvent> for Action {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Key(key) => Action::Key(key),
            TuiEvent::Resize(w, h) => Action::Resize(w, h),
            TuiEvent::Tick => Action::Tick,
        }
    }
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
        }
    }

    /// Block up to one tick for the next terminal event
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(TuiEvent::Key(key)),
                CrosstermEvent::Resize(w, h) => Ok(TuiEvent::Resize(w, h)),
                _ => Ok(TuiEvent::Tick),
            }
        } else {
            Ok(TuiEvent::Tick)
        }
    }
}
