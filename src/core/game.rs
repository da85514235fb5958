/// Core game interface for the wordfall runtime
use std::fmt::Debug;
use std::time::Duration;

use crossterm::event::KeyEvent;

/// How an armed timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Fires every period, first one period after arming
    Every(Duration),
    /// Fires once after the delay, then disarms itself
    After(Duration),
}

/// A timer the game wants driven in its current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSpec<T> {
    pub id: T,
    pub cadence: Cadence,
}

impl<T> TimerSpec<T> {
    pub fn every(id: T, period: Duration) -> Self {
        Self { id, cadence: Cadence::Every(period) }
    }

    pub fn after(id: T, delay: Duration) -> Self {
        Self { id, cadence: Cadence::After(delay) }
    }
}

/// What the loop should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main game trait that every game run by the engine implements.
/// The engine owns the clock; the game only says which timers belong to its
/// current phase and reacts when they fire.
pub trait Game {
    /// Identifier for the timers this game schedules
    type Timer: Copy + Eq + Debug;

    /// Timers that must be armed while the current epoch lasts
    fn schedule(&self) -> Vec<TimerSpec<Self::Timer>>;

    /// Changes whenever the armed timer set has to be torn down and rebuilt
    fn epoch(&self) -> u64;

    fn on_timer(&mut self, timer: Self::Timer);

    fn handle_key(&mut self, key: KeyEvent) -> Flow;

    /// Render the current state into the Ratatui Frame
    fn render(&self, frame: &mut ratatui::Frame);
}
