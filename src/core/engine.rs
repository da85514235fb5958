use crate::core::game::{Flow, Game};
use crate::core::scheduler::Scheduler;
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// A game together with the timers of its current phase.
/// Every dispatch runs to completion before the next one starts, so the game
/// never observes another transition half-done.
pub struct Session<G: Game> {
    game: G,
    timers: Scheduler<G::Timer>,
    armed_epoch: Option<u64>,
}

impl<G: Game> Session<G> {
    pub fn new(game: G) -> Self {
        let mut session = Self { game, timers: Scheduler::new(), armed_epoch: None };
        session.sync_timers();
        session
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn timers(&self) -> &Scheduler<G::Timer> {
        &self.timers
    }

    /// Re-arm from the game's schedule if its epoch moved since the last arm
    pub fn sync_timers(&mut self) {
        let epoch = self.game.epoch();
        if self.armed_epoch == Some(epoch) {
            return;
        }
        let specs = self.game.schedule();
        debug!(epoch, timers = specs.len(), "arming timers");
        self.timers.arm(specs, Instant::now());
        self.armed_epoch = Some(epoch);
    }

    /// Wait for the next timer, hand it to the game, return which one fired
    pub async fn next_timer(&mut self) -> G::Timer {
        let timer = self.timers.next().await;
        self.game.on_timer(timer);
        self.sync_timers();
        timer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let flow = self.game.handle_key(key);
        self.sync_timers();
        flow
    }
}

pub struct Engine<G: Game> {
    session: Session<G>,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { session: Session::new(game) }
    }

    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();
        let mut frames = tokio::time::interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("engine started");

        loop {
            terminal.draw(|f| self.session.game().render(f))?;

            tokio::select! {
                // 1. INPUT: keyboard events from the terminal
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if is_quit(&key) || self.session.handle_key(key) == Flow::Quit {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },

                // 2. FRAME: redraw even when nothing else happens
                _ = frames.tick() => {}

                // 3. TIMERS: whatever the game armed for its current phase
                _ = self.session.next_timer() => {}
            }
        }

        // Session (and every armed timer) is dropped with self
        info!("engine stopped");
        Ok(())
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esc_and_ctrl_c_quit() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn plain_typing_does_not_quit() {
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }
}
