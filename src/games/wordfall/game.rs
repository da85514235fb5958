use crate::core::audio::AudioSink;
use crate::{Flow, Game, TimerSpec};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::renderer::WordfallRenderer;
use super::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordfallTimer {
    Spawn,
    Fall,
    /// Hands focus back to the input field shortly after a reset
    Focus,
}

/// Binds the game state to the runtime: timers, keys, and drawing
pub struct WordfallGame<A: AudioSink> {
    state: GameState<A>,
    /// Field contents as typed; the state only keeps the lowercased form
    input: String,
    input_focused: bool,
}

impl<A: AudioSink> WordfallGame<A> {
    pub fn new(state: GameState<A>) -> Self {
        // Focused from the start
        Self { state, input: String::new(), input_focused: true }
    }

    pub fn state(&self) -> &GameState<A> {
        &self.state
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    fn edit_input(&mut self, edit: impl FnOnce(&mut String)) {
        edit(&mut self.input);
        if self.state.match_input(&self.input) {
            self.input.clear();
        }
    }
}

impl<A: AudioSink> Game for WordfallGame<A> {
    type Timer = WordfallTimer;

    fn schedule(&self) -> Vec<TimerSpec<WordfallTimer>> {
        // Nothing runs while the game is over; reset brings a fresh set
        if self.state.is_game_over() {
            return Vec::new();
        }

        let config = self.state.config();
        let mut timers = vec![
            TimerSpec::every(WordfallTimer::Spawn, config.spawn_interval()),
            TimerSpec::every(WordfallTimer::Fall, config.fall_interval()),
        ];
        if !self.input_focused {
            timers.push(TimerSpec::after(WordfallTimer::Focus, config.focus_delay()));
        }
        timers
    }

    fn epoch(&self) -> u64 {
        self.state.resets() * 2 + u64::from(self.state.is_game_over())
    }

    fn on_timer(&mut self, timer: WordfallTimer) {
        match timer {
            WordfallTimer::Spawn => {
                self.state.spawn();
            }
            WordfallTimer::Fall => {
                if self.state.tick().game_over {
                    // The input field goes away with the playfield
                    self.input_focused = false;
                }
            }
            WordfallTimer::Focus => self.input_focused = true,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::F(2) {
            self.state.toggle_sound();
            return Flow::Continue;
        }

        if self.state.is_game_over() {
            if key.code == KeyCode::Enter {
                debug!(score = self.state.score(), "play again");
                self.state.reset();
                self.input.clear();
                self.input_focused = false;
            }
            return Flow::Continue;
        }

        if !self.input_focused {
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.edit_input(|text| text.push(c));
            }
            KeyCode::Backspace => {
                self.edit_input(|text| {
                    text.pop();
                });
            }
            _ => {}
        }
        Flow::Continue
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        WordfallRenderer::render(frame, &self.state, self.input_focused);
    }
}
