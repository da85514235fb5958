use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::core::audio::{AudioSink, Cue};
use crate::games::wordfall::config::{ConfigError, GameConfig};

/// A vocabulary entry on its way down
#[derive(Debug, Clone, PartialEq)]
pub struct FallingWord {
    /// Spawn serial, unique within a `GameState`
    pub id: u64,
    pub word: String,
    /// Percent fallen; starts at 0 and only grows
    pub position: f64,
}

/// What a single fall tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Words removed for passing the boundary
    pub crossed: usize,
    /// The game-over transition fired on this tick
    pub game_over: bool,
    pub sped_up: bool,
}

/// The whole game: one record, mutated only through the transition methods
/// below. Each method runs to completion, so callers never see a half-applied
/// tick.
#[derive(Debug)]
pub struct GameState<A: AudioSink> {
    config: GameConfig,
    audio: A,
    rng: StdRng,
    active_words: Vec<FallingWord>,
    typed_text: String,
    score: u32,
    fall_speed: f64,
    is_game_over: bool,
    sound_enabled: bool,
    game_over_latch: bool,
    next_id: u64,
    resets: u64,
}

impl<A: AudioSink> GameState<A> {
    pub fn new(config: GameConfig, audio: A) -> Result<Self, ConfigError> {
        Self::with_rng(config, audio, StdRng::from_os_rng())
    }

    /// Rejects any config `GameConfig::validate` would, so spawn and tick
    /// never see an empty vocabulary or a zero milestone.
    pub fn with_rng(config: GameConfig, audio: A, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = Self {
            fall_speed: config.initial_speed,
            sound_enabled: config.sound,
            config,
            audio,
            rng,
            active_words: Vec::new(),
            typed_text: String::new(),
            score: 0,
            is_game_over: false,
            game_over_latch: false,
            next_id: 0,
            resets: 0,
        };
        if state.sound_enabled {
            state.audio.start_ambient();
        }
        Ok(state)
    }

    /// Drop a random vocabulary word in at the top. No-op once the game is over.
    pub fn spawn(&mut self) -> Option<&FallingWord> {
        if self.is_game_over {
            return None;
        }
        let index = self.rng.random_range(0..self.config.vocabulary.len());
        let word = self.config.vocabulary[index].clone();
        self.spawn_word(word)
    }

    /// Drop a specific word in at the top. No-op once the game is over.
    pub fn spawn_word(&mut self, word: impl Into<String>) -> Option<&FallingWord> {
        if self.is_game_over {
            return None;
        }
        let falling = FallingWord { id: self.next_id, word: word.into(), position: 0.0 };
        self.next_id += 1;
        debug!(id = falling.id, word = %falling.word, "spawned word");
        self.active_words.push(falling);
        self.active_words.last()
    }

    /// Advance every word by the current fall speed, drop the ones past the
    /// boundary, and ramp the speed on score milestones.
    pub fn tick(&mut self) -> TickReport {
        if self.is_game_over {
            return TickReport::default();
        }

        let speed = self.fall_speed;
        let boundary = self.config.boundary;
        let before = self.active_words.len();
        self.active_words.retain_mut(|w| {
            w.position += speed;
            w.position <= boundary
        });

        let mut report = TickReport {
            crossed: before - self.active_words.len(),
            ..TickReport::default()
        };

        if report.crossed > 0 && !self.game_over_latch {
            self.game_over_latch = true;
            self.is_game_over = true;
            self.audio.stop_ambient();
            if self.sound_enabled {
                self.audio.play(Cue::GameOver);
            }
            report.game_over = true;
            info!(
                score = self.score,
                speed = self.fall_speed,
                crossed = report.crossed,
                "game over"
            );
        }

        // Re-evaluated on every tick, not once per milestone
        if self.score > 0 && self.score % self.config.milestone == 0 {
            self.fall_speed += self.config.speed_step;
            report.sped_up = true;
            debug!(score = self.score, speed = self.fall_speed, "fall speed increased");
        }

        report
    }

    /// Feed the full contents of the input field. Returns true on a catch.
    pub fn match_input(&mut self, input: &str) -> bool {
        if self.is_game_over {
            return false;
        }

        self.typed_text = input.to_lowercase();
        let Some(index) = self
            .active_words
            .iter()
            .position(|w| w.word.to_lowercase() == self.typed_text)
        else {
            return false;
        };

        if self.sound_enabled {
            self.audio.play(Cue::Correct);
        }
        let caught = self.active_words.remove(index);
        self.score += 1;
        self.typed_text.clear();
        debug!(id = caught.id, word = %caught.word, score = self.score, "caught word");
        true
    }

    /// Back to a fresh game. Sound preference survives.
    pub fn reset(&mut self) {
        self.active_words.clear();
        self.typed_text.clear();
        self.score = 0;
        self.fall_speed = self.config.initial_speed;
        self.is_game_over = false;
        self.game_over_latch = false;
        self.resets += 1;
        if self.sound_enabled {
            self.audio.start_ambient();
        }
        info!(resets = self.resets, "game reset");
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
        if self.sound_enabled {
            self.audio.start_ambient();
        } else {
            self.audio.stop_ambient();
        }
        debug!(enabled = self.sound_enabled, "sound toggled");
    }

    pub fn active_words(&self) -> &[FallingWord] {
        &self.active_words
    }

    pub fn typed_text(&self) -> &str {
        &self.typed_text
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn fall_speed(&self) -> f64 {
        self.fall_speed
    }

    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn game_over_latched(&self) -> bool {
        self.game_over_latch
    }

    /// Number of resets so far; identifies the current play session
    pub fn resets(&self) -> u64 {
        self.resets
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}
