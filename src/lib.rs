pub mod core {
	pub mod audio;
	pub mod engine;
	pub mod game;
	pub mod scheduler;
	pub mod terminal;
}

pub mod games;

// Re-export for convenience
pub use crate::core::game::{Cadence, Flow, Game, TimerSpec};
