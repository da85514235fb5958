/// Wordfall: catch the falling words by typing them
pub mod config;
pub mod game;
pub mod renderer;
pub mod state;

pub use config::GameConfig;
pub use game::{WordfallGame, WordfallTimer};
pub use renderer::WordfallRenderer;
pub use state::{FallingWord, GameState, TickReport};
