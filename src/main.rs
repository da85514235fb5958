use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;
use wordfall::core::audio::TerminalAudio;
use wordfall::core::engine::Engine;
use wordfall::core::terminal::TerminalGuard;
use wordfall::games::wordfall::{GameConfig, GameState, WordfallGame};

#[tokio::main]
async fn main() -> Result<()> {
    // Usage: wordfall [CONFIG.json]
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    // stdout belongs to the TUI, so logs go to a file
    let log_path = std::env::temp_dir().join("wordfall.log");
    let log_file = File::create(&log_path)
        .with_context(|| format!("creating log file {}", log_path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = GameConfig::load(config_path.as_deref())?;
    info!(words = config.vocabulary.len(), sound = config.sound, "config loaded");

    let state = GameState::new(config, TerminalAudio::new())?;
    let game = WordfallGame::new(state);

    let mut guard = TerminalGuard::new();
    let result = Engine::new(game).run(guard.terminal()).await;
    drop(guard);

    result
}
