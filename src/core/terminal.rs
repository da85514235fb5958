/// Terminal lifecycle: raw mode and alternate screen for as long as the guard lives
use ratatui::DefaultTerminal;
use tracing::info;

pub struct TerminalGuard {
    terminal: DefaultTerminal,
}

impl TerminalGuard {
    /// Enter raw mode + alternate screen. Restored on drop, whichever way we leave.
    pub fn new() -> Self {
        let terminal = ratatui::init();
        info!("terminal initialised");
        Self { terminal }
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
        info!("terminal restored");
    }
}
