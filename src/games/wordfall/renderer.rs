/// Wordfall renderer - draws the state, never touches it
use crate::core::audio::AudioSink;
use super::state::GameState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
    layout::{Layout, Constraint, Direction}
};

#[derive(Debug)]
pub struct WordfallRenderer;

impl WordfallRenderer {
    pub fn render<A: AudioSink>(frame: &mut Frame, state: &GameState<A>, input_focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Status
                Constraint::Min(0),    // Playfield
                Constraint::Length(3), // Input
            ])
            .split(frame.area());

        // Header
        let header = Paragraph::new("Catch the Falling Words! 🚀")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        Self::render_status(frame, state, chunks[1]);

        if state.is_game_over() {
            Self::render_game_over(frame, state, chunks[2]);
            // No input field while the game is over
            return;
        }

        Self::render_playfield(frame, state, chunks[2]);

        let input = Paragraph::new(state.typed_text())
            .block(Block::default().borders(Borders::ALL).title(" Type the words... "))
            .style(Style::default().fg(if input_focused { Color::White } else { Color::DarkGray }));
        frame.render_widget(input, chunks[3]);

        if input_focused {
            let typed = state.typed_text().chars().count() as u16;
            let max_x = chunks[3].right().saturating_sub(2);
            let x = (chunks[3].x + 1 + typed).min(max_x);
            frame.set_cursor_position((x, chunks[3].y + 1));
        }
    }

    fn render_status<A: AudioSink>(frame: &mut Frame, state: &GameState<A>, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let line = format!("Score: {} | Speed: {:.1}x", state.score(), state.fall_speed());
        let status = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(status, halves[0]);

        let (label, color) = if state.sound_enabled() {
            ("🔊 Sound On [F2]", Color::Green)
        } else {
            ("🔇 Sound Off [F2]", Color::DarkGray)
        };
        let sound = Paragraph::new(label)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(color))
            .alignment(Alignment::Center);
        frame.render_widget(sound, halves[1]);
    }

    fn render_playfield<A: AudioSink>(frame: &mut Frame, state: &GameState<A>, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let typed = state.typed_text();
        for falling in state.active_words() {
            let len = (falling.word.chars().count() as u16).min(inner.width);
            let rect = Rect::new(
                inner.x + lane(falling.id, inner.width - len),
                inner.y + row(falling.position, inner.height),
                len,
                1,
            );

            let style = if !typed.is_empty() && falling.word.to_lowercase().starts_with(typed) {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            frame.render_widget(Paragraph::new(falling.word.as_str()).style(style), rect);
        }
    }

    fn render_game_over<A: AudioSink>(frame: &mut Frame, state: &GameState<A>, area: Rect) {
        let popup = centered(area, 40, 6);
        frame.render_widget(Clear, popup);

        let text = format!(
            "Game Over! Final Score: {}\n\n[Enter] Play Again   [Esc] Quit",
            state.score()
        );
        let panel = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" GAME OVER "))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(panel, popup);
    }
}

/// Row inside a playfield of `height` rows for a word `position` percent down
fn row(position: f64, height: u16) -> u16 {
    let row = (position.max(0.0) / 100.0 * f64::from(height)) as u16;
    row.min(height - 1)
}

/// Stable column for a word, spread by spawn serial
fn lane(id: u64, span: u16) -> u16 {
    (id.wrapping_mul(7919) % (u64::from(span) + 1)) as u16
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::Cue;
    use crate::games::wordfall::config::GameConfig;
    use ratatui::backend::TestBackend;
    use rand::{rngs::StdRng, SeedableRng};

    struct Mute;

    impl AudioSink for Mute {
        fn play(&mut self, _cue: Cue) {}
        fn start_ambient(&mut self) {}
        fn stop_ambient(&mut self) {}
    }

    fn draw(state: &GameState<Mute>, focused: bool) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| WordfallRenderer::render(f, state, focused)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn state() -> GameState<Mute> {
        GameState::with_rng(GameConfig::default(), Mute, StdRng::seed_from_u64(3))
            .expect("default config is valid")
    }

    #[test]
    fn shows_header_status_and_words() {
        let mut state = state();
        state.spawn_word("challenge");
        state.match_input("chall");

        let lines = draw(&state, true);
        assert!(lines.iter().any(|l| l.contains("Catch the Falling Words!")));
        assert!(lines.iter().any(|l| l.contains("Score: 0 | Speed: 1.0x")));
        assert!(lines.iter().any(|l| l.contains("Sound Off")));
        assert!(lines.iter().any(|l| l.contains("challenge")));
        assert!(lines.iter().any(|l| l.contains("chall") && !l.contains("challenge")));
    }

    #[test]
    fn words_move_down_the_playfield() {
        let mut state = state();
        state.spawn_word("keyboard");
        let top = draw(&state, true).iter().position(|l| l.contains("keyboard")).unwrap();

        for _ in 0..60 {
            state.tick();
        }
        let lower = draw(&state, true).iter().position(|l| l.contains("keyboard")).unwrap();
        assert!(lower > top);
    }

    #[test]
    fn game_over_panel_replaces_playfield() {
        let mut state = state();
        state.spawn_word("react");
        state.match_input("react");
        state.spawn_word("game");
        for _ in 0..91 {
            state.tick();
        }

        let lines = draw(&state, false);
        assert!(lines.iter().any(|l| l.contains("Game Over! Final Score: 1")));
        assert!(lines.iter().any(|l| l.contains("Play Again")));
        assert!(!lines.iter().any(|l| l.contains("Type the words")));
    }

    #[test]
    fn row_and_lane_stay_inside_playfield() {
        assert_eq!(row(0.0, 20), 0);
        assert_eq!(row(50.0, 20), 10);
        assert_eq!(row(140.0, 20), 19);
        for id in 0..100 {
            assert!(lane(id, 12) <= 12);
        }
        assert_eq!(lane(5, 0), 0);
    }
}
