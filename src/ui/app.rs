//! Main application state and logic.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Clear},
    Frame,
};

use super::theme::Theme;
use super::widgets::{KeyHints, NavButton, Placeholder, TitleBar};
use crate::config::Config;
use crate::nav::{Navigator, Screen};

/// Title shown in the app bar on every screen.
pub const APP_TITLE: &str = "Изучаем немецкий";

/// Label of the home screen's navigation button.
pub const CARDS_BUTTON: &str = "Карточки";

/// Body text of the unfinished cards screen.
const CARDS_PLACEHOLDER: &str = "Этот экран ещё в разработке";

// ══════════════════════════════════════════════════════════════════════════
// Application State
// ══════════════════════════════════════════════════════════════════════════

pub struct App {
    pub running: bool,

    // Navigation
    pub nav: Navigator,

    // Theme
    pub theme: Theme,
}

impl App {
    pub fn new(config: Config) -> Self {
        let theme = Theme::from_name(&config.theme);

        Self {
            running: true,
            nav: Navigator::new(),
            theme,
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event Handling
    // ══════════════════════════════════════════════════════════════════════

    pub fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.nav.current() {
                    Screen::Home => self.handle_home_keys(key.code),
                    Screen::Cards => self.handle_cards_keys(key.code),
                }
            }
        }
        Ok(())
    }

    fn handle_home_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Enter => {
                self.nav.push(Screen::Cards);
            }
            _ => {}
        }
    }

    fn handle_cards_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                self.nav.back();
            }
            _ => {}
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Rendering
    // ══════════════════════════════════════════════════════════════════════

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Clear with background
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.bg_dark)),
            area,
        );

        match self.nav.current() {
            Screen::Home => self.render_home(frame, area),
            Screen::Cards => self.render_cards(frame, area),
        }
    }

    fn render_home(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(1),   // Title bar
            Constraint::Length(1),   // Spacing
            Constraint::Min(7),      // Button
            Constraint::Length(2),   // Hints
        ])
        .split(area);

        // Title bar
        frame.render_widget(TitleBar::new(APP_TITLE, &self.theme), chunks[0]);

        // Cards button, centered in the body
        let rows = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(chunks[2]);
        let button_area = centered_rect(30, 100, rows[1]);

        frame.render_widget(
            NavButton::new(CARDS_BUTTON, "Enter", &self.theme),
            button_area,
        );

        // Key hints
        let hints = KeyHints::new(&[("Enter", "open"), ("q", "quit")], &self.theme);
        frame.render_widget(hints, chunks[3]);
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(1),   // Title bar
            Constraint::Min(5),      // Body
        ])
        .split(area);

        frame.render_widget(TitleBar::new(APP_TITLE, &self.theme), chunks[0]);

        let body = centered_rect(60, 60, chunks[1]);
        frame.render_widget(
            Placeholder::new(CARDS_BUTTON, CARDS_PLACEHOLDER, &self.theme),
            body,
        );
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ══════════════════════════════════════════════════════════════════════════

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

// ══════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn test_app() -> App {
        App::new(Config::default())
    }

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn render_once(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn starts_with_only_home_on_stack() {
        let app = test_app();
        assert_eq!(app.nav.screens(), &[Screen::Home]);
    }

    #[test]
    fn enter_pushes_cards_screen() {
        let mut app = test_app();
        app.handle_home_keys(KeyCode::Enter);
        assert_eq!(app.nav.screens(), &[Screen::Home, Screen::Cards]);
        assert_eq!(app.nav.current(), Screen::Cards);
    }

    #[test]
    fn home_renders_title_bar_text() {
        let mut app = test_app();
        let text = render_once(&mut app);
        assert!(text.contains(APP_TITLE));
    }

    #[test]
    fn home_renders_cards_button_label() {
        let mut app = test_app();
        let text = render_once(&mut app);
        assert!(text.contains(CARDS_BUTTON));
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut app = test_app();
        let first = render_once(&mut app);
        let second = render_once(&mut app);
        assert_eq!(first, second);
    }

    #[test]
    fn rendering_never_mutates_the_stack() {
        let mut app = test_app();
        for _ in 0..3 {
            render_once(&mut app);
        }
        assert_eq!(app.nav.screens(), &[Screen::Home]);
    }

    #[test]
    fn cards_screen_renders_its_title() {
        let mut app = test_app();
        app.handle_home_keys(KeyCode::Enter);
        let text = render_once(&mut app);
        assert!(text.contains(CARDS_BUTTON));
        assert!(text.contains(APP_TITLE));
    }

    #[test]
    fn esc_on_cards_returns_home() {
        let mut app = test_app();
        app.handle_home_keys(KeyCode::Enter);
        app.handle_cards_keys(KeyCode::Esc);
        assert_eq!(app.nav.screens(), &[Screen::Home]);
    }

    #[test]
    fn other_keys_on_home_leave_the_stack_alone() {
        let mut app = test_app();
        app.handle_home_keys(KeyCode::Char('x'));
        app.handle_home_keys(KeyCode::Tab);
        assert_eq!(app.nav.screens(), &[Screen::Home]);
        assert!(app.running);
    }

    #[test]
    fn q_quits_from_home() {
        let mut app = test_app();
        app.handle_home_keys(KeyCode::Char('q'));
        assert!(!app.running);
    }
}
