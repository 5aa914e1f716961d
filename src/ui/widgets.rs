//! Custom widgets for the lernkarten TUI.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph, Widget},
};

use super::theme::Theme;

// ══════════════════════════════════════════════════════════════════════════
// Title Bar Widget
// ══════════════════════════════════════════════════════════════════════════

/// Full-width app bar with a centered title.
pub struct TitleBar<'a> {
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> TitleBar<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self { title, theme }
    }
}

impl Widget for TitleBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paint the whole bar in the brand color, title centered on top.
        Block::default()
            .style(Style::default().bg(self.theme.colors.primary))
            .render(area, buf);

        Paragraph::new(Line::from(Span::styled(self.title, self.theme.title())))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Navigation Button Widget
// ══════════════════════════════════════════════════════════════════════════

/// A bordered, labeled button box. The key that activates it is shown
/// in the border title.
pub struct NavButton<'a> {
    label: &'a str,
    key: &'a str,
    theme: &'a Theme,
}

impl<'a> NavButton<'a> {
    pub fn new(label: &'a str, key: &'a str, theme: &'a Theme) -> Self {
        Self { label, key, theme }
    }
}

impl Widget for NavButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.accent))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.key, self.theme.key_highlight()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        // Center the label vertically inside the box
        let vertical_padding = inner.height.saturating_sub(1) / 2;
        let label_area = Rect {
            y: inner.y + vertical_padding,
            height: inner.height.saturating_sub(vertical_padding).max(1),
            ..inner
        };

        Paragraph::new(Line::from(Span::styled(self.label, self.theme.button())))
            .alignment(Alignment::Center)
            .render(label_area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Placeholder Widget
// ══════════════════════════════════════════════════════════════════════════

/// Body of a screen that exists but has no behavior yet.
pub struct Placeholder<'a> {
    title: &'a str,
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> Placeholder<'a> {
    pub fn new(title: &'a str, message: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            message,
            theme,
        }
    }
}

impl Widget for Placeholder<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.text_dim))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(self.title, self.theme.button()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(self.message, self.theme.placeholder())),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", self.theme.key_hint()),
                Span::styled("Esc", self.theme.key_highlight()),
                Span::styled(" to go back", self.theme.key_hint()),
            ]),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Key Hints Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .hints
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(*key, self.theme.key_highlight()),
                    Span::styled(format!(" {} ", desc), self.theme.key_hint()),
                    Span::styled("│ ", Style::default().fg(self.theme.colors.text_dim)),
                ]
            })
            .collect();

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
