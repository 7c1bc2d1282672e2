//! Full-viewport blocking screen.
//!
//! The screen has no dismiss affordance: every key and mouse event is
//! swallowed, and the only thing that changes what is drawn is a resize.

use crossterm::event::{Event, KeyEvent};
use envguard_scorer::Locale;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

/// What the surface should do after an input event reached the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Consumed with no visible effect.
    Swallowed,
    /// The viewport changed; draw again.
    Redraw,
}

/// Fixed, localized text shown to whoever operates a blocked runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMessage {
    pub title: &'static str,
    pub lines: &'static [&'static str],
}

const MESSAGE_RU: BlockMessage = BlockMessage {
    title: "Доступ заблокирован",
    lines: &[
        "Приложение не может работать в эмуляторе или виртуальной среде.",
        "Запустите его на физическом устройстве.",
    ],
};

const MESSAGE_EN: BlockMessage = BlockMessage {
    title: "Access blocked",
    lines: &[
        "This application cannot run in an emulator or a virtual environment.",
        "Please start it on a physical device.",
    ],
};

impl BlockMessage {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Ru => MESSAGE_RU,
            Locale::En => MESSAGE_EN,
        }
    }
}

const PANEL_WIDTH: u16 = 72;
const PANEL_HEIGHT: u16 = 9;

#[derive(Debug, Clone, Copy)]
pub struct BlockScreen {
    message: BlockMessage,
}

impl BlockScreen {
    pub fn new(locale: Locale) -> Self {
        Self {
            message: BlockMessage::for_locale(locale),
        }
    }

    /// Every key is swallowed, including Ctrl+C, Esc and function keys.
    pub fn handle_key_event(&self, _key_event: KeyEvent) -> EventOutcome {
        EventOutcome::Swallowed
    }

    pub fn handle_event(&self, event: &Event) -> EventOutcome {
        match event {
            Event::Key(key_event) => self.handle_key_event(*key_event),
            Event::Resize(..) => EventOutcome::Redraw,
            // Mouse clicks (including the context-menu button), focus and paste.
            _ => EventOutcome::Swallowed,
        }
    }
}

impl Widget for &BlockScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        Block::default()
            .style(Style::default().bg(Color::Black))
            .render(area, buf);

        let [row] = Layout::vertical([Constraint::Length(PANEL_HEIGHT.min(area.height))])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::horizontal([Constraint::Length(PANEL_WIDTH.min(area.width))])
            .flex(Flex::Center)
            .areas(row);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", self.message.title))
            .title_alignment(Alignment::Center);
        let inner = block.inner(panel);
        block.render(panel, buf);

        let mut lines = vec![Line::from("")];
        lines.extend(
            self.message
                .lines
                .iter()
                .map(|line| Line::from(*line).style(Style::default().fg(Color::White).bold())),
        );

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
