//! Menu pane: the four choices, the value prompt, and the win banner

use crate::session::Phase;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CHOICES: [(&str, &str); 4] = [
    ("1", "Update Buffer1"),
    ("2", "Print Buffers"),
    ("3", "Check everything is okay"),
    ("4", "Exit"),
];

/// Data needed to render the menu pane
pub struct MenuRenderData<'a> {
    pub phase: Phase,
    /// Text typed so far when the value prompt is open
    pub input: Option<&'a str>,
}

/// Render the menu pane
pub fn render_menu_pane(frame: &mut Frame, area: Rect, data: MenuRenderData) {
    let block = Block::default()
        .title(" What do you want to do? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let mut lines: Vec<Line> = Vec::new();

    if data.phase == Phase::Exploited {
        lines.push(Line::from(Span::styled(
            "You Win! Buffer2 has been tampered with.",
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "Press q to quit.",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    } else if let Some(input) = data.input {
        lines.push(Line::from(Span::styled(
            "Enter the new value for Buffer1:",
            Style::default().fg(DEFAULT_THEME.fg),
        )));
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(input.to_string(), Style::default().fg(DEFAULT_THEME.input)),
            Span::styled(
                "_",
                Style::default()
                    .fg(DEFAULT_THEME.input)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("{} byte(s) + terminator", input.len()),
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    } else {
        for (key, label) in CHOICES {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {} ", key),
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(label, Style::default().fg(DEFAULT_THEME.fg)),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
