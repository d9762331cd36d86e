//! Status bar rendering with keybindings and phase indicator

use crate::session::Phase;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub phase: Phase,
    pub writes: usize,
    pub is_input: bool,
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (phase_text, phase_color) = match data.phase {
        Phase::Intact => (" INTACT ", DEFAULT_THEME.success),
        Phase::Corrupted => (" CORRUPTED ", DEFAULT_THEME.secondary),
        Phase::Exploited => (" EXPLOITED ", DEFAULT_THEME.error),
    };

    let left_spans = vec![
        Span::styled(
            phase_text,
            Style::default()
                .bg(phase_color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" writes: {} ", data.writes),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let right_spans = if data.is_input {
        vec![
            Span::styled(" ↵ ", key_style),
            Span::styled(" write ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled(" esc ", key_style),
            Span::styled(" cancel ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(
                " ⌨ INPUT ",
                Style::default()
                    .bg(DEFAULT_THEME.secondary)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
        ]
    } else {
        vec![
            Span::styled(" 1-4 ", key_style),
            Span::styled(" menu ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled(" ⇥ ", key_style),
            Span::styled(" focus ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled(" ↑/↓ ", key_style),
            Span::styled(" scroll ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ", desc_style),
            Span::styled("q", key_style),
            Span::styled(" quit ", desc_style),
        ]
    };

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
