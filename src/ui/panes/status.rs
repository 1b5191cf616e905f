//! Status bar with keybindings and run state, plus the input bar

use crate::session::RunState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct StatusRenderData<'a> {
    pub panel: &'a str,
    pub message: &'a str,
    pub is_error: bool,
    pub state: RunState,
    pub delay_ms: u64,
    /// Panel specific key hints, e.g. `("1/2/3", "traverse")`
    pub hints: &'a [(&'a str, &'a str)],
}

fn state_color(state: RunState) -> Color {
    match state {
        RunState::Idle => DEFAULT_THEME.comment,
        RunState::Playing => DEFAULT_THEME.secondary,
        RunState::Paused => DEFAULT_THEME.border_focused,
        RunState::Done => DEFAULT_THEME.success,
        RunState::Aborted => DEFAULT_THEME.error,
    }
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left side: panel, run state and message
    let left_spans = vec![
        Span::styled(
            format!(" {} ", data.panel),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", data.state.label()),
            Style::default()
                .bg(state_color(data.state))
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}ms ", data.delay_ms),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let common: [(&str, &str); 6] = [
        ("⇥", "panel"),
        ("⎵", "run/pause"),
        ("esc", "stop"),
        ("g", "generate"),
        ("+/-", "speed"),
        ("q", "quit"),
    ];
    let mut right_spans = Vec::new();
    for (i, (key, desc)) in data.hints.iter().chain(common.iter()).enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
        }
        right_spans.push(Span::styled(format!(" {} ", key), key_style));
        right_spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}

/// One-line prompt used for values, keys and items
pub fn render_input_bar(frame: &mut Frame, area: Rect, label: &str, buffer: &str) {
    let block = Block::default()
        .title(format!(" {} (enter to submit, esc to cancel) ", label))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        );
    let line = Line::from(vec![
        Span::styled("> ", Style::default().fg(DEFAULT_THEME.secondary)),
        Span::styled(buffer.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
        Span::styled("█", Style::default().fg(DEFAULT_THEME.comment)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}
