//! Info pane: description and complexity table of the active topic

use super::framed;
use crate::engine::catalog::CatalogEntry;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_info_pane(frame: &mut Frame, area: Rect, entry: &CatalogEntry, extra: &[String]) {
    let block = framed(entry.title, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let table_height = entry.rows.len() as u16 + 1;
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(table_height)])
        .split(inner);

    let mut lines = vec![Line::styled(entry.description, Style::default().fg(DEFAULT_THEME.fg))];
    if !extra.is_empty() {
        lines.push(Line::default());
        lines.extend(
            extra
                .iter()
                .map(|text| Line::styled(text.clone(), Style::default().fg(DEFAULT_THEME.secondary))),
        );
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), parts[0]);

    let header = Row::new(entry.columns.iter().copied()).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );
    let rows = entry
        .rows
        .iter()
        .map(|row| Row::new(row.iter().copied()).style(Style::default().fg(DEFAULT_THEME.fg)));
    let widths = vec![Constraint::Fill(1); entry.columns.len()];
    frame.render_widget(Table::new(rows, widths).header(header), parts[1]);
}
