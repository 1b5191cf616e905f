//! Step log pane

use super::framed;
use crate::step::StepLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Render the step log, keeping the newest line in view
pub fn render_log_pane(frame: &mut Frame, area: Rect, log: &StepLog) {
    let block = framed(&format!("Steps ({} total)", log.total_recorded()), false);

    if log.is_empty() {
        let paragraph = Paragraph::new("(no steps yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders
    let skip = log.len().saturating_sub(visible_height);
    let items: Vec<ListItem> = log
        .lines()
        .skip(skip)
        .map(|line| {
            let text_style = if line.text.starts_with("--") {
                Style::default().fg(DEFAULT_THEME.primary)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>5} ", line.number), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(line.text.clone(), text_style),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}
