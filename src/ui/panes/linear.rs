//! Stack and queue panes

use super::framed;
use crate::session::Highlights;
use crate::structures::{Queue, Stack};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

fn item_style(index: usize, highlights: &Highlights) -> Style {
    match highlights.mark(index) {
        Some(mark) => Style::default()
            .fg(DEFAULT_THEME.mark(Some(mark)))
            .add_modifier(Modifier::BOLD),
        None => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Stack drawn top-down, top element first
pub fn render_stack_pane(frame: &mut Frame, area: Rect, stack: &Stack, highlights: &Highlights) {
    let block = framed(&format!("Stack ({} items)", stack.len()), true);
    if stack.is_empty() {
        let paragraph = Paragraph::new("(empty stack) press i to push")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }
    let top = stack.len() - 1;
    let items: Vec<ListItem> = stack
        .items()
        .iter()
        .enumerate()
        .rev()
        .map(|(i, item)| {
            let mut spans = vec![Span::styled(format!("│ {:^8} │", item), item_style(i, highlights))];
            if i == top {
                spans.push(Span::styled(" ← top", Style::default().fg(DEFAULT_THEME.comment)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

/// Queue drawn left to right from front to rear
pub fn render_queue_pane(frame: &mut Frame, area: Rect, queue: &Queue, highlights: &Highlights) {
    let block = framed(&format!("Queue ({} items)", queue.len()), true);
    if queue.is_empty() {
        let paragraph = Paragraph::new("(empty queue) press i to enqueue")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }
    let sep = Style::default().fg(DEFAULT_THEME.comment);
    let mut spans = vec![Span::styled("front → ", sep)];
    for (i, item) in queue.items().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", sep));
        }
        spans.push(Span::styled(item.to_string(), item_style(i, highlights)));
    }
    spans.push(Span::styled(" ← rear", sep));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
