//! Hash table pane: one row per slot

use super::framed;
use crate::session::Highlights;
use crate::structures::HashTable;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

pub struct HashRenderData<'a> {
    pub table: &'a HashTable,
    pub highlights: &'a Highlights,
    pub last_probes: Option<usize>,
}

fn slot_line(index: usize, table: &HashTable, highlights: &Highlights) -> Line<'static> {
    let mark = highlights.mark(index);
    let color = DEFAULT_THEME.mark(mark);
    let mut spans = vec![Span::styled(
        format!("[{:>2}] ", index),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    let bucket = table.bucket(index);
    if bucket.is_empty() {
        spans.push(Span::styled("-", Style::default().fg(DEFAULT_THEME.comment)));
    }
    for (position, entry) in bucket.iter().enumerate() {
        if position > 0 {
            spans.push(Span::styled(" → ", Style::default().fg(DEFAULT_THEME.comment)));
        }
        let style = if mark.is_some() {
            Style::default().fg(color)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        spans.push(Span::styled(format!("{}:{}", entry.key, entry.value), style));
    }
    Line::from(spans)
}

pub fn render_hash_pane(frame: &mut Frame, area: Rect, data: HashRenderData) {
    let title = format!(
        "Hash Table ({} hashing, {})",
        data.table.function().name(),
        data.table.strategy().name()
    );
    let block = framed(&title, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let items: Vec<ListItem> = (0..data.table.size())
        .map(|i| ListItem::new(slot_line(i, data.table, data.highlights)))
        .collect();
    frame.render_widget(List::new(items), rows[0]);

    let mut footer = data.table.stats().to_string();
    if let Some(probes) = data.last_probes {
        footer.push_str(&format!(" | last op: {} probes", probes));
    }
    frame.render_widget(
        Paragraph::new(footer).style(Style::default().fg(DEFAULT_THEME.comment)),
        rows[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::{CollisionStrategy, Entry, HashFunction};

    #[test]
    fn test_chain_is_joined_with_arrows() {
        let mut table = HashTable::new(7, HashFunction::Division, CollisionStrategy::Chaining).unwrap();
        table.insert(Entry::new(7, "a")).unwrap();
        table.insert(Entry::new(14, "b")).unwrap();
        let line = slot_line(0, &table, &Highlights::new());
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "[ 0] 7:a → 14:b");
    }
}
