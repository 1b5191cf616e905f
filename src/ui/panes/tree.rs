//! Tree pane: BST and heap drawn sideways
//!
//! The root sits at the left edge and every level is indented one step
//! further. Right children are printed above their parent and left children
//! below, so tilting your head to the left shows the usual picture.

use super::framed;
use crate::session::Highlights;
use crate::structures::heap::{left, right};
use crate::structures::{BinaryHeap, Bst, NodeId};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

const INDENT: &str = "      ";

/// A node as the sideways printer sees it: the highlight key, its label and children
struct Shape {
    key: usize,
    label: String,
    right: Option<usize>,
    left: Option<usize>,
}

fn sideways<F>(shape_of: &F, node: usize, depth: usize, highlights: &Highlights, out: &mut Vec<Line<'static>>)
where
    F: Fn(usize) -> Option<Shape>,
{
    let Some(shape) = shape_of(node) else {
        return;
    };
    if let Some(child) = shape.right {
        sideways(shape_of, child, depth + 1, highlights, out);
    }
    let connector = if depth == 0 { "" } else { "── " };
    let mut style = Style::default().fg(DEFAULT_THEME.mark(highlights.mark(shape.key)));
    if highlights.mark(shape.key).is_some() {
        style = style.add_modifier(Modifier::BOLD);
    }
    out.push(Line::from(vec![
        Span::styled(
            format!("{}{}", INDENT.repeat(depth), connector),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(shape.label, style),
    ]));
    if let Some(child) = shape.left {
        sideways(shape_of, child, depth + 1, highlights, out);
    }
}

/// Lines of the sideways drawing of `tree`
pub fn bst_lines(tree: &Bst, highlights: &Highlights) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let shape_of = |index: usize| {
        tree.node(NodeId::from_index(index)).map(|node| Shape {
            key: index,
            label: node.value.to_string(),
            right: node.right.map(NodeId::index),
            left: node.left.map(NodeId::index),
        })
    };
    if let Some(root) = tree.root() {
        sideways(&shape_of, root.index(), 0, highlights, &mut lines);
    }
    lines
}

/// Lines of the sideways drawing of `heap`, keyed by array index
pub fn heap_lines(heap: &BinaryHeap, highlights: &Highlights) -> Vec<Line<'static>> {
    let values = heap.values();
    let mut lines = Vec::new();
    let shape_of = |i: usize| {
        values.get(i).map(|value| Shape {
            key: i,
            label: value.to_string(),
            right: Some(right(i)).filter(|&r| r < values.len()),
            left: Some(left(i)).filter(|&l| l < values.len()),
        })
    };
    if !values.is_empty() {
        sideways(&shape_of, 0, 0, highlights, &mut lines);
    }
    lines
}

pub fn render_bst_pane(frame: &mut Frame, area: Rect, tree: &Bst, highlights: &Highlights) {
    let title = format!("Binary Search Tree ({} nodes, height {})", tree.len(), tree.height());
    let block = framed(&title, true);
    if tree.is_empty() {
        let paragraph = Paragraph::new("(empty tree) press i to insert")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }
    let items: Vec<ListItem> = bst_lines(tree, highlights).into_iter().map(ListItem::new).collect();
    frame.render_widget(List::new(items).block(block), area);
}

pub fn render_heap_pane(frame: &mut Frame, area: Rect, heap: &BinaryHeap, highlights: &Highlights) {
    let title = format!("{} Heap ({} values)", heap.kind().name(), heap.len());
    let block = framed(&title, true);
    if heap.is_empty() {
        let paragraph = Paragraph::new("(empty heap) press i to insert")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let items: Vec<ListItem> = heap_lines(heap, highlights).into_iter().map(ListItem::new).collect();
    frame.render_widget(List::new(items), rows[0]);

    // Backing array underneath the tree
    let mut spans = vec![Span::styled("array: ", Style::default().fg(DEFAULT_THEME.comment))];
    for (i, value) in heap.values().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", Style::default()));
        }
        spans.push(Span::styled(
            value.to_string(),
            Style::default().fg(DEFAULT_THEME.mark(highlights.mark(i))),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::HeapKind;

    fn texts(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_bst_drawn_right_side_up_when_tilted() {
        let tree = Bst::from_values(&[5, 3, 8]);
        let lines = texts(&bst_lines(&tree, &Highlights::new()));
        assert_eq!(lines, vec![format!("{}── 8", INDENT), "5".to_string(), format!("{}── 3", INDENT)]);
    }

    #[test]
    fn test_heap_lines_cover_every_value() {
        let heap = BinaryHeap::from_values(HeapKind::Max, &[9, 4, 7, 1]);
        let lines = heap_lines(&heap, &Highlights::new());
        assert_eq!(lines.len(), 4);
        assert_eq!(texts(&lines)[1], "9");
    }
}
