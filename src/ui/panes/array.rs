//! Array pane: one vertical bar per element

use super::framed;
use crate::session::Highlights;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};

/// Data needed to render an array as bars
pub struct ArrayRenderData<'a> {
    pub title: &'a str,
    pub values: &'a [i64],
    pub highlights: &'a Highlights,
    /// Print each value under its bar; only readable for short arrays
    pub show_labels: bool,
}

/// Bar width and gap that fit `count` bars into `width` columns
fn bar_layout(count: usize, width: u16) -> (u16, u16) {
    let count = count.max(1) as u16;
    let gap = if width >= count * 3 { 1 } else { 0 };
    let bar_width = (width.saturating_sub(gap * count.saturating_sub(1)) / count).max(1);
    (bar_width, gap)
}

pub fn render_array_pane(frame: &mut Frame, area: Rect, data: ArrayRenderData) {
    let block = framed(data.title, true);

    if data.values.is_empty() {
        let paragraph = Paragraph::new("(empty array)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    // Bars are measured from the smallest value so negatives still draw
    let floor = data.values.iter().copied().min().unwrap_or(0).min(0);
    let bars: Vec<Bar> = data
        .values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let color = DEFAULT_THEME.mark(data.highlights.mark(i));
            let height = (value - floor + 1).max(1) as u64;
            let bar = Bar::default()
                .value(height)
                .text_value(if data.show_labels {
                    value.to_string()
                } else {
                    String::new()
                })
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(Color::Black).bg(color));
            if data.show_labels {
                bar.label(Line::from(i.to_string()))
            } else {
                bar
            }
        })
        .collect();

    let (bar_width, bar_gap) = bar_layout(data.values.len(), area.width.saturating_sub(2));
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .label_style(Style::default().fg(DEFAULT_THEME.comment));
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_layout_fits_width() {
        assert_eq!(bar_layout(10, 100), (9, 1));
        let (width, gap) = bar_layout(100, 80);
        assert_eq!((width, gap), (1, 0));
        assert_eq!(bar_layout(0, 10), (10, 1));
    }
}
