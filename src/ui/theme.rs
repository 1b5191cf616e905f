use crate::session::Mark;
use ratatui::style::Color;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub bar: Color,
    pub comparing: Color,
    pub swapping: Color,
    pub current: Color,
    pub checked: Color,
    pub in_range: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for the status bar
    bar: Color::Rgb(137, 180, 250),            // Blue for untouched elements
    comparing: Color::Rgb(249, 226, 175),      // Yellow
    swapping: Color::Rgb(243, 139, 168),       // Red
    current: Color::Rgb(245, 194, 231),        // Pink
    checked: Color::Rgb(88, 91, 112),          // Dim grey
    in_range: Color::Rgb(148, 226, 213),       // Cyan/teal for the search bracket
};

impl Theme {
    /// Color for an element carrying `mark`
    pub fn mark(&self, mark: Option<Mark>) -> Color {
        match mark {
            None => self.bar,
            Some(Mark::Comparing) => self.comparing,
            Some(Mark::Swapping) => self.swapping,
            Some(Mark::Current) => self.current,
            Some(Mark::Probing) => self.secondary,
            Some(Mark::Found) | Some(Mark::Sorted) => self.success,
            Some(Mark::Checked) => self.checked,
            Some(Mark::InRange) => self.in_range,
        }
    }
}
