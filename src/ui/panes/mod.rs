//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by the structure being drawn.
//!
//! # Pane Modules
//!
//! - [`array`]: bars for the sorting and searching arrays
//! - [`tree`]: sideways drawing of the BST and the heap
//! - [`hash`]: hash table slots, chains and statistics
//! - [`linear`]: stack and queue
//! - [`info`]: description and complexity table of the active topic
//! - [`log`]: bounded history of applied steps
//! - [`status`]: status bar with keybindings and run state, input bar
//!
//! Panes never mutate anything. Colors come from the highlights collected
//! while the steps were applied.

pub mod array;
pub mod hash;
pub mod info;
pub mod linear;
pub mod log;
pub mod status;
pub mod tree;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

pub use array::{render_array_pane, ArrayRenderData};
pub use hash::{render_hash_pane, HashRenderData};
pub use info::render_info_pane;
pub use linear::{render_queue_pane, render_stack_pane};
pub use log::render_log_pane;
pub use status::{render_input_bar, render_status_bar, StatusRenderData};
pub use tree::{render_bst_pane, render_heap_pane};

/// Bordered block with a title; the structure pane gets the focused border
fn framed(title: &str, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style)
}
