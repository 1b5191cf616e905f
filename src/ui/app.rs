//! Main TUI application state and logic

use crate::engine::catalog;
use crate::engine::EngineError;
use crate::session::{InputAction, InputNeed, LinearMode, PanelKind, RunState, Runner, Session};
use crate::structures::bst::TraversalOrder;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Tabs,
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use super::panes::{self, ArrayRenderData, HashRenderData, StatusRenderData};
use super::theme::DEFAULT_THEME;

/// Longest the loop waits for a key before ticking the active run
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Steps in the sorting array size when resized from the keyboard
const ARRAY_SIZE_STEP: usize = 5;

/// Input being typed into the one-line input bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPrompt {
    pub action: InputAction,
    pub label: &'static str,
    pub buffer: String,
}

/// The main application state
pub struct App {
    pub session: Session,

    /// Open prompt, if the user is typing a value
    pub input: Option<InputPrompt>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Message overriding the panel status until the next key press
    pub status_message: Option<String>,

    /// Whether `status_message` reports an error
    pub is_error: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            input: None,
            should_quit: false,
            status_message: None,
            is_error: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.session.tick(Instant::now());

            // Fast runs need a shorter wait than the default poll interval
            let runner = self.session.current().runner();
            let timeout = if runner.is_running() {
                runner.speed().delay().min(POLL_INTERVAL)
            } else {
                POLL_INTERVAL
            };

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn set_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.is_error = false;
    }

    fn report(&mut self, result: Result<(), EngineError>) {
        if let Err(err) = result {
            self.status_message = Some(err.to_string());
            self.is_error = true;
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let mut constraints = vec![Constraint::Length(1), Constraint::Min(0)];
        if self.input.is_some() {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(1));
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(size);

        let tab_area = main_chunks[0];
        let pane_area = main_chunks[1];
        let status_area = main_chunks[main_chunks.len() - 1];

        self.render_tabs(frame, tab_area);

        // Structure on the left, info and step log on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(pane_area);
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        self.render_structure(frame, columns[0]);

        let panel = self.session.current();
        let entry = catalog::entry(panel.topic());
        panes::render_info_pane(frame, right_rows[0], &entry, &self.info_lines());
        panes::render_log_pane(frame, right_rows[1], panel.runner().log());

        if let Some(prompt) = &self.input {
            panes::render_input_bar(frame, main_chunks[2], prompt.label, &prompt.buffer);
        }

        let runner = panel.runner();
        let hints = self.hints();
        panes::render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                panel: panel.title(),
                message: self.status_message.as_deref().unwrap_or(panel.status()),
                is_error: self.is_error,
                state: runner.state(),
                delay_ms: runner.speed().millis(),
                hints: &hints,
            },
        );
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<&str> = PanelKind::ALL
            .iter()
            .map(|&kind| self.session.panel(kind).title())
            .collect();
        let selected = PanelKind::ALL
            .iter()
            .position(|&kind| kind == self.session.active())
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(DEFAULT_THEME.primary)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_structure(&self, frame: &mut Frame, area: Rect) {
        let session = &self.session;
        match session.active() {
            PanelKind::Sorting => {
                let vis = session.sorting.visualizer();
                let title = format!("{} ({} elements)", session.sorting.algorithm().name(), vis.structure().len());
                panes::render_array_pane(
                    frame,
                    area,
                    ArrayRenderData {
                        title: &title,
                        values: vis.structure().values(),
                        highlights: vis.highlights(),
                        show_labels: vis.structure().len() <= 20,
                    },
                );
            }
            PanelKind::Searching => {
                let vis = session.searching.visualizer();
                let title = match session.searching.target() {
                    Some(target) => format!("{} for {}", session.searching.algorithm().name(), target),
                    None => session.searching.algorithm().name().to_string(),
                };
                panes::render_array_pane(
                    frame,
                    area,
                    ArrayRenderData {
                        title: &title,
                        values: vis.structure().values(),
                        highlights: vis.highlights(),
                        show_labels: true,
                    },
                );
            }
            PanelKind::Tree => {
                let vis = session.tree.visualizer();
                panes::render_bst_pane(frame, area, vis.structure(), vis.highlights());
            }
            PanelKind::Heap => {
                let vis = session.heap.visualizer();
                panes::render_heap_pane(frame, area, vis.structure(), vis.highlights());
            }
            PanelKind::StackQueue => match session.linear.mode() {
                LinearMode::Stack => {
                    let vis = session.linear.stack();
                    panes::render_stack_pane(frame, area, vis.structure(), vis.highlights());
                }
                LinearMode::Queue => {
                    let vis = session.linear.queue();
                    panes::render_queue_pane(frame, area, vis.structure(), vis.highlights());
                }
            },
            PanelKind::HashTable => {
                let vis = session.hash.visualizer();
                panes::render_hash_pane(
                    frame,
                    area,
                    HashRenderData {
                        table: vis.structure(),
                        highlights: vis.highlights(),
                        last_probes: session.hash.last_probes(),
                    },
                );
            }
        }
    }

    /// Extra facts shown under the description
    fn info_lines(&self) -> Vec<String> {
        let session = &self.session;
        match session.active() {
            PanelKind::Sorting => vec![format!("Array size: {}", session.sorting.size())],
            PanelKind::Searching => vec![String::from(
                "Binary search needs sorted data; switching to it sorts the array.",
            )],
            PanelKind::Tree => {
                let order = session.tree.order();
                vec![format!("Traversal: {} ({})", order.name(), order.rule())]
            }
            PanelKind::Heap => {
                let heap = session.heap.visualizer().structure();
                match heap.peek() {
                    Some(root) => vec![format!("Root: {}", root)],
                    None => Vec::new(),
                }
            }
            PanelKind::StackQueue => match session.linear.mode() {
                LinearMode::Stack => {
                    let top = session.linear.stack().structure().top().unwrap_or("-");
                    vec![format!("Top: {}", top)]
                }
                LinearMode::Queue => {
                    let queue = session.linear.queue().structure();
                    vec![format!(
                        "Front: {}  Rear: {}",
                        queue.front().unwrap_or("-"),
                        queue.rear().unwrap_or("-")
                    )]
                }
            },
            PanelKind::HashTable => vec![session.hash.stats().to_string()],
        }
    }

    fn hints(&self) -> Vec<(&'static str, &'static str)> {
        match self.session.active() {
            PanelKind::Sorting => vec![("a", "algorithm"), ("[/]", "size"), ("r", "reset")],
            PanelKind::Searching => vec![("a", "algorithm"), ("f", "find")],
            PanelKind::Tree => vec![("i/d/f", "insert/delete/find"), ("1/2/3", "traverse")],
            PanelKind::Heap => vec![("i/d", "insert/remove root"), ("a", "max/min")],
            PanelKind::StackQueue => vec![("i/d", "add/remove"), ("a", "stack/queue")],
            PanelKind::HashTable => vec![("i/d/f", "insert/delete/find"), ("h/c", "hash/collision"), ("[/]", "size")],
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.input.is_some() {
            self.handle_input_key(key);
            return;
        }
        self.status_message = None;
        self.is_error = false;

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => self.session.next_panel(),
            KeyCode::BackTab => self.session.prev_panel(),
            KeyCode::Char(' ') => {
                let panel = self.session.current_mut();
                if panel.runner().is_running() {
                    panel.runner_mut().toggle_pause();
                    if panel.runner().state() == RunState::Paused {
                        self.set_message("Paused");
                    }
                } else {
                    panel.start();
                }
            }
            KeyCode::Esc => self.session.current_mut().cancel(),
            KeyCode::Char('a') => self.session.current_mut().cycle_mode(),
            KeyCode::Char('g') => self.session.generate(),
            KeyCode::Char('r') => self.session.current_mut().reset(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let runner = self.session.current_mut().runner_mut();
                runner.set_speed(runner.speed().faster());
            }
            KeyCode::Char('-') => {
                let runner = self.session.current_mut().runner_mut();
                runner.set_speed(runner.speed().slower());
            }
            KeyCode::Char('i') => self.begin_action(InputAction::Insert),
            KeyCode::Char('d') => self.begin_action(InputAction::Delete),
            KeyCode::Char('f') => self.begin_action(InputAction::Find),
            KeyCode::Char(c @ '1'..='3') if self.session.active() == PanelKind::Tree => {
                let order = match c {
                    '1' => TraversalOrder::Inorder,
                    '2' => TraversalOrder::Preorder,
                    _ => TraversalOrder::Postorder,
                };
                self.session.tree.traverse(order);
            }
            KeyCode::Char('h') if self.session.active() == PanelKind::HashTable => {
                let result = self.session.hash.cycle_function();
                self.report(result);
            }
            KeyCode::Char('c') if self.session.active() == PanelKind::HashTable => {
                let result = self.session.hash.cycle_strategy();
                self.report(result);
            }
            KeyCode::Char(c @ ('[' | ']')) => self.resize(c == ']'),
            _ => {}
        }
    }

    fn resize(&mut self, grow: bool) {
        let result = match self.session.active() {
            PanelKind::HashTable => self.session.hash.resize_by(if grow { 1 } else { -1 }),
            PanelKind::Sorting => {
                let size = self.session.sorting.size();
                let size = if grow {
                    size + ARRAY_SIZE_STEP
                } else {
                    size.saturating_sub(ARRAY_SIZE_STEP)
                };
                self.session.resize_array(size)
            }
            _ => Ok(()),
        };
        self.report(result);
    }

    fn begin_action(&mut self, action: InputAction) {
        match self.session.current().input_need(action) {
            InputNeed::Unsupported => self.set_message("Not available on this panel"),
            InputNeed::Immediate => {
                let result = self.session.current_mut().submit(action, "").map(drop);
                self.report(result);
            }
            InputNeed::Prompt(label) => {
                self.input = Some(InputPrompt {
                    action,
                    label,
                    buffer: String::new(),
                });
            }
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.input.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) => prompt.buffer.push(c),
            KeyCode::Backspace => {
                prompt.buffer.pop();
            }
            KeyCode::Esc => self.input = None,
            KeyCode::Enter => {
                if let Some(prompt) = self.input.take() {
                    self.status_message = None;
                    let result = self
                        .session
                        .current_mut()
                        .submit(prompt.action, &prompt.buffer)
                        .map(drop);
                    self.report(result);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        let config = Config {
            seed: Some(3),
            ..Config::default()
        };
        App::new(Session::new(&config).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_tab_cycles_panels() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session.active(), PanelKind::Searching);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.session.active(), PanelKind::HashTable);
    }

    #[test]
    fn test_insert_prompt_submits_to_panel() {
        let mut app = app();
        app.session.switch_to(PanelKind::HashTable);
        press(&mut app, KeyCode::Char('i'));
        assert!(app.input.is_some());
        type_text(&mut app, "14:x");
        press(&mut app, KeyCode::Enter);
        assert!(app.input.is_none());
        assert!(app.session.hash.visualizer().is_running());
    }

    #[test]
    fn test_invalid_input_reports_error() {
        let mut app = app();
        app.session.switch_to(PanelKind::Tree);
        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Enter);
        assert!(app.is_error);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("Invalid input")));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
