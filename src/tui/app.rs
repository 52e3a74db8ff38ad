//! Main TUI application
//!
//! Event-driven application that coordinates:
//! - Terminal rendering with ratatui
//! - User input handling
//! - The session manager's close/save/theme flows via modal dialogs

use std::collections::HashMap;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, MouseButton, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tracing::{debug, info};

use super::event::{AppEvent, EventLoop, InputEvent, UserCommand};
use super::theme::ChromePalette;
use super::widgets::{Editor, EditorState, TabBar, TabBarItem, hit_test};
use crate::config::Config;
use crate::error::{Result, TuiError};
use crate::session::{CloseDecision, CloseOutcome, SaveOutcome, SessionManager, TabId, Theme};

/// What to do with the path entered in the save-path modal
///
/// Each intent carries its own tab id, so no modal outcome depends on
/// which tab happens to be selected when the user confirms.
#[derive(Debug, Clone, Copy)]
pub enum PathIntent {
    /// First save of a tab with no bound path
    Save { tab_id: TabId },
    /// Save-as: always rebinds the tab's path
    SaveAs { tab_id: TabId },
    /// Save chosen during a close prompt; closes the tab on success
    CloseAfterSave { tab_id: TabId },
}

impl PathIntent {
    fn tab_id(&self) -> TabId {
        match self {
            PathIntent::Save { tab_id }
            | PathIntent::SaveAs { tab_id }
            | PathIntent::CloseAfterSave { tab_id } => *tab_id,
        }
    }
}

/// Modal dialog state
#[derive(Debug, Clone)]
pub enum Modal {
    /// No modal open
    None,
    /// Three-way close prompt: save / discard / cancel
    ConfirmClose { tab_id: TabId, title: String },
    /// Path input for save, save-as, or save-then-close
    SavePath { intent: PathIntent, value: String },
    /// Theme picker over the fixed theme table
    ThemePicker { index: usize },
    /// Help modal
    Help,
    /// Error modal
    Error { message: String },
}

/// Application UI state
pub struct AppUiState {
    /// Current modal
    pub modal: Modal,
    /// Per-tab editor cursor/scroll state
    pub editors: HashMap<TabId, EditorState>,
    /// Status message
    pub status_message: Option<String>,
    /// Last rendered editor area (for cursor placement)
    pub editor_area: Rect,
    /// Should quit
    pub should_quit: bool,
}

impl Default for AppUiState {
    fn default() -> Self {
        Self {
            modal: Modal::None,
            editors: HashMap::new(),
            status_message: None,
            editor_area: Rect::default(),
            should_quit: false,
        }
    }
}

/// Main TUI application
pub struct App {
    /// Configuration
    config: Config,
    /// Session manager (headless core)
    manager: SessionManager,
    /// Chrome palette for the current terminal
    palette: ChromePalette,
    /// UI state
    ui_state: AppUiState,
    /// Event loop
    event_loop: EventLoop,
}

impl App {
    /// Create a new application over a loaded session
    pub fn new(config: Config, manager: SessionManager) -> Self {
        Self {
            config,
            manager,
            palette: ChromePalette::default(),
            ui_state: AppUiState::default(),
            event_loop: EventLoop::new(),
        }
    }

    /// Run the application until the user quits
    pub async fn run(&mut self) -> Result<()> {
        let tick_rate = Duration::from_millis(1000 / self.config.ui_refresh_fps.max(1) as u64);
        self.event_loop.start(tick_rate);

        let mut terminal = self.setup_terminal()?;

        info!("Entering main loop");
        let result = self.main_loop(&mut terminal).await;

        self.restore_terminal(&mut terminal)?;
        result
    }

    /// Setup terminal for TUI
    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| TuiError::InitFailed(e.to_string()))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| TuiError::InitFailed(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| TuiError::InitFailed(e.to_string()))?;

        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        terminal
            .show_cursor()
            .map_err(|e| TuiError::RestoreFailed(e.to_string()))?;

        Ok(())
    }

    /// Main event loop
    async fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| TuiError::RenderError(e.to_string()))?;

            if let Some(event) = self.event_loop.next().await {
                match event {
                    AppEvent::Input(input) => self.handle_input(input),
                    AppEvent::Tick => {}
                }
            }

            if self.ui_state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(size);

        self.ui_state.editor_area = chunks[1];

        self.render_tab_bar(frame, chunks[0]);
        self.render_editor(frame, chunks[1]);
        self.render_status_bar(frame, chunks[2]);
        self.render_modal(frame, size);
    }

    /// Render the tab bar
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let items = self.tab_bar_items();
        frame.render_widget(TabBar::new(&items, &self.palette), area);
    }

    /// Render the selected tab's editing surface
    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        let Some(id) = self.manager.selected_id() else {
            let placeholder = Paragraph::new("No open tabs. Ctrl+N creates one.")
                .style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(placeholder, area);
            return;
        };
        let Some(tab) = self.manager.get_tab(id) else {
            return;
        };

        let style = self.palette.document_style(tab.theme);
        let editor_state = self.ui_state.editors.entry(id).or_default();
        editor_state.clamp_cursor(&tab.content);
        editor_state.ensure_visible(&tab.content, area.height);

        let scroll = editor_state.scroll;
        frame.render_widget(Editor::new(&tab.content).style(style).scroll(scroll), area);

        // Place the terminal cursor when no modal owns the keyboard
        if matches!(self.ui_state.modal, Modal::None) {
            let (line, col) = editor_state.line_col(&tab.content);
            let x = area.x + (col as u16).min(area.width.saturating_sub(1));
            let y = area.y + (line as u16).saturating_sub(scroll);
            if y < area.y + area.height {
                frame.set_cursor_position((x, y));
            }
        }
    }

    /// Render status bar
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status = if let Some(ref msg) = self.ui_state.status_message {
            msg.clone()
        } else {
            let theme = self
                .manager
                .selected_tab()
                .map(|t| t.theme)
                .unwrap_or_else(|| self.manager.selected_theme());
            format!(
                " {} tabs | {} | ^N new  ^S save  ^W close  ^T theme  F1 help  ^Q quit",
                self.manager.registry().len(),
                theme.name()
            )
        };

        let paragraph = Paragraph::new(status).style(self.palette.status_bar());
        frame.render_widget(paragraph, area);
    }

    /// Render modal overlay
    fn render_modal(&self, frame: &mut Frame, area: Rect) {
        match &self.ui_state.modal {
            Modal::None => {}

            Modal::ConfirmClose { title, .. } => {
                let modal_area = centered_rect(50, 20, area);
                frame.render_widget(Clear, modal_area);

                let block = Block::default()
                    .title(" Save Changes? ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.modal_warning));

                let inner = block.inner(modal_area);
                frame.render_widget(block, modal_area);

                let text = format!(
                    "\"{}\" has unsaved changes.\n\n[y] Save  [n] Discard  [Esc] Cancel",
                    title
                );
                frame.render_widget(Paragraph::new(text), inner);
            }

            Modal::SavePath { value, .. } => {
                let modal_area = centered_rect(60, 20, area);
                frame.render_widget(Clear, modal_area);

                let block = Block::default()
                    .title(" Save As ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.modal_info));

                let inner = block.inner(modal_area);
                frame.render_widget(block, modal_area);

                let text = format!(
                    "Enter destination path (.txt added if no extension):\n\n> {}_",
                    value
                );
                frame.render_widget(Paragraph::new(text), inner);
            }

            Modal::ThemePicker { index } => {
                let modal_area = centered_rect(40, 40, area);
                frame.render_widget(Clear, modal_area);

                let block = Block::default()
                    .title(" Themes ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.modal_info));

                let inner = block.inner(modal_area);
                frame.render_widget(block, modal_area);

                let lines: Vec<String> = Theme::ALL
                    .iter()
                    .enumerate()
                    .map(|(i, theme)| {
                        let marker = if i == *index { ">" } else { " " };
                        format!("{} {}", marker, theme.name())
                    })
                    .collect();
                let text = format!(
                    "{}\n\n[Enter] Apply to current tab  [Esc] Cancel",
                    lines.join("\n")
                );
                frame.render_widget(Paragraph::new(text), inner);
            }

            Modal::Error { message } => {
                let modal_area = centered_rect(60, 20, area);
                frame.render_widget(Clear, modal_area);

                let block = Block::default()
                    .title(" Error ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.modal_error));

                let inner = block.inner(modal_area);
                frame.render_widget(block, modal_area);

                let text = format!("{}\n\nPress any key to close.", message);
                frame.render_widget(Paragraph::new(text), inner);
            }

            Modal::Help => {
                let modal_area = centered_rect(60, 70, area);
                frame.render_widget(Clear, modal_area);

                let block = Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.modal_info));

                let inner = block.inner(modal_area);
                frame.render_widget(block, modal_area);

                let help_text = r#"
Tabs:
  Ctrl+N          New tab
  Ctrl+W          Close tab (asks about unsaved changes)
  Alt+Left/Right  Previous / next tab
  Mouse click     Select tab; middle click closes

Files:
  Ctrl+S          Save
  Ctrl+Alt+S      Save as

Themes:
  Ctrl+T          Pick a theme for the current tab

Other:
  F1              This help
  Ctrl+Q          Save session and quit

The session (all tabs, their files and themes) is restored
on the next launch.

Press any key to close this help.
"#;
                frame.render_widget(Paragraph::new(help_text), inner);
            }
        }
    }

    /// Items for the tab bar, in display order
    fn tab_bar_items(&self) -> Vec<TabBarItem> {
        let selected = self.manager.selected_id();
        self.manager
            .registry()
            .iter()
            .map(|tab| TabBarItem {
                id: tab.id,
                title: tab.title.clone(),
                selected: Some(tab.id) == selected,
            })
            .collect()
    }

    /// Handle input events
    fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::Key(key) => {
                // Check for modal-specific handling first
                if !matches!(self.ui_state.modal, Modal::None) {
                    self.handle_modal_key(key);
                    return;
                }

                self.ui_state.status_message = None;

                if let Some(cmd) = UserCommand::from_key(key) {
                    self.handle_command(cmd);
                } else {
                    self.handle_editor_key(key);
                }
            }
            InputEvent::Mouse(mouse) => {
                if matches!(self.ui_state.modal, Modal::None) {
                    self.handle_mouse(mouse);
                }
            }
            InputEvent::Resize(_, _) => {
                // Terminal will re-render automatically
            }
        }
    }

    /// Handle mouse events on the tab bar
    ///
    /// Hit-testing is explicit: clicks that resolve to no tab are dropped
    /// with a trace, never treated as the nearest tab. Middle click goes
    /// through the same confirmation flow as every other close path.
    fn handle_mouse(&mut self, mouse: crossterm::event::MouseEvent) {
        // Row 0 is the tab bar
        if mouse.row != 0 {
            return;
        }

        let items = self.tab_bar_items();
        let hit = hit_test(&items, mouse.column);

        match (mouse.kind, hit) {
            (MouseEventKind::Down(MouseButton::Left), Some(id)) => {
                self.manager.select_tab(id);
            }
            (MouseEventKind::Down(MouseButton::Middle), Some(id)) => {
                self.request_close(id);
            }
            (MouseEventKind::Down(_), None) => {
                debug!("Tab bar click at column {} hit no tab", mouse.column);
            }
            _ => {}
        }
    }

    /// Handle a key while a modal is open
    fn handle_modal_key(&mut self, key: crossterm::event::KeyEvent) {
        use crossterm::event::KeyCode;

        match &mut self.ui_state.modal {
            Modal::ConfirmClose { tab_id, .. } => {
                let tab_id = *tab_id;
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('s') => {
                        self.ui_state.modal = Modal::None;
                        self.resolve_close(tab_id, CloseDecision::Save);
                    }
                    KeyCode::Char('n') | KeyCode::Char('d') => {
                        self.ui_state.modal = Modal::None;
                        self.resolve_close(tab_id, CloseDecision::Discard);
                    }
                    KeyCode::Esc => {
                        self.ui_state.modal = Modal::None;
                        self.resolve_close(tab_id, CloseDecision::Cancel);
                    }
                    _ => {}
                }
            }

            Modal::SavePath { intent, value } => match key.code {
                KeyCode::Enter => {
                    let intent = *intent;
                    let value = value.clone();
                    self.ui_state.modal = Modal::None;
                    self.submit_save_path(intent, value);
                }
                KeyCode::Esc => {
                    // Declining the dialog aborts only this action
                    self.ui_state.modal = Modal::None;
                    self.ui_state.status_message = Some("Save cancelled".to_string());
                }
                KeyCode::Backspace => {
                    value.pop();
                }
                KeyCode::Char(c) => {
                    value.push(c);
                }
                _ => {}
            },

            Modal::ThemePicker { index } => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    *index = (*index + Theme::ALL.len() - 1) % Theme::ALL.len();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *index = (*index + 1) % Theme::ALL.len();
                }
                KeyCode::Enter => {
                    let theme = Theme::ALL[*index];
                    self.ui_state.modal = Modal::None;
                    if let Err(e) = self.manager.apply_theme(theme) {
                        self.show_error(format!("Failed to persist theme choice: {}", e));
                    } else {
                        self.ui_state.status_message =
                            Some(format!("Theme: {}", theme.name()));
                    }
                }
                KeyCode::Esc => {
                    self.ui_state.modal = Modal::None;
                }
                _ => {}
            },

            Modal::Help | Modal::Error { .. } => {
                // Any key closes help/error
                self.ui_state.modal = Modal::None;
            }

            Modal::None => {}
        }
    }

    /// Handle a chrome command
    fn handle_command(&mut self, cmd: UserCommand) {
        match cmd {
            UserCommand::NewTab => {
                let id = self.manager.create_tab(None, String::new(), None);
                self.ui_state.editors.insert(id, EditorState::new());
            }
            UserCommand::Save => {
                if let Some(id) = self.manager.selected_id() {
                    match self.manager.save_tab(id) {
                        Ok(SaveOutcome::Saved(path)) => {
                            self.ui_state.status_message =
                                Some(format!("Saved to {}", path.display()));
                        }
                        Ok(SaveOutcome::NeedsPath) => {
                            self.open_save_path_modal(PathIntent::Save { tab_id: id });
                        }
                        Err(e) => self.show_error(format!("Save failed: {}", e)),
                    }
                }
            }
            UserCommand::SaveAs => {
                if let Some(id) = self.manager.selected_id() {
                    self.open_save_path_modal(PathIntent::SaveAs { tab_id: id });
                }
            }
            UserCommand::CloseTab => {
                if let Some(id) = self.manager.selected_id() {
                    self.request_close(id);
                }
            }
            UserCommand::NextTab => self.manager.select_next(),
            UserCommand::PrevTab => self.manager.select_prev(),
            UserCommand::PickTheme => {
                let current = self
                    .manager
                    .selected_tab()
                    .map(|t| t.theme)
                    .unwrap_or_else(|| self.manager.selected_theme());
                let index = Theme::ALL.iter().position(|t| *t == current).unwrap_or(0);
                self.ui_state.modal = Modal::ThemePicker { index };
            }
            UserCommand::ShowHelp => {
                self.ui_state.modal = Modal::Help;
            }
            UserCommand::Quit => match self.manager.save_session() {
                Ok(()) => {
                    self.ui_state.should_quit = true;
                }
                Err(e) => self.show_error(format!("Failed to save session: {}", e)),
            },
        }
    }

    /// Route a plain key to the selected tab's editor
    fn handle_editor_key(&mut self, key: crossterm::event::KeyEvent) {
        let Some(id) = self.manager.selected_id() else {
            return;
        };
        let Some(tab) = self.manager.get_tab_mut(id) else {
            return;
        };

        let editor = self.ui_state.editors.entry(id).or_default();
        editor.handle_key(&mut tab.content, key);
    }

    /// Begin closing a tab; prompts when there is unsaved content
    fn request_close(&mut self, id: TabId) {
        match self.manager.close_tab(id) {
            Ok(CloseOutcome::Closed) => {
                self.ui_state.editors.remove(&id);
            }
            Ok(CloseOutcome::NeedsDecision) => {
                let title = self
                    .manager
                    .get_tab(id)
                    .map(|t| t.title.clone())
                    .unwrap_or_default();
                self.manager.select_tab(id);
                self.ui_state.modal = Modal::ConfirmClose { tab_id: id, title };
            }
            Ok(_) => {}
            Err(e) => self.show_error(format!("Close failed: {}", e)),
        }
    }

    /// Apply the user's close-prompt decision
    fn resolve_close(&mut self, id: TabId, decision: CloseDecision) {
        match self.manager.resolve_close(id, decision) {
            Ok(CloseOutcome::Closed) => {
                self.ui_state.editors.remove(&id);
            }
            Ok(CloseOutcome::NeedsPath) => {
                self.open_save_path_modal(PathIntent::CloseAfterSave { tab_id: id });
            }
            Ok(CloseOutcome::Cancelled) | Ok(CloseOutcome::NeedsDecision) => {}
            Err(e) => {
                // Write failure aborts only this close; the tab stays open
                self.show_error(format!("Save failed: {}", e));
            }
        }
    }

    /// Open the save-path modal, prefilled with the tab's bound path
    fn open_save_path_modal(&mut self, intent: PathIntent) {
        let value = self
            .manager
            .get_tab(intent.tab_id())
            .and_then(|t| t.path.as_ref())
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.ui_state.modal = Modal::SavePath { intent, value };
    }

    /// Act on the path entered in the save-path modal
    ///
    /// An empty path counts as cancelling the dialog. A path without an
    /// extension gets the suggested `.txt`.
    fn submit_save_path(&mut self, intent: PathIntent, value: String) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.ui_state.status_message = Some("Save cancelled".to_string());
            return;
        }

        let mut path = PathBuf::from(trimmed);
        if path.extension().is_none() {
            path.set_extension("txt");
        }

        let result = match intent {
            PathIntent::Save { tab_id } | PathIntent::SaveAs { tab_id } => {
                self.manager.save_tab_at(tab_id, path.clone())
            }
            PathIntent::CloseAfterSave { tab_id } => self
                .manager
                .resolve_close_with_path(tab_id, path.clone())
                .map(|_| {
                    self.ui_state.editors.remove(&tab_id);
                }),
        };

        match result {
            Ok(()) => {
                self.ui_state.status_message = Some(format!("Saved to {}", path.display()));
            }
            Err(e) => self.show_error(format!("Save failed: {}", e)),
        }
    }

    fn show_error(&mut self, message: String) {
        self.ui_state.modal = Modal::Error { message };
    }
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
