//! Event handling for the TUI
//!
//! Provides an async event stream that combines terminal input events
//! (keyboard, mouse) with render ticks, plus the key-to-command dispatch
//! table. Editor commands use modifier chords so plain keystrokes stay
//! available to the text surface.

use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers,
};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tracing::debug;

/// Application events
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Terminal input event
    Input(InputEvent),
    /// Render tick
    Tick,
}

/// Input events from the terminal
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key press
    Key(KeyEvent),
    /// Mouse event
    Mouse(crossterm::event::MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Chrome-level commands triggered by modifier chords
///
/// Keys that do not match a command fall through to the editor. Each
/// command carries no captured state; the app binds it to the selected
/// tab when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Open a new empty tab
    NewTab,
    /// Save the selected tab
    Save,
    /// Save the selected tab to a newly chosen path
    SaveAs,
    /// Close the selected tab (with confirmation if unsaved)
    CloseTab,
    /// Select the next tab
    NextTab,
    /// Select the previous tab
    PrevTab,
    /// Open the theme picker
    PickTheme,
    /// Show help
    ShowHelp,
    /// Save the session and quit
    Quit,
}

impl UserCommand {
    /// Convert a key event to a chrome command
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('n') if ctrl => Some(UserCommand::NewTab),
            KeyCode::Char('s') if ctrl && alt => Some(UserCommand::SaveAs),
            KeyCode::Char('s') if ctrl => Some(UserCommand::Save),
            KeyCode::Char('w') if ctrl => Some(UserCommand::CloseTab),
            KeyCode::Char('t') if ctrl => Some(UserCommand::PickTheme),
            KeyCode::Char('q') if ctrl => Some(UserCommand::Quit),
            KeyCode::Right if alt => Some(UserCommand::NextTab),
            KeyCode::Left if alt => Some(UserCommand::PrevTab),
            KeyCode::PageDown if ctrl => Some(UserCommand::NextTab),
            KeyCode::PageUp if ctrl => Some(UserCommand::PrevTab),
            KeyCode::F(1) => Some(UserCommand::ShowHelp),
            _ => None,
        }
    }
}

/// Event loop handle
pub struct EventLoop {
    /// Sender for events
    tx: mpsc::Sender<AppEvent>,
    /// Receiver for events
    rx: mpsc::Receiver<AppEvent>,
}

impl EventLoop {
    /// Create a new event loop
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(256);
        Self { tx, rx }
    }

    /// Get a sender for posting events
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }

    /// Start the event loop
    ///
    /// Spawns background tasks for terminal input and render ticks.
    pub fn start(&mut self, tick_rate: Duration) {
        let tx = self.tx.clone();

        // Terminal input task - single long-running reader
        tokio::spawn(async move {
            let mut reader = EventStream::new();

            loop {
                let event = reader.next().fuse().await;

                match event {
                    Some(Ok(event)) => {
                        let app_event = match event {
                            CrosstermEvent::Key(key) => AppEvent::Input(InputEvent::Key(key)),
                            CrosstermEvent::Mouse(mouse) => {
                                AppEvent::Input(InputEvent::Mouse(mouse))
                            }
                            CrosstermEvent::Resize(w, h) => {
                                AppEvent::Input(InputEvent::Resize(w, h))
                            }
                            _ => continue,
                        };

                        if tx.send(app_event).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("Error reading terminal event: {}", e);
                        continue;
                    }
                    None => break,
                }
            }
        });

        // Render tick task
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_rate);

            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick).await.is_err() {
                    break;
                }
            }
        });
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}
