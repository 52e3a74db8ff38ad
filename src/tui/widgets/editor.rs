//! Editor widget
//!
//! A plain-text editing surface. The content string lives in the tab's
//! record; the widget state only carries the cursor and scroll position,
//! so switching tabs swaps surfaces without copying text.
//!
//! The cursor is a char index into the content. All edits go through
//! [`EditorState::handle_key`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Paragraph, Widget},
};

/// Per-tab editor state
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorState {
    /// Cursor position as a char index into the content
    pub cursor: usize,
    /// First visible line
    pub scroll: u16,
}

impl EditorState {
    /// Create a state with the cursor at the start
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key to the content; returns whether anything changed
    pub fn handle_key(&mut self, content: &mut String, key: KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }

        self.clamp_cursor(content);

        match key.code {
            KeyCode::Char(c) => {
                let at = byte_index(content, self.cursor);
                content.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Enter => {
                let at = byte_index(content, self.cursor);
                content.insert(at, '\n');
                self.cursor += 1;
                true
            }
            KeyCode::Tab => {
                let at = byte_index(content, self.cursor);
                content.insert_str(at, "    ");
                self.cursor += 4;
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = byte_index(content, self.cursor);
                    content.remove(at);
                    true
                } else {
                    false
                }
            }
            KeyCode::Delete => {
                if self.cursor < content.chars().count() {
                    let at = byte_index(content, self.cursor);
                    content.remove(at);
                    true
                } else {
                    false
                }
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                true
            }
            KeyCode::Right => {
                if self.cursor < content.chars().count() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Up => {
                let (line, col) = self.line_col(content);
                if line > 0 {
                    self.cursor = index_at(content, line - 1, col);
                }
                true
            }
            KeyCode::Down => {
                let (line, col) = self.line_col(content);
                self.cursor = index_at(content, line + 1, col);
                true
            }
            KeyCode::Home => {
                let (line, _) = self.line_col(content);
                self.cursor = index_at(content, line, 0);
                true
            }
            KeyCode::End => {
                let (line, _) = self.line_col(content);
                self.cursor = index_at(content, line, usize::MAX);
                true
            }
            _ => false,
        }
    }

    /// The cursor's (line, column) in the content
    pub fn line_col(&self, content: &str) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for c in content.chars().take(self.cursor) {
            if c == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Keep the cursor line inside the visible window
    pub fn ensure_visible(&mut self, content: &str, height: u16) {
        if height == 0 {
            return;
        }
        let (line, _) = self.line_col(content);
        let line = line as u16;

        if line < self.scroll {
            self.scroll = line;
        } else if line >= self.scroll + height {
            self.scroll = line - height + 1;
        }
    }

    /// Clamp the cursor after external content changes
    pub fn clamp_cursor(&mut self, content: &str) {
        let len = content.chars().count();
        if self.cursor > len {
            self.cursor = len;
        }
    }
}

/// Char index of (line, col), clamping both to the content
fn index_at(content: &str, line: usize, col: usize) -> usize {
    let mut index = 0;
    for (i, text) in content.split('\n').enumerate() {
        let len = text.chars().count();
        if i == line {
            return index + col.min(len);
        }
        index += len + 1;
    }
    // Past the last line: clamp to the end
    content.chars().count()
}

/// Byte offset of a char index
fn byte_index(content: &str, char_index: usize) -> usize {
    content
        .char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(content.len())
}

/// Editor widget rendering a tab's content with its document style
pub struct Editor<'a> {
    content: &'a str,
    style: Style,
    scroll: u16,
    block: Option<Block<'a>>,
}

impl<'a> Editor<'a> {
    /// Create an editor over the given content
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            style: Style::default(),
            scroll: 0,
            block: None,
        }
    }

    /// Set the document style (theme background/foreground)
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the scroll offset
    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    /// Set the block
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for Editor<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paint the whole surface with the theme background first; the
        // paragraph only covers cells that hold text.
        buf.set_style(area, self.style);

        let paragraph = Paragraph::new(Text::raw(self.content))
            .style(self.style)
            .scroll((self.scroll, 0));

        let paragraph = if let Some(block) = self.block {
            paragraph.block(block)
        } else {
            paragraph
        };

        paragraph.render(area, buf);
    }
}
