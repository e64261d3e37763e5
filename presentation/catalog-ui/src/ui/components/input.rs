use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling a key event in an input component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Key was handled by the input
    Consumed,
    /// Key not handled, pass to next handler
    NotHandled,
}

/// Single-line text input. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    buffer: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        let buffer = value.into();
        let cursor = buffer.chars().count();
        Self { buffer, cursor }
    }

    /// Get the current input value
    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Cursor column for rendering
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.buffer.len())
    }

    fn len_chars(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Handle a key event, returning the result
    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let offset = self.byte_offset(self.cursor);
                    self.buffer.remove(offset);
                }
                InputResult::Consumed
            }
            KeyCode::Delete => {
                if self.cursor < self.len_chars() {
                    let offset = self.byte_offset(self.cursor);
                    self.buffer.remove(offset);
                }
                InputResult::Consumed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                InputResult::Consumed
            }
            KeyCode::Right => {
                if self.cursor < self.len_chars() {
                    self.cursor += 1;
                }
                InputResult::Consumed
            }
            KeyCode::Home => {
                self.cursor = 0;
                InputResult::Consumed
            }
            KeyCode::End => {
                self.cursor = self.len_chars();
                InputResult::Consumed
            }
            KeyCode::Char('u') if ctrl => {
                // Clear line before cursor
                let offset = self.byte_offset(self.cursor);
                self.buffer = self.buffer[offset..].to_string();
                self.cursor = 0;
                InputResult::Consumed
            }
            KeyCode::Char(_) if ctrl => InputResult::NotHandled,
            KeyCode::Char(c) => {
                let offset = self.byte_offset(self.cursor);
                self.buffer.insert(offset, c);
                self.cursor += 1;
                InputResult::Consumed
            }
            _ => InputResult::NotHandled,
        }
    }
}
