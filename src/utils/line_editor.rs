//! Single-line terminal editor used for the login prompts.

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::fmt;
use std::io::{self, Write};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskMode {
    None,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditorOptions {
    pub initial_text: String,
    pub mask_mode: MaskMode,
}

impl LineEditorOptions {
    pub fn plain(initial_text: impl Into<String>) -> Self {
        Self {
            initial_text: initial_text.into(),
            mask_mode: MaskMode::None,
        }
    }

    pub fn hidden() -> Self {
        Self {
            initial_text: String::new(),
            mask_mode: MaskMode::Hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditorState {
    chars: Vec<char>,
    cursor: usize,
}

impl LineEditorState {
    pub fn with_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn display(&self, mask_mode: MaskMode) -> String {
        match mask_mode {
            MaskMode::None => self.text(),
            MaskMode::Hidden => "*".repeat(self.chars.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEditAction {
    Insert(char),
    Paste(String),
    Backspace,
    Delete,
    MoveLeft,
    MoveRight,
    MoveStart,
    MoveEnd,
    ClearAll,
    Submit,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEditOutcome {
    Continue,
    Submit(String),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct LineEditorError {
    message: String,
}

impl LineEditorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn io(err: io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl fmt::Display for LineEditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LineEditorError {}

pub fn map_key_event(key: &KeyEvent) -> Option<LineEditAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => Some(LineEditAction::Submit),
        KeyCode::Esc => Some(LineEditAction::Cancel),
        KeyCode::Backspace => Some(LineEditAction::Backspace),
        KeyCode::Delete => Some(LineEditAction::Delete),
        KeyCode::Left => Some(LineEditAction::MoveLeft),
        KeyCode::Right => Some(LineEditAction::MoveRight),
        KeyCode::Home => Some(LineEditAction::MoveStart),
        KeyCode::End => Some(LineEditAction::MoveEnd),
        KeyCode::Char('c') if ctrl => Some(LineEditAction::Cancel),
        KeyCode::Char('a') if ctrl => Some(LineEditAction::MoveStart),
        KeyCode::Char('e') if ctrl => Some(LineEditAction::MoveEnd),
        KeyCode::Char('u') if ctrl => Some(LineEditAction::ClearAll),
        KeyCode::Char(c) if !ctrl => Some(LineEditAction::Insert(c)),
        _ => None,
    }
}

pub fn apply_action(state: &mut LineEditorState, action: LineEditAction) -> LineEditOutcome {
    match action {
        LineEditAction::Insert(c) if !c.is_control() => {
            state.chars.insert(state.cursor, c);
            state.cursor += 1;
        }
        LineEditAction::Insert(_) => {}
        LineEditAction::Paste(text) => {
            // Only the first line is kept; a pasted newline submits.
            let first_line = text.split(['\r', '\n']).next().unwrap_or_default();
            for c in first_line.chars().filter(|c| !c.is_control()) {
                state.chars.insert(state.cursor, c);
                state.cursor += 1;
            }
            if first_line.len() != text.len() {
                return LineEditOutcome::Submit(state.text());
            }
        }
        LineEditAction::Backspace => {
            if state.cursor > 0 {
                state.cursor -= 1;
                state.chars.remove(state.cursor);
            }
        }
        LineEditAction::Delete => {
            if state.cursor < state.chars.len() {
                state.chars.remove(state.cursor);
            }
        }
        LineEditAction::MoveLeft => state.cursor = state.cursor.saturating_sub(1),
        LineEditAction::MoveRight => state.cursor = (state.cursor + 1).min(state.chars.len()),
        LineEditAction::MoveStart => state.cursor = 0,
        LineEditAction::MoveEnd => state.cursor = state.chars.len(),
        LineEditAction::ClearAll => {
            state.chars.clear();
            state.cursor = 0;
        }
        LineEditAction::Submit => return LineEditOutcome::Submit(state.text()),
        LineEditAction::Cancel => return LineEditOutcome::Cancelled,
    }
    LineEditOutcome::Continue
}

/// Reads one line from the terminal in raw mode.
///
/// Raw mode and bracketed paste are always restored, even when reading fails.
pub fn prompt_line_editor(
    prompt: &str,
    options: &LineEditorOptions,
) -> Result<String, LineEditorError> {
    enable_raw_mode().map_err(LineEditorError::io)?;
    let mut stdout = io::stdout();
    let result = execute!(stdout, event::EnableBracketedPaste)
        .map_err(LineEditorError::io)
        .and_then(|()| read_line(prompt, options));

    let restore_raw = disable_raw_mode().map_err(LineEditorError::io);
    let restore_paste = execute!(stdout, event::DisableBracketedPaste).map_err(LineEditorError::io);
    println!();

    let value = result?;
    restore_raw?;
    restore_paste?;
    Ok(value)
}

fn read_line(prompt: &str, options: &LineEditorOptions) -> Result<String, LineEditorError> {
    let mut state = LineEditorState::with_text(&options.initial_text);
    redraw(prompt, &state, options.mask_mode).map_err(LineEditorError::io)?;

    loop {
        if !event::poll(Duration::from_millis(100)).map_err(LineEditorError::io)? {
            continue;
        }
        let action = match event::read().map_err(LineEditorError::io)? {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key_event(&key),
            Event::Paste(text) => Some(LineEditAction::Paste(text)),
            _ => None,
        };
        let Some(action) = action else {
            continue;
        };

        match apply_action(&mut state, action) {
            LineEditOutcome::Continue => {
                redraw(prompt, &state, options.mask_mode).map_err(LineEditorError::io)?;
            }
            LineEditOutcome::Submit(value) => return Ok(value),
            LineEditOutcome::Cancelled => return Err(LineEditorError::new("Cancelled by user")),
        }
    }
}

fn redraw(prompt: &str, state: &LineEditorState, mask_mode: MaskMode) -> io::Result<()> {
    let display = state.display(mask_mode);
    let before_cursor: String = display.chars().take(state.cursor).collect();
    let column = UnicodeWidthStr::width(prompt) + UnicodeWidthStr::width(before_cursor.as_str());

    print!("\r\x1b[K{prompt}{display}");
    if column > 0 {
        print!("\r\x1b[{column}C");
    } else {
        print!("\r");
    }
    io::stdout().flush()
}
