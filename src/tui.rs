//! TUI (Terminal User Interface) module for the vocabulary quiz
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `GridEditor`: terminal-free key handling for the letter cells
//! - `TuiInterface`: rendering and the `GameInterface` implementation
//!
//! # Screens
//! - `Guessing` → `Solved` → back to `Guessing` for the next word
//! - `Solved` on the last word → `CategoryComplete`
//! - Terminal screen: `Empty`

use crate::game_state::{GameInterface, UserAction, WordPrompt};
use crate::guess_grid::{CellPos, GuessGrid};
use crate::word_source::{Category, Word};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

const EMPTY_CELL: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
const HINT_CELL: Style = Style::new().fg(Color::Black).bg(Color::LightBlue);
const FOCUS_CELL: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Focus tracking and key handling for the letter cells.
///
/// Kept separate from the terminal so it can be driven directly in tests.
#[derive(Debug, Default)]
pub struct GridEditor {
    focus: CellPos,
}

impl GridEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> CellPos {
        self.focus
    }

    pub fn reset(&mut self) {
        self.focus = CellPos::default();
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn step(&mut self, grid: &GuessGrid, forward: bool) {
        let Some(index) = grid.linear_index_of(self.focus.row, self.focus.col) else {
            return;
        };
        let target = if forward {
            index.checked_add(1)
        } else {
            index.checked_sub(1)
        };
        if let Some(pos) = target.and_then(|i| grid.row_col_of(i)) {
            self.focus = pos;
        }
    }

    // Typing onto a hinted cell writes into the next editable one instead.
    fn first_editable_from(grid: &GuessGrid, from: CellPos) -> Option<CellPos> {
        let start = grid.linear_index_of(from.row, from.col)?;
        (start..grid.cell_count())
            .filter_map(|i| grid.row_col_of(i))
            .find(|pos| grid.cell(pos.row, pos.col).is_some_and(|c| !c.is_locked()))
    }

    pub fn handle_key(&mut self, grid: &mut GuessGrid, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => return Some(UserAction::Exit),
            KeyCode::Enter => return Some(UserAction::Submit),
            KeyCode::Tab if grid.can_hint() => return Some(UserAction::Hint),
            KeyCode::Left => self.step(grid, false),
            KeyCode::Right => self.step(grid, true),
            KeyCode::Backspace => {
                let CellPos { row, col } = self.focus;
                let Some(cell) = grid.cell(row, col).copied() else {
                    return None;
                };
                if cell.is_locked() {
                    self.step(grid, false);
                } else if !cell.is_empty() {
                    grid.set_letter(row, col, None);
                } else if let Some(prev) = grid.handle_backspace(row, col) {
                    self.focus = prev;
                }
            }
            KeyCode::Char(c) if !c.is_whitespace() && !c.is_control() => {
                if Self::has_modifier_keys(&key) {
                    debug_log!("handle_key() - Ignoring character with modifier: {:?}", key.modifiers);
                    return None;
                }
                let Some(target) = Self::first_editable_from(grid, self.focus) else {
                    return None;
                };
                self.focus = target;
                if let Some(next) = grid.set_letter(target.row, target.col, Some(c)) {
                    self.focus = next;
                }
            }
            _ => {
                debug_log!("handle_key() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    Guessing,
    Solved { has_next: bool },
    CategoryComplete,
    Empty,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    category: &'a str,
    header: &'a str,
    description: &'a str,
    shape: &'a str,
    grid: Option<&'a GuessGrid>,
    focus: Option<CellPos>,
    examples: &'a [String],
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
    state: TuiState,
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    editor: GridEditor,
    state: TuiState,
    category: String,
    header: String,
    description: String,
    shape: String,
    grid: Option<GuessGrid>,
    examples: Vec<String>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            editor: GridEditor::new(),
            state: TuiState::Guessing,
            category: String::new(),
            header: String::new(),
            description: String::new(),
            shape: String::new(),
            grid: None,
            examples: Vec::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            category: &self.category,
            header: &self.header,
            description: &self.description,
            shape: &self.shape,
            grid: self.grid.as_ref(),
            focus: matches!(self.state, TuiState::Guessing).then(|| self.editor.focus()),
            examples: &self.examples,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
            state: self.state,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(5), // Clue
                Constraint::Length(8), // Letter cells
                Constraint::Min(6),    // Info panel
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0], ctx.category);
        Self::render_clue(f, chunks[1], ctx);
        Self::render_board(f, chunks[2], ctx.grid, ctx.focus);
        Self::render_info(f, chunks[3], ctx);
        Self::render_status(f, chunks[4], ctx.status);
        let can_hint = ctx.grid.is_some_and(GuessGrid::can_hint);
        Self::render_instructions(f, chunks[5], ctx.state, can_hint);
    }

    fn render_title(f: &mut Frame, area: Rect, category: &str) {
        let text = if category.is_empty() {
            "VOCABULARY QUIZ".to_string()
        } else {
            format!("VOCABULARY QUIZ - {category}")
        };
        let title = Paragraph::new(text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_clue(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let lines = vec![
            Line::from(vec![Span::styled(ctx.description.to_string(), INFO_STYLE)]),
            Line::from(ctx.shape.to_string()),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title(ctx.header.to_string()).borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_board(f: &mut Frame, area: Rect, grid: Option<&GuessGrid>, focus: Option<CellPos>) {
        let mut lines = Vec::new();
        if let Some(grid) = grid {
            for (r, row) in grid.rows().iter().enumerate() {
                let mut spans = vec![Span::raw("  ")];
                for (c, cell) in row.iter().enumerate() {
                    let style = if focus == Some(CellPos::new(r, c)) {
                        FOCUS_CELL
                    } else if cell.is_locked() {
                        HINT_CELL
                    } else {
                        EMPTY_CELL
                    };
                    let letter = cell.value().unwrap_or(' ');
                    spans.push(Span::styled(format!(" {letter} "), style));
                    spans.push(Span::raw(" "));
                }
                lines.push(Line::from(spans));
                lines.push(Line::from(""));
            }
        }
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Letters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.message.is_empty() {
            let style = match ctx.state {
                TuiState::Solved { .. } | TuiState::CategoryComplete => SUCCESS_STYLE,
                TuiState::Guessing | TuiState::Empty => MESSAGE_STYLE,
            };
            lines.push(Line::from(vec![Span::styled(ctx.message.to_string(), style)]));
            lines.push(Line::from(""));
        }

        if matches!(ctx.state, TuiState::Solved { .. }) {
            if ctx.examples.is_empty() {
                lines.push(Line::from("No example sentences available."));
            } else {
                lines.push(Line::from(vec![Span::styled("Example sentences:", HEADER_STYLE)]));
                for sentence in ctx.examples {
                    lines.push(Line::from(format!("  - {sentence}")));
                }
            }
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                ctx.error_message.to_string(),
                ERROR_STYLE,
            )]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState, can_hint: bool) {
        let text = match state {
            TuiState::Guessing if can_hint => {
                "Type letters | ←/→: Move | BACKSPACE: Delete | TAB: Hint | ENTER: Check | ESC: Quit"
            }
            TuiState::Guessing => {
                "Type letters | ←/→: Move | BACKSPACE: Delete | ENTER: Check | ESC: Quit"
            }
            TuiState::Solved { has_next: true } => "ENTER: Next word | ESC: Quit",
            TuiState::Solved { has_next: false } => "ENTER: Finish | ESC: Quit",
            TuiState::CategoryComplete => "P: Play again | ESC: Quit",
            TuiState::Empty => "Press any key to quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Next key press, or `None` when nothing arrived within the poll timeout.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            // Only process Press events, ignore Release and Repeat to avoid double input
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    /// Redraws and waits for a key, mapping it with `f` until it yields a value.
    /// Terminal errors map to `on_error`.
    fn wait_for<T>(&mut self, on_error: T, mut f: impl FnMut(KeyEvent) -> Option<T>) -> T {
        loop {
            if self.draw().is_err() {
                return on_error;
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(value) = f(key) {
                        return value;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    debug_log!("wait_for() - Input error: {}", e);
                    return on_error;
                }
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_category(&mut self, category: &Category, word_count: usize) {
        self.category.clone_from(&category.name);
        self.status = format!("{word_count} words in this category");
        self.draw_or_log();
    }

    fn display_word(&mut self, prompt: &WordPrompt<'_>, grid: &GuessGrid) {
        self.state = TuiState::Guessing;
        self.editor.reset();
        self.header = format!("Word {} of {}", prompt.position + 1, prompt.total);
        self.description.clone_from(&prompt.word.description);
        self.shape.clone_from(&prompt.shape);
        self.grid = Some(grid.clone());
        self.examples.clear();
        self.message.clear();
        self.error_message.clear();
        self.status = "Guess the word".to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self, grid: &mut GuessGrid) -> Option<UserAction> {
        loop {
            self.grid = Some(grid.clone());
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    self.error_message.clear();
                    if let Some(action) = self.editor.handle_key(grid, key) {
                        info_log!("read_action() - Action received: {:?}", action);
                        self.grid = Some(grid.clone());
                        return Some(action);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Error handling input: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_hint(&mut self, grid: &GuessGrid, revealed: CellPos) {
        self.grid = Some(grid.clone());
        self.message = format!(
            "Hint: letter {} of word {} revealed",
            revealed.col + 1,
            revealed.row + 1
        );
        self.draw_or_log();
    }

    fn display_no_hints(&mut self) {
        self.error_message = "No hints left for this word.".to_string();
        self.draw_or_log();
    }

    fn display_incorrect(&mut self, grid: &GuessGrid) {
        self.grid = Some(grid.clone());
        self.message.clear();
        self.error_message = "Oops, try again.".to_string();
        self.draw_or_log();
    }

    fn display_solved(&mut self, word: &Word, examples: &[String]) {
        self.message = format!("Correct! Well done. The word was {}.", word.text);
        self.examples = examples.to_vec();
        self.error_message.clear();
        self.status = "Solved".to_string();
    }

    fn read_continue(&mut self, has_next: bool) -> bool {
        self.state = TuiState::Solved { has_next };
        self.wait_for(false, |key| match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(true),
            KeyCode::Esc => Some(false),
            _ => None,
        })
    }

    fn display_notice(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_empty_category(&mut self, category: &Category) {
        self.category.clone_from(&category.name);
        self.state = TuiState::Empty;
        self.grid = None;
        self.message = "No words found in this category.".to_string();
        self.wait_for((), |_| Some(()));
    }

    fn read_play_again(&mut self, category: &Category) -> bool {
        self.state = TuiState::CategoryComplete;
        self.grid = None;
        self.examples.clear();
        self.message = format!(
            "Congratulations! You have completed all words in {}.",
            category.name
        );
        self.status = "Category complete".to_string();
        self.wait_for(false, |key| match key.code {
            KeyCode::Char('p' | 'P' | 'y' | 'Y') => Some(true),
            KeyCode::Esc | KeyCode::Char('q' | 'Q' | 'n' | 'N') => Some(false),
            _ => None,
        })
    }

    fn display_exit_message(&mut self) {
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
