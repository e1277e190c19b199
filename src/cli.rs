use crate::browse::WordBrowser;
use crate::error::QuizError;
use crate::game_state::{GameInterface, UserAction, WordPrompt};
use crate::guess_grid::{CellPos, GuessGrid};
use crate::word_source::{Category, Word, WordSource};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Vocabulary quiz: guess words letter by letter from their descriptions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON word bank (the built-in bank is used otherwise)
    #[arg(short = 'i', long = "wordbank")]
    pub wordbank_path: Option<String>,

    /// Where progress is stored
    #[arg(long = "progress", env = "VOCAB_QUIZ_PROGRESS")]
    pub progress_path: Option<PathBuf>,

    /// Name of the player
    #[arg(short, long, env = "VOCAB_QUIZ_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the available categories
    Categories,
    /// Browse the words of a category with their example sentences
    Words {
        /// Category id or name
        category: String,
    },
    /// Play a category, resuming after the last completed word
    Play {
        /// Category id or name
        category: String,
        /// Use the full-screen terminal interface
        #[arg(long)]
        tui: bool,
    },
    /// Forget progress in a category
    Reset {
        /// Category id or name
        category: String,
    },
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

enum Line {
    Text(String),
    Eof,
}

fn read_line<R: BufRead>(reader: &mut R) -> Line {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => Line::Eof,
        Ok(_) => Line::Text(input.trim().to_string()),
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            Line::Eof
        }
    }
}

/// Renders the grid as `[C][_][_]  [_][_][_][_]`; hinted letters use `<C>`.
pub fn render_grid(grid: &GuessGrid) -> String {
    grid.rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match (cell.value(), cell.is_locked()) {
                    (Some(c), true) => format!("<{c}>"),
                    (Some(c), false) => format!("[{c}]"),
                    (None, _) => "[_]".to_string(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Writes the typed letters into the grid; whitespace in the input is ignored.
///
/// A line as long as the whole word lines up cell by cell and hinted cells
/// keep their letter. Any other line fills the unlocked cells in order.
/// Cells left without a letter are cleared.
pub fn fill_grid(grid: &mut GuessGrid, input: &str) {
    let letters: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    let whole_word = letters.len() == grid.cell_count();
    let mut typed = letters.into_iter();
    for index in 0..grid.cell_count() {
        let Some(pos) = grid.row_col_of(index) else {
            break;
        };
        let locked = grid.cell(pos.row, pos.col).is_some_and(|c| c.is_locked());
        if locked && !whole_word {
            continue;
        }
        let letter = typed.next();
        if !locked {
            grid.set_letter(pos.row, pos.col, letter);
        }
    }
}

pub fn display_categories(categories: &[Category]) {
    println!("Categories:");
    for category in categories {
        println!("{:>4}. {}", category.id, category.name);
    }
}

fn format_examples(examples: &[String]) -> String {
    if examples.is_empty() {
        return "No example sentences available.".to_string();
    }
    let mut text = "Example sentences:".to_string();
    for sentence in examples {
        text.push_str(&format!("\n  - {sentence}"));
    }
    text
}

/// Interactive word list: `n` next, `p` previous, `q` quit.
pub fn browse_words<S, R, W>(
    source: &S,
    category: &Category,
    reader: &mut R,
    out: &mut W,
) -> Result<(), QuizError>
where
    S: WordSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let ids = source.list_word_ids(category.id)?;
    let mut browser = WordBrowser::new(source.fetch_words(&ids)?);
    if browser.is_empty() {
        writeln!(out, "No words found in this category.")?;
        return Ok(());
    }
    writeln!(out, "Words in {}:", category.name)?;

    let mut show = true;
    loop {
        if show && let Some(word) = browser.current() {
            writeln!(out, "\n({}/{}) Word: {}", browser.position() + 1, browser.len(), word.text)?;
            writeln!(out, "Description: {}", word.description)?;
            let examples = source.fetch_examples(word.id).unwrap_or_else(|e| {
                log::warn!("Failed to fetch examples for word {}: {e}", word.id);
                Vec::new()
            });
            writeln!(out, "{}", format_examples(&examples))?;
        }
        writeln!(out, "\n[n]ext, [p]revious, [q]uit:")?;
        out.flush()?;
        let Line::Text(input) = read_line(reader) else {
            return Ok(());
        };
        show = match input.to_lowercase().as_str() {
            "n" | "next" => browser.next_word(),
            "p" | "previous" => browser.previous_word(),
            "q" | "quit" | "exit" => return Ok(()),
            _ => {
                writeln!(out, "Unknown command.")?;
                false
            }
        };
    }
}

/// CLI implementation of the `GameInterface` trait.
/// Wraps a `BufRead` reader; output goes to stdout.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_category(&mut self, category: &Category, word_count: usize) {
        println!("Category: {} ({word_count} words)", category.name);
    }

    fn display_word(&mut self, prompt: &WordPrompt<'_>, grid: &GuessGrid) {
        println!("\nWord {} of {}", prompt.position + 1, prompt.total);
        println!("Description: {}", prompt.word.description);
        println!("{}", prompt.shape);
        println!("{}", render_grid(grid));
    }

    // Commands start with ':' so that any word, even "exit", can be guessed.
    fn read_action(&mut self, grid: &mut GuessGrid) -> Option<UserAction> {
        if grid.can_hint() {
            println!("\nEnter your guess (':hint' for a letter, ':exit' to quit):");
        } else {
            println!("\nEnter your guess (':exit' to quit):");
        }
        let input = match read_line(&mut self.reader) {
            Line::Eof => return Some(UserAction::Exit),
            Line::Text(input) => input,
        };
        match input.to_lowercase().as_str() {
            ":exit" | ":q" => Some(UserAction::Exit),
            ":hint" | ":h" if grid.can_hint() => Some(UserAction::Hint),
            ":hint" | ":h" => {
                println!("No hints left for this word.");
                None
            }
            "" => {
                println!("Please type a guess.");
                None
            }
            _ => {
                fill_grid(grid, &input);
                Some(UserAction::Submit)
            }
        }
    }

    fn display_hint(&mut self, grid: &GuessGrid, revealed: CellPos) {
        println!(
            "Revealed letter {} of word {}:",
            revealed.col + 1,
            revealed.row + 1
        );
        println!("{}", render_grid(grid));
    }

    fn display_no_hints(&mut self) {
        println!("No hints left for this word.");
    }

    fn display_incorrect(&mut self, grid: &GuessGrid) {
        println!("Oops, try again.");
        println!("{}", render_grid(grid));
    }

    fn display_solved(&mut self, word: &Word, examples: &[String]) {
        println!("Correct! Well done. The word was {}.", word.text);
        println!("{}", format_examples(examples));
    }

    fn read_continue(&mut self, has_next: bool) -> bool {
        let next = if has_next { "the next word" } else { "finish" };
        println!("\nPress Enter for {next} (or 'exit' to quit):");
        match read_line(&mut self.reader) {
            Line::Eof => false,
            Line::Text(input) => !input.eq_ignore_ascii_case("exit"),
        }
    }

    fn display_notice(&mut self, message: &str) {
        println!("{message}");
    }

    fn display_empty_category(&mut self, category: &Category) {
        println!("No words found in {}.", category.name);
    }

    fn read_play_again(&mut self, category: &Category) -> bool {
        println!("\nCongratulations! You have completed all words in {}.", category.name);
        println!("Play again from the start? (y/n):");
        match read_line(&mut self.reader) {
            Line::Eof => false,
            Line::Text(input) => matches!(input.to_lowercase().as_str(), "y" | "yes"),
        }
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}
