// Library interface for vocab-quiz
// This allows integration tests to access internal modules

pub mod browse;
pub mod cli;
pub mod error;
pub mod game_state;
pub mod guess_grid;
pub mod logging;
pub mod progress;
pub mod tui;
pub mod word_source;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{QuizError, SourceError};
pub use game_state::{GameOutcome, GameSummary, game_loop};
pub use guess_grid::{
    Advance, CellPos, GuessGrid, GuessOutcome, advance_to_next_word, linear_index_of, row_col_of,
    word_shape_summary,
};
pub use word_source::{
    Category, CategoryId, LocalSession, LocalWordSource, SessionProvider, UserId, Word, WordId,
    WordSource, resolve_category,
};
pub use wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};
