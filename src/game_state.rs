use crate::error::QuizError;
use crate::guess_grid::{Advance, CellPos, GuessGrid, GuessOutcome, advance_to_next_word, word_shape_summary};
use crate::word_source::{Category, SessionProvider, UserId, Word, WordId, WordSource};
use crate::{debug_log, info_log};

/// Something the player asked for while a word is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Submit,
    Hint,
    Exit,
}

/// What the interface needs to present the current word.
#[derive(Debug)]
pub struct WordPrompt<'a> {
    pub word: &'a Word,
    /// Zero-based position within the category.
    pub position: usize,
    pub total: usize,
    pub shape: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The player finished the category and declined to play again.
    Finished,
    Exited,
    EmptyCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub solved: usize,
    pub hints_used: usize,
    pub outcome: GameOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPoint {
    At(usize),
    CategoryComplete,
}

/// Front end used by [`game_loop`]. Implemented by the line-based CLI and the TUI.
pub trait GameInterface {
    fn display_category(&mut self, category: &Category, word_count: usize);
    fn display_word(&mut self, prompt: &WordPrompt<'_>, grid: &GuessGrid);
    /// Lets the player edit `grid` until they ask for something.
    /// `None` means the input was not understood and should be read again.
    fn read_action(&mut self, grid: &mut GuessGrid) -> Option<UserAction>;
    fn display_hint(&mut self, grid: &GuessGrid, revealed: CellPos);
    fn display_no_hints(&mut self);
    fn display_incorrect(&mut self, grid: &GuessGrid);
    fn display_solved(&mut self, word: &Word, examples: &[String]);
    /// Returns `false` if the player wants to stop instead of moving on.
    fn read_continue(&mut self, has_next: bool) -> bool;
    fn display_notice(&mut self, message: &str);
    fn display_empty_category(&mut self, category: &Category);
    /// Category finished; returns `true` to reset progress and start over.
    fn read_play_again(&mut self, category: &Category) -> bool;
    fn display_exit_message(&mut self);
}

/// Index to resume from given the player's last completed word.
pub fn starting_index(words: &[Word], last_completed: Option<WordId>) -> StartPoint {
    let Some(last) = last_completed else {
        return StartPoint::At(0);
    };
    match words.iter().position(|w| w.id == last) {
        Some(i) => match advance_to_next_word(words, i) {
            Advance::Next(next) => StartPoint::At(next),
            Advance::CategoryComplete => StartPoint::CategoryComplete,
        },
        None => StartPoint::At(0),
    }
}

enum WordResult {
    Solved,
    Exited,
}

/// Plays one category for the signed-in user until they finish or quit.
pub fn game_loop<S, P, I>(
    source: &mut S,
    session: &P,
    category: &Category,
    interface: &mut I,
) -> Result<GameSummary, QuizError>
where
    S: WordSource + ?Sized,
    P: SessionProvider + ?Sized,
    I: GameInterface + ?Sized,
{
    let user = session.current_user_id().ok_or(QuizError::NotSignedIn)?;

    let ids = source.list_word_ids(category.id)?;
    let last_completed = source.get_last_completed(category.id, &user)?;
    let words = source.fetch_words(&ids)?;
    info_log!(
        "game_loop() - category {} has {} words, last completed {:?}",
        category.id,
        words.len(),
        last_completed
    );

    let mut summary = GameSummary {
        solved: 0,
        hints_used: 0,
        outcome: GameOutcome::Exited,
    };

    if words.is_empty() {
        interface.display_empty_category(category);
        summary.outcome = GameOutcome::EmptyCategory;
        return Ok(summary);
    }

    interface.display_category(category, words.len());

    let mut index = match starting_index(&words, last_completed) {
        StartPoint::At(i) => Some(i),
        StartPoint::CategoryComplete => None,
    };

    loop {
        let Some(current) = index else {
            if !interface.read_play_again(category) {
                summary.outcome = GameOutcome::Finished;
                return Ok(summary);
            }
            reset_progress(source, category, &user, interface);
            index = Some(0);
            continue;
        };

        let word = &words[current];
        match play_word(source, category, &user, word, current, words.len(), interface, &mut summary) {
            WordResult::Exited => {
                interface.display_exit_message();
                summary.outcome = GameOutcome::Exited;
                return Ok(summary);
            }
            WordResult::Solved => {}
        }

        let advance = advance_to_next_word(&words, current);
        if !interface.read_continue(matches!(advance, Advance::Next(_))) {
            interface.display_exit_message();
            summary.outcome = GameOutcome::Exited;
            return Ok(summary);
        }
        index = match advance {
            Advance::Next(next) => Some(next),
            Advance::CategoryComplete => None,
        };
    }
}

#[allow(clippy::too_many_arguments)]
fn play_word<S, I>(
    source: &mut S,
    category: &Category,
    user: &UserId,
    word: &Word,
    position: usize,
    total: usize,
    interface: &mut I,
    summary: &mut GameSummary,
) -> WordResult
where
    S: WordSource + ?Sized,
    I: GameInterface + ?Sized,
{
    let mut grid = GuessGrid::new(word);
    let prompt = WordPrompt {
        word,
        position,
        total,
        shape: word_shape_summary(&word.text),
    };
    interface.display_word(&prompt, &grid);

    loop {
        let Some(action) = interface.read_action(&mut grid) else {
            continue;
        };
        debug_log!("play_word() - action {:?} on word {}", action, word.id);

        match action {
            UserAction::Exit => return WordResult::Exited,
            UserAction::Hint => match grid.apply_hint() {
                Some(pos) => {
                    summary.hints_used += 1;
                    interface.display_hint(&grid, pos);
                }
                None => interface.display_no_hints(),
            },
            UserAction::Submit => match grid.check_guess() {
                GuessOutcome::Incorrect => interface.display_incorrect(&grid),
                GuessOutcome::Correct => {
                    summary.solved += 1;
                    let examples = source.fetch_examples(word.id).unwrap_or_else(|e| {
                        log::warn!("Failed to fetch examples for word {}: {e}", word.id);
                        Vec::new()
                    });
                    if let Err(e) = source.set_last_completed(category.id, user, word.id) {
                        log::warn!("Failed to save progress for word {}: {e}", word.id);
                        interface.display_notice(&format!("Progress could not be saved: {e}"));
                    }
                    interface.display_solved(word, &examples);
                    return WordResult::Solved;
                }
            },
        }
    }
}

fn reset_progress<S, I>(source: &mut S, category: &Category, user: &UserId, interface: &mut I)
where
    S: WordSource + ?Sized,
    I: GameInterface + ?Sized,
{
    info_log!("reset_progress() - restarting category {}", category.id);
    if let Err(e) = source.delete_progress(category.id, user) {
        log::warn!("Failed to reset progress for category {}: {e}", category.id);
        interface.display_notice(&format!("Progress could not be reset: {e}"));
    }
}
