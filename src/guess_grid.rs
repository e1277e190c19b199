//! Per-letter guess input for a single word.
//!
//! A word's text is split into sub-words; each sub-word becomes a row of
//! cells. Cells are addressed either by `(row, col)` or by a linear index
//! that runs across all rows in row-major order. Focus movement and hint
//! selection work on the linear sequence, rendering works per row.

use crate::debug_log;
use crate::word_source::Word;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Position of a cell within the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    value: Option<char>,
    locked: bool,
}

impl Cell {
    pub const fn value(&self) -> Option<char> {
        self.value
    }

    /// Locked cells were revealed by a hint and hold the correct letter.
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    pub const fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next(usize),
    CategoryComplete,
}

/// Linear index of `(row, col)`, or `None` if the cell does not exist.
pub fn linear_index_of(row_lengths: &[usize], row: usize, col: usize) -> Option<usize> {
    let len = *row_lengths.get(row)?;
    if col >= len {
        return None;
    }
    Some(row_lengths[..row].iter().sum::<usize>() + col)
}

/// Inverse of [`linear_index_of`].
pub fn row_col_of(row_lengths: &[usize], index: usize) -> Option<CellPos> {
    let mut start = 0;
    for (row, &len) in row_lengths.iter().enumerate() {
        if index < start + len {
            return Some(CellPos::new(row, index - start));
        }
        start += len;
    }
    None
}

pub fn advance_to_next_word<T>(words: &[T], current_index: usize) -> Advance {
    match current_index.checked_add(1) {
        Some(next) if next < words.len() => Advance::Next(next),
        _ => Advance::CategoryComplete,
    }
}

// Keeps a single char when the uppercase mapping expands (e.g. 'ß').
fn to_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[derive(Debug, Clone)]
pub struct GuessGrid {
    answer: String,
    letters: Vec<char>,
    rows: Vec<Vec<Cell>>,
    hints_used: usize,
}

impl GuessGrid {
    pub fn new(word: &Word) -> Self {
        Self::from_text(&word.text)
    }

    pub fn from_text(text: &str) -> Self {
        let sub_words: Vec<&str> = text.split_whitespace().collect();
        let rows = sub_words
            .iter()
            .map(|w| vec![Cell::default(); w.chars().count()])
            .collect();
        let letters = sub_words.iter().flat_map(|w| w.chars()).map(to_upper).collect();

        Self {
            answer: sub_words.join(" "),
            letters,
            rows,
            hints_used: 0,
        }
    }

    /// The word text with whitespace runs collapsed to single spaces.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_lengths(&self) -> Vec<usize> {
        self.rows.iter().map(Vec::len).collect()
    }

    pub fn cell_count(&self) -> usize {
        self.letters.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }

    pub fn hints_used(&self) -> usize {
        self.hints_used
    }

    pub fn linear_index_of(&self, row: usize, col: usize) -> Option<usize> {
        linear_index_of(&self.row_lengths(), row, col)
    }

    pub fn row_col_of(&self, index: usize) -> Option<CellPos> {
        row_col_of(&self.row_lengths(), index)
    }

    fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// Stores `value` uppercased at an unlocked cell.
    ///
    /// Returns the cell that should take focus next: the following linear
    /// cell when a letter was entered. Missing or locked cells are ignored.
    pub fn set_letter(&mut self, row: usize, col: usize, value: Option<char>) -> Option<CellPos> {
        let index = self.linear_index_of(row, col)?;
        let cell = &mut self.rows[row][col];
        if cell.locked {
            debug_log!("set_letter() - cell ({}, {}) is locked, ignoring", row, col);
            return None;
        }
        cell.value = value.map(to_upper);

        if value.is_none() {
            return None;
        }
        self.row_col_of(index + 1)
    }

    /// Focus request for Backspace pressed on an already-empty cell.
    pub fn handle_backspace(&self, row: usize, col: usize) -> Option<CellPos> {
        let cell = self.cell(row, col)?;
        if !cell.is_empty() {
            return None;
        }
        let index = self.linear_index_of(row, col)?;
        self.row_col_of(index.checked_sub(1)?)
    }

    /// Linear indices of cells with no value.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Linear indices a hint may reveal: empty and unlocked.
    pub fn hint_candidates(&self) -> Vec<usize> {
        self.cells()
            .enumerate()
            .filter(|(_, c)| c.is_empty() && !c.locked)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn can_hint(&self) -> bool {
        self.cells().any(|c| c.is_empty() && !c.locked)
    }

    /// Every cell holds a value.
    pub fn is_complete(&self) -> bool {
        self.cells().all(|c| !c.is_empty())
    }

    pub fn apply_hint(&mut self) -> Option<CellPos> {
        self.apply_hint_with(&mut rand::rng())
    }

    /// Reveals the correct letter in a random eligible cell and locks it.
    pub fn apply_hint_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<CellPos> {
        let &index = self.hint_candidates().choose(rng)?;
        let pos = self.row_col_of(index)?;
        let cell = &mut self.rows[pos.row][pos.col];
        cell.value = Some(self.letters[index]);
        cell.locked = true;
        self.hints_used += 1;
        debug_log!("apply_hint() - revealed linear index {}", index);
        Some(pos)
    }

    /// Cell values, rows joined by a single space.
    pub fn guess_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.iter().filter_map(|c| c.value).collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn check_guess(&self) -> GuessOutcome {
        if self.guess_text().to_lowercase() == self.answer.to_lowercase() {
            GuessOutcome::Correct
        } else {
            GuessOutcome::Incorrect
        }
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Describes the shape of a word without revealing it, e.g.
/// `2 Words: 1st word (3 letters), 2nd word (4 letters)`.
pub fn word_shape_summary(text: &str) -> String {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let details = parts
        .iter()
        .enumerate()
        .map(|(i, part)| format!("{} word ({} letters)", ordinal(i + 1), part.chars().count()))
        .collect::<Vec<_>>()
        .join(", ");
    let plural = if parts.len() > 1 { "s" } else { "" };
    format!("{} Word{plural}: {details}", parts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn fill(grid: &mut GuessGrid, text: &str) {
        for (i, c) in text.chars().filter(|c| !c.is_whitespace()).enumerate() {
            let pos = grid.row_col_of(i).unwrap();
            grid.set_letter(pos.row, pos.col, Some(c));
        }
    }

    #[test]
    fn test_single_word_layout() {
        let grid = GuessGrid::from_text("CAT");
        assert_eq!(grid.row_lengths(), vec![3]);
        assert_eq!(grid.cell_count(), 3);
        assert_eq!(grid.empty_cells(), vec![0, 1, 2]);
    }

    #[test]
    fn test_multi_word_layout() {
        let grid = GuessGrid::from_text("NEW YORK");
        assert_eq!(grid.row_lengths(), vec![3, 4]);
        assert_eq!(grid.linear_index_of(1, 0), Some(3));
        assert_eq!(grid.row_col_of(3), Some(CellPos::new(1, 0)));
        assert_eq!(grid.row_col_of(6), Some(CellPos::new(1, 3)));
        assert_eq!(grid.row_col_of(7), None);
    }

    #[test]
    fn test_cell_count_matches_letters() {
        for text in ["A", "CAT", "NEW YORK", "SAN LUIS OBISPO", "  spaced   out  "] {
            let grid = GuessGrid::from_text(text);
            let letters = text.chars().filter(|c| !c.is_whitespace()).count();
            assert_eq!(grid.cell_count(), letters, "text: {text:?}");
            assert_eq!(grid.row_lengths().iter().sum::<usize>(), letters);
        }
    }

    #[test]
    fn test_index_helpers_round_trip() {
        let lengths = [4, 1, 3, 2];
        for i in 0..10 {
            let pos = row_col_of(&lengths, i).unwrap();
            assert_eq!(linear_index_of(&lengths, pos.row, pos.col), Some(i));
        }
        assert_eq!(linear_index_of(&lengths, 1, 1), None);
        assert_eq!(linear_index_of(&lengths, 4, 0), None);
    }

    #[test]
    fn test_set_letter_uppercases_and_requests_next_focus() {
        let mut grid = GuessGrid::from_text("NEW YORK");
        assert_eq!(grid.set_letter(0, 2, Some('w')), Some(CellPos::new(1, 0)));
        assert_eq!(grid.cell(0, 2).unwrap().value(), Some('W'));
        // Last cell has nowhere to go.
        assert_eq!(grid.set_letter(1, 3, Some('k')), None);
        assert_eq!(grid.cell(1, 3).unwrap().value(), Some('K'));
    }

    #[test]
    fn test_set_letter_clear_does_not_move_focus() {
        let mut grid = GuessGrid::from_text("CAT");
        grid.set_letter(0, 0, Some('c'));
        assert_eq!(grid.set_letter(0, 0, None), None);
        assert!(grid.cell(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_set_letter_out_of_range_is_ignored() {
        let mut grid = GuessGrid::from_text("CAT");
        assert_eq!(grid.set_letter(0, 3, Some('x')), None);
        assert_eq!(grid.set_letter(1, 0, Some('x')), None);
        assert_eq!(grid.guess_text(), "");
    }

    #[test]
    fn test_set_letter_on_locked_cell_is_ignored() {
        let mut grid = GuessGrid::from_text("A");
        grid.apply_hint();
        assert_eq!(grid.set_letter(0, 0, Some('z')), None);
        assert_eq!(grid.set_letter(0, 0, None), None);
        assert_eq!(grid.cell(0, 0).unwrap().value(), Some('A'));
    }

    #[test]
    fn test_backspace_on_empty_cell_moves_back() {
        let grid = GuessGrid::from_text("NEW YORK");
        assert_eq!(grid.handle_backspace(1, 0), Some(CellPos::new(0, 2)));
        assert_eq!(grid.handle_backspace(0, 0), None);
        assert_eq!(grid.handle_backspace(5, 0), None);
    }

    #[test]
    fn test_backspace_on_filled_cell_stays() {
        let mut grid = GuessGrid::from_text("CAT");
        grid.set_letter(0, 1, Some('a'));
        assert_eq!(grid.handle_backspace(0, 1), None);
        assert_eq!(grid.cell(0, 1).unwrap().value(), Some('A'));
    }

    #[test]
    fn test_hint_picks_only_eligible_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut grid = GuessGrid::from_text("CAT");
            grid.set_letter(0, 0, Some('x'));
            let pos = grid.apply_hint_with(&mut rng).unwrap();
            assert_ne!(pos, CellPos::new(0, 0));
            assert_eq!(grid.cell(0, 0).unwrap().value(), Some('X'));
            assert!(!grid.cell(0, 0).unwrap().is_locked());
        }
    }

    #[test]
    fn test_hint_covers_all_empty_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let mut grid = GuessGrid::from_text("CAT");
            let pos = grid.apply_hint_with(&mut rng).unwrap();
            seen.insert(grid.linear_index_of(pos.row, pos.col).unwrap());
        }
        assert_eq!(seen, HashSet::from([0, 1, 2]));
    }

    #[test]
    fn test_hint_reveals_correct_letter_and_locks() {
        let mut grid = GuessGrid::from_text("cat");
        let mut rng = StdRng::seed_from_u64(1);
        let pos = grid.apply_hint_with(&mut rng).unwrap();
        let cell = grid.cell(pos.row, pos.col).unwrap();
        assert!(cell.is_locked());
        assert_eq!(cell.value(), "CAT".chars().nth(pos.col));
        assert_eq!(grid.hints_used(), 1);
    }

    #[test]
    fn test_locked_cell_leaves_remaining_candidates() {
        let mut grid = GuessGrid::from_text("CAT");
        grid.set_letter(0, 0, Some('x'));
        grid.set_letter(0, 2, Some('x'));
        // Only the middle cell is eligible, so the hint must lock it.
        assert_eq!(grid.apply_hint(), Some(CellPos::new(0, 1)));
        grid.set_letter(0, 0, None);
        grid.set_letter(0, 2, None);
        assert_eq!(grid.hint_candidates(), vec![0, 2]);
        assert_eq!(grid.empty_cells(), vec![0, 2]);
    }

    #[test]
    fn test_hint_exhaustion_disables_hints() {
        let mut grid = GuessGrid::from_text("NEW YORK");
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..7 {
            assert!(grid.can_hint());
            assert!(grid.apply_hint_with(&mut rng).is_some());
        }
        assert!(!grid.can_hint());
        assert!(grid.hint_candidates().is_empty());
        assert_eq!(grid.apply_hint_with(&mut rng), None);
        assert_eq!(grid.hints_used(), 7);
        assert_eq!(grid.check_guess(), GuessOutcome::Correct);
    }

    #[test]
    fn test_check_guess_correct() {
        let mut grid = GuessGrid::from_text("CAT");
        fill(&mut grid, "cat");
        assert_eq!(grid.check_guess(), GuessOutcome::Correct);
    }

    #[test]
    fn test_check_guess_multi_word_joins_rows_with_space() {
        let mut grid = GuessGrid::from_text("New York");
        fill(&mut grid, "NEWYORK");
        assert_eq!(grid.guess_text(), "NEW YORK");
        assert_eq!(grid.check_guess(), GuessOutcome::Correct);
    }

    #[test]
    fn test_check_guess_incorrect_leaves_cells_alone() {
        let mut grid = GuessGrid::from_text("CAT");
        fill(&mut grid, "COT");
        let before = grid.rows().to_vec();
        assert_eq!(grid.check_guess(), GuessOutcome::Incorrect);
        assert_eq!(grid.rows(), before.as_slice());
    }

    #[test]
    fn test_check_guess_partial_is_incorrect() {
        let mut grid = GuessGrid::from_text("CAT");
        grid.set_letter(0, 0, Some('C'));
        grid.set_letter(0, 1, Some('A'));
        assert!(!grid.is_complete());
        assert_eq!(grid.check_guess(), GuessOutcome::Incorrect);
    }

    #[test]
    fn test_advance_to_next_word() {
        let words = [1, 2, 3, 4, 5];
        assert_eq!(advance_to_next_word(&words, 0), Advance::Next(1));
        assert_eq!(advance_to_next_word(&words, 3), Advance::Next(4));
        assert_eq!(advance_to_next_word(&words, 4), Advance::CategoryComplete);
        assert_eq!(advance_to_next_word::<u8>(&[], 0), Advance::CategoryComplete);
    }

    #[test]
    fn test_word_shape_summary() {
        assert_eq!(word_shape_summary("CAT"), "1 Word: 1st word (3 letters)");
        assert_eq!(
            word_shape_summary("NEW YORK"),
            "2 Words: 1st word (3 letters), 2nd word (4 letters)"
        );
    }

    #[test]
    fn test_ordinals() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (102, "102nd"),
            (111, "111th"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected);
        }
    }
}
