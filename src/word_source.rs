//! Collaborators the game is played against.
//!
//! `WordSource` supplies categories, words, example sentences and per-user
//! progress markers. `SessionProvider` tells who is playing. The local
//! implementations combine an in-memory [`WordBank`] with a file-backed
//! [`ProgressStore`].

use crate::error::SourceError;
use crate::progress::ProgressStore;
use crate::wordbank::WordBank;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub id: WordId,
    pub text: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: Option<String>,
}

pub trait WordSource {
    fn list_categories(&self) -> Result<Vec<Category>, SourceError>;

    /// Word ids of a category, in play order.
    fn list_word_ids(&self, category: CategoryId) -> Result<Vec<WordId>, SourceError>;

    fn get_last_completed(
        &self,
        category: CategoryId,
        user: &UserId,
    ) -> Result<Option<WordId>, SourceError>;

    /// Words for `ids`, in the order the ids were given.
    fn fetch_words(&self, ids: &[WordId]) -> Result<Vec<Word>, SourceError>;

    fn fetch_examples(&self, word: WordId) -> Result<Vec<String>, SourceError>;

    fn set_last_completed(
        &mut self,
        category: CategoryId,
        user: &UserId,
        word: WordId,
    ) -> Result<(), SourceError>;

    fn delete_progress(&mut self, category: CategoryId, user: &UserId)
    -> Result<(), SourceError>;
}

pub trait SessionProvider {
    fn current_user_id(&self) -> Option<UserId>;
}

/// Session holding a fixed user, typically taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct LocalSession {
    user: Option<UserId>,
}

impl LocalSession {
    pub fn new(user: Option<String>) -> Self {
        Self {
            user: user
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())
                .map(UserId),
        }
    }
}

impl SessionProvider for LocalSession {
    fn current_user_id(&self) -> Option<UserId> {
        self.user.clone()
    }
}

pub struct LocalWordSource {
    bank: WordBank,
    progress: ProgressStore,
}

impl LocalWordSource {
    pub fn new(bank: WordBank, progress: ProgressStore) -> Self {
        Self { bank, progress }
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }
}

impl WordSource for LocalWordSource {
    fn list_categories(&self) -> Result<Vec<Category>, SourceError> {
        Ok(self.bank.categories())
    }

    fn list_word_ids(&self, category: CategoryId) -> Result<Vec<WordId>, SourceError> {
        self.bank
            .word_ids(category)
            .ok_or(SourceError::MissingCategory(category))
    }

    fn get_last_completed(
        &self,
        category: CategoryId,
        user: &UserId,
    ) -> Result<Option<WordId>, SourceError> {
        Ok(self.progress.last_completed(category, user))
    }

    fn fetch_words(&self, ids: &[WordId]) -> Result<Vec<Word>, SourceError> {
        ids.iter()
            .map(|&id| self.bank.word(id).ok_or(SourceError::UnknownWord(id)))
            .collect()
    }

    fn fetch_examples(&self, word: WordId) -> Result<Vec<String>, SourceError> {
        self.bank
            .examples(word)
            .map(<[String]>::to_vec)
            .ok_or(SourceError::UnknownWord(word))
    }

    fn set_last_completed(
        &mut self,
        category: CategoryId,
        user: &UserId,
        word: WordId,
    ) -> Result<(), SourceError> {
        self.progress.set_last_completed(category, user, word)
    }

    fn delete_progress(
        &mut self,
        category: CategoryId,
        user: &UserId,
    ) -> Result<(), SourceError> {
        self.progress.delete(category, user)
    }
}

/// Finds a category by numeric id or by case-insensitive name.
pub fn resolve_category<S: WordSource + ?Sized>(
    source: &S,
    selector: &str,
) -> Result<Category, SourceError> {
    let selector = selector.trim();
    let categories = source.list_categories()?;
    let by_id = selector
        .parse::<u64>()
        .ok()
        .and_then(|id| categories.iter().find(|c| c.id.0 == id));
    by_id
        .or_else(|| {
            categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(selector))
        })
        .cloned()
        .ok_or_else(|| SourceError::UnknownCategory(selector.to_string()))
}
