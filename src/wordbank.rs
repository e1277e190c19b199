use crate::error::SourceError;
use crate::word_source::{Category, CategoryId, Word, WordId};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.json");

#[derive(Debug, Deserialize)]
struct WordBankFile {
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    id: CategoryId,
    name: String,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    words: Vec<WordEntry>,
}

#[derive(Debug, Deserialize)]
struct WordEntry {
    id: WordId,
    word: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    examples: Vec<String>,
}

#[derive(Debug)]
struct CategoryRecord {
    category: Category,
    word_ids: Vec<WordId>,
}

#[derive(Debug)]
struct WordRecord {
    word: Word,
    examples: Vec<String>,
}

/// Categories, words and example sentences, validated and indexed by id.
#[derive(Debug)]
pub struct WordBank {
    categories: Vec<CategoryRecord>,
    words: HashMap<WordId, WordRecord>,
}

impl WordBank {
    fn from_file(file: WordBankFile) -> Result<Self, SourceError> {
        let mut seen_categories = HashSet::new();
        let mut categories = Vec::with_capacity(file.categories.len());
        let mut words = HashMap::new();

        for entry in file.categories {
            if !seen_categories.insert(entry.id) {
                return Err(SourceError::InvalidWordBank(format!(
                    "duplicate category id {}",
                    entry.id
                )));
            }
            let mut word_ids = Vec::with_capacity(entry.words.len());
            for w in entry.words {
                if !w.word.chars().any(char::is_alphanumeric) {
                    return Err(SourceError::InvalidWordBank(format!(
                        "word {} has no letters",
                        w.id
                    )));
                }
                if words.contains_key(&w.id) {
                    return Err(SourceError::InvalidWordBank(format!(
                        "duplicate word id {}",
                        w.id
                    )));
                }
                word_ids.push(w.id);
                words.insert(
                    w.id,
                    WordRecord {
                        word: Word {
                            id: w.id,
                            text: w.word.trim().to_string(),
                            description: w.description,
                        },
                        examples: w.examples,
                    },
                );
            }
            categories.push(CategoryRecord {
                category: Category {
                    id: entry.id,
                    name: entry.name,
                    icon: entry.icon,
                },
                word_ids,
            });
        }

        Ok(Self { categories, words })
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.iter().map(|c| c.category.clone()).collect()
    }

    pub fn word_ids(&self, category: CategoryId) -> Option<Vec<WordId>> {
        self.categories
            .iter()
            .find(|c| c.category.id == category)
            .map(|c| c.word_ids.clone())
    }

    pub fn word(&self, id: WordId) -> Option<Word> {
        self.words.get(&id).map(|r| r.word.clone())
    }

    pub fn examples(&self, id: WordId) -> Option<&[String]> {
        self.words.get(&id).map(|r| r.examples.as_slice())
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

pub fn load_wordbank_from_str(data: &str) -> Result<WordBank, SourceError> {
    WordBank::from_file(serde_json::from_str(data)?)
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<WordBank, SourceError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    load_wordbank_from_str(&data)
}
