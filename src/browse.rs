use crate::word_source::Word;

/// Steps through a category's words one at a time. Navigation stops at both ends.
#[derive(Debug)]
pub struct WordBrowser {
    words: Vec<Word>,
    index: usize,
}

impl WordBrowser {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words, index: 0 }
    }

    pub fn current(&self) -> Option<&Word> {
        self.words.get(self.index)
    }

    /// Zero-based index of the current word.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn next_word(&mut self) -> bool {
        if self.index + 1 < self.words.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_word(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word_source::WordId;

    fn words(texts: &[&str]) -> Vec<Word> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Word {
                id: WordId(i as u64),
                text: (*t).to_string(),
                description: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_navigation_is_bounded() {
        let mut browser = WordBrowser::new(words(&["ONE", "TWO", "THREE"]));
        assert_eq!(browser.current().unwrap().text, "ONE");
        assert!(!browser.previous_word());
        assert!(browser.next_word());
        assert!(browser.next_word());
        assert_eq!(browser.current().unwrap().text, "THREE");
        assert!(!browser.next_word());
        assert_eq!(browser.position(), 2);
        assert!(browser.previous_word());
        assert_eq!(browser.current().unwrap().text, "TWO");
    }

    #[test]
    fn test_empty_browser() {
        let mut browser = WordBrowser::new(Vec::new());
        assert!(browser.is_empty());
        assert!(browser.current().is_none());
        assert!(!browser.next_word());
        assert!(!browser.previous_word());
    }
}
