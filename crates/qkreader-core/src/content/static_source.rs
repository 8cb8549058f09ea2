use core::fmt;

use super::{
    TextSource, WordToken,
    text_utils::{count_words, next_word_at},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StaticSourceError {
    /// None of the paragraphs contains a word.
    Empty,
}

impl fmt::Display for StaticSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("text source has no words"),
        }
    }
}

/// In-memory paragraphs read in order, wrapping back to the first paragraph
/// after the last one.
#[derive(Debug, Clone)]
pub struct StaticWordSource<'a> {
    paragraphs: &'a [&'a str],
    paragraph_index: usize,
    paragraph_cursor: usize,
    paragraph_word_index: u16,
    paragraph_word_total: u16,
}

impl<'a> StaticWordSource<'a> {
    pub fn new(paragraphs: &'a [&'a str]) -> Self {
        let mut source = Self {
            paragraphs,
            paragraph_index: 0,
            paragraph_cursor: 0,
            paragraph_word_index: 0,
            paragraph_word_total: 1,
        };
        source.paragraph_word_total = source.compute_current_word_total();
        source
    }

    /// Current paragraph progress as `(word_index, word_total)`.
    pub fn paragraph_progress(&self) -> (u16, u16) {
        (self.paragraph_word_index, self.paragraph_word_total.max(1))
    }

    /// Current paragraph number (1-based, `0` when there are no paragraphs).
    pub fn paragraph_number(&self) -> u16 {
        if self.paragraphs.is_empty() {
            0
        } else {
            (self.paragraph_index + 1).min(u16::MAX as usize) as u16
        }
    }

    pub fn paragraph_total(&self) -> u16 {
        self.paragraphs.len().min(u16::MAX as usize) as u16
    }

    fn compute_current_word_total(&self) -> u16 {
        let Some(paragraph) = self.paragraphs.get(self.paragraph_index) else {
            return 1;
        };

        count_words(paragraph).clamp(1, u16::MAX as usize) as u16
    }

    fn advance_paragraph(&mut self) {
        if self.paragraphs.is_empty() {
            return;
        }

        self.paragraph_index = (self.paragraph_index + 1) % self.paragraphs.len();
        self.paragraph_cursor = 0;
        self.paragraph_word_index = 0;
        self.paragraph_word_total = self.compute_current_word_total();
    }
}

impl TextSource for StaticWordSource<'_> {
    type Error = StaticSourceError;

    fn next_word(&mut self) -> Result<WordToken<'_>, Self::Error> {
        if self.paragraphs.is_empty() {
            return Err(StaticSourceError::Empty);
        }

        // One extra pass lets the scan reach words that precede the cursor's
        // paragraph after wrapping.
        for _ in 0..=self.paragraphs.len() {
            let paragraph = self.paragraphs[self.paragraph_index];

            if let Some((word, next_cursor)) = next_word_at(paragraph, self.paragraph_cursor) {
                self.paragraph_cursor = next_cursor;
                self.paragraph_word_index = self.paragraph_word_index.saturating_add(1);
                return Ok(WordToken::from_text(word));
            }

            self.advance_paragraph();
        }

        Err(StaticSourceError::Empty)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.paragraph_index = 0;
        self.paragraph_cursor = 0;
        self.paragraph_word_index = 0;
        self.paragraph_word_total = self.compute_current_word_total();
        Ok(())
    }
}
