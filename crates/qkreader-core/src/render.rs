//! Renderer contract and helpers shared by renderer implementations.

use heapless::String;

use crate::content::WordToken;

/// Accepts words chosen by the pacer and presents them.
pub trait TextRenderer {
    type Error;

    fn display_text(&mut self, word: WordToken<'_>) -> Result<(), Self::Error>;
}

/// Bounded copy of the most recently displayed word.
///
/// Words longer than `N` bytes are cut at the last char boundary that fits.
#[derive(Clone, Debug, Default)]
pub struct WordBuffer<const N: usize> {
    text: String<N>,
}

impl<const N: usize> WordBuffer<N> {
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    pub fn set(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

/// Char index of the optimal recognition point: the letter the reader's eye
/// should land on, slightly left of the middle of the word's letters.
/// Punctuation is skipped when counting letters.
pub fn orp_char_index(word: &str) -> usize {
    let total_chars = word.chars().count();
    let letter_chars = word.chars().filter(|c| c.is_alphanumeric()).count();

    if total_chars == 0 {
        return 0;
    }
    if letter_chars == 0 {
        return (total_chars - 1) / 2;
    }

    let target_letter = match letter_chars {
        1 => 0,
        2..=5 => 1,
        6..=9 => 2,
        10..=13 => 3,
        _ => 4,
    };

    word.chars()
        .enumerate()
        .filter(|(_, c)| c.is_alphanumeric())
        .nth(target_letter.min(letter_chars - 1))
        .map_or(0, |(index, _)| index)
}
