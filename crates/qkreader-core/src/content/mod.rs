//! Text sources feeding the pacer.

mod static_source;
mod text_utils;

pub use static_source::{StaticSourceError, StaticWordSource};

/// One word handed from a [`TextSource`] to a renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WordToken<'a> {
    pub text: &'a str,
    pub ends_sentence: bool,
}

impl<'a> WordToken<'a> {
    /// Builds a token, flagging words that close a sentence.
    pub fn from_text(text: &'a str) -> Self {
        Self {
            text,
            ends_sentence: text.ends_with(['.', '!', '?']),
        }
    }
}

/// Sequential supplier of words.
///
/// The pacer calls [`TextSource::next_word`] exactly once per firing and places
/// no bound on the number of calls. What happens at the end of the text
/// (wrapping, an error, a sentinel word) is up to the implementation.
pub trait TextSource {
    type Error;

    /// Return the next word in reading order.
    fn next_word(&mut self) -> Result<WordToken<'_>, Self::Error>;

    /// Rewind to the beginning of the text.
    fn reset(&mut self) -> Result<(), Self::Error>;
}
