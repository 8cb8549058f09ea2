use std::io::{self, Stdout, Write};

use qkreader_core::{
    content::WordToken,
    render::{TextRenderer, WordBuffer, orp_char_index},
};

const WORD_BUFFER_BYTES: usize = 96;

/// Prints one word per line, shifted so every word's recognition point lands
/// in the same terminal column. A blank line follows each sentence.
pub(super) struct ConsoleRenderer<W = Stdout> {
    out: W,
    anchor_column: usize,
    last_word: WordBuffer<WORD_BUFFER_BYTES>,
}

impl ConsoleRenderer {
    pub(super) fn stdout(anchor_column: usize) -> Self {
        Self::new(io::stdout(), anchor_column)
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub(super) fn new(out: W, anchor_column: usize) -> Self {
        Self {
            out,
            anchor_column,
            last_word: WordBuffer::new(),
        }
    }

    pub(super) fn last_word(&self) -> &str {
        self.last_word.as_str()
    }
}

impl<W: Write> TextRenderer for ConsoleRenderer<W> {
    type Error = io::Error;

    fn display_text(&mut self, word: WordToken<'_>) -> Result<(), Self::Error> {
        self.last_word.set(word.text);
        let text = self.last_word.as_str();
        let pad = self.anchor_column.saturating_sub(orp_char_index(text));

        writeln!(self.out, "{:pad$}{}", "", text, pad = pad)?;
        if word.ends_sentence {
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}
