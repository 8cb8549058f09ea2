pub(super) fn count_words(text: &str) -> usize {
    let mut count = 0usize;
    let mut cursor = 0usize;

    while let Some((_, next_cursor)) = next_word_at(text, cursor) {
        count += 1;
        cursor = next_cursor;
    }

    count
}

/// Returns the word starting at or after `cursor` and the byte offset just past it.
pub(super) fn next_word_at(text: &str, cursor: usize) -> Option<(&str, usize)> {
    let rest = text.get(cursor..)?;
    let skipped = rest.len() - rest.trim_start().len();
    let start = cursor + skipped;
    if start >= text.len() {
        return None;
    }

    let word_len = text[start..]
        .find(char::is_whitespace)
        .unwrap_or(text.len() - start);

    Some((&text[start..start + word_len], start + word_len))
}
