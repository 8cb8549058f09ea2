use std::{fs, io};

use static_cell::StaticCell;

/// Built-in text used when no file is given on the command line.
pub(super) const SAMPLE_PARAGRAPHS: [&str; 3] = [
    "Rapid serial visual presentation shows a text one word at a time, always in the \
same place on the screen. The eye no longer has to travel along a line, so most of the \
effort of reading goes into recognising words.",
    "The first word stays up a little longer than the rest. After that the pace settles \
into the speed chosen by the reader, counted in words per minute.",
    "Pause at any moment to look away, and resume where you left off. Stop to return to \
the beginning of the text.",
];

static TEXT: StaticCell<String> = StaticCell::new();
static PARAGRAPHS: StaticCell<Vec<&'static str>> = StaticCell::new();

/// Reads `path` once for the lifetime of the process and splits it into paragraphs.
pub(super) fn load_paragraphs(path: &str) -> io::Result<&'static [&'static str]> {
    let contents = fs::read_to_string(path)?;
    let text: &'static str = TEXT.init(contents).as_str();
    Ok(PARAGRAPHS.init(split_paragraphs(text)).as_slice())
}

/// Paragraphs are runs of non-blank lines separated by one or more blank lines.
pub(super) fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut start = None;
    let mut end = 0usize;
    let mut offset = 0usize;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some(from) = start.take() {
                paragraphs.push(text[from..end].trim());
            }
        } else {
            start.get_or_insert(offset);
            end = offset + line.len();
        }
        offset += line.len();
    }

    if let Some(from) = start {
        paragraphs.push(text[from..end].trim());
    }

    paragraphs
}
