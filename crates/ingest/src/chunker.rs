use crate::error::IngestError;

/// Split `text` into overlapping word windows.
///
/// The text is tokenized on whitespace; each chunk is `size` consecutive
/// tokens re-joined with single spaces, and the window start advances by
/// `size - overlap` each step until it reaches the token count. The iterator
/// is a pure function of its input: identical `(text, size, overlap)` always
/// yields the identical chunk sequence.
///
/// Empty or whitespace-only text yields zero chunks. `overlap >= size` (or
/// `size == 0`) fails fast with [`IngestError::InvalidChunking`] instead of
/// looping or emitting non-advancing windows.
pub fn chunk(text: &str, size: usize, overlap: usize) -> Result<Chunks<'_>, IngestError> {
    if size == 0 || overlap >= size {
        return Err(IngestError::InvalidChunking { size, overlap });
    }

    Ok(Chunks {
        words: text.split_whitespace().collect(),
        size,
        step: size - overlap,
        start: 0,
    })
}

/// Lazy chunk sequence produced by [`chunk`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    words: Vec<&'a str>,
    size: usize,
    step: usize,
    start: usize,
}

impl Iterator for Chunks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.start >= self.words.len() {
            return None;
        }
        let end = usize::min(self.start + self.size, self.words.len());
        let window = self.words[self.start..end].join(" ");
        self.start += self.step;
        Some(window)
    }
}
