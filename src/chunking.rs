//! Deterministic fixed-size text chunking.
//!
//! [`TextChunker`] splits normalized text into overlapping windows measured
//! in characters. Identical input and parameters always produce an identical
//! sequence of chunks, which re-ingestion relies on.

/// Default window size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive windows in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Splits text into fixed-size overlapping windows by character count.
///
/// Whitespace runs are collapsed to single spaces and the text is trimmed
/// before windowing. Offsets are measured in characters, not bytes, so
/// multi-byte text chunks correctly.
///
/// # Example
///
/// ```rust
/// use docrag::TextChunker;
///
/// let chunker = TextChunker::new(5, 2);
/// let chunks = chunker.chunk("abcdefgh");
/// assert_eq!(chunks, vec!["abcde", "defgh"]);
/// ```
#[derive(Debug, Clone)]
pub struct TextChunker {
    size: usize,
    overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl TextChunker {
    /// Create a chunker with the given window size and overlap, in characters.
    ///
    /// An `overlap >= size` is tolerated: the step is floored at one
    /// character, so progress is always made.
    pub fn new(size: usize, overlap: usize) -> Self {
        Self { size, overlap }
    }

    /// Split `text` into overlapping windows.
    ///
    /// Returns an empty `Vec` when the normalized text is empty — empty or
    /// unreadable input is a signaled outcome for the caller, not an error.
    /// The last window may be shorter than the configured size.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let clean = normalize_whitespace(text);
        if clean.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = clean.chars().collect();
        let step = self.size.saturating_sub(self.overlap).max(1);
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            if start + self.size >= chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }

    /// The configured window size in characters.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The configured overlap in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }
}

/// Collapse whitespace runs to single spaces and trim the ends.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            in_run = true;
        } else {
            if in_run && !out.is_empty() {
                out.push(' ');
            }
            in_run = false;
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_only_yield_no_chunks() {
        let chunker = TextChunker::default();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk(" \t\n\r  ").is_empty());
    }

    #[test]
    fn whitespace_runs_collapse_before_windowing() {
        let chunker = TextChunker::new(100, 0);
        assert_eq!(chunker.chunk("  a\t\tb\n\nc  "), vec!["a b c"]);
    }

    #[test]
    fn single_character_yields_one_chunk() {
        let chunker = TextChunker::new(1000, 200);
        assert_eq!(chunker.chunk("x"), vec!["x"]);
    }

    #[test]
    fn short_text_yields_one_chunk() {
        let chunker = TextChunker::new(1000, 200);
        assert_eq!(chunker.chunk("hello world"), vec!["hello world"]);
    }

    #[test]
    fn windows_overlap_by_configured_amount() {
        let chunker = TextChunker::new(5, 2);
        // step = 3: windows at 0, 3, 6
        assert_eq!(chunker.chunk("abcdefghij"), vec!["abcde", "defgh", "ghij"]);
    }

    #[test]
    fn overlap_at_least_size_still_terminates() {
        let chunker = TextChunker::new(3, 5);
        // step floored at 1
        let chunks = chunker.chunk("abcde");
        assert_eq!(chunks, vec!["abc", "bcd", "cde"]);
    }

    #[test]
    fn offsets_are_character_based() {
        let chunker = TextChunker::new(4, 1);
        // Multi-byte characters must not split mid-codepoint.
        let chunks = chunker.chunk("日本語のテキスト");
        assert_eq!(chunks, vec!["日本語の", "のテキス", "スト"]);
    }

    #[test]
    fn chunk_count_matches_window_formula() {
        let chunker = TextChunker::new(1000, 200);
        let text = "x".repeat(2500);
        // step = 800, starts at 0, 800, 1600; the window at 1600 covers the tail.
        let chunks = chunker.chunk(&text);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1000);
        assert_eq!(chunks[1].len(), 1000);
        assert_eq!(chunks[2].len(), 900);
    }

    #[test]
    fn chunking_is_deterministic() {
        let chunker = TextChunker::new(50, 10);
        let text = "the quick brown fox jumps over the lazy dog ".repeat(20);
        assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
    }
}
