//! Property tests for chunk windowing coverage and determinism.

use docrag::TextChunker;
use proptest::prelude::*;

/// The normalization the chunker applies before windowing.
fn normalized(text: &str) -> Vec<char> {
    text.split_whitespace().collect::<Vec<_>>().join(" ").chars().collect()
}

/// Expected chunk count for normalized length `len`: one window when the
/// text fits, otherwise `ceil((len - overlap) / step)`.
fn expected_count(len: usize, size: usize, overlap: usize) -> usize {
    if len <= size {
        1
    } else {
        let step = size - overlap;
        (len - overlap).div_ceil(step)
    }
}

/// **Property: windowed chunks tile the normalized text with no gaps.**
/// Every chunk equals the character window at its computed offset, and the
/// final window reaches the end of the text.
mod prop_window_coverage {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn chunks_match_their_windows(
            text in "[a-zA-Z0-9 àéü日本語\\t\\n]{1,300}",
            size in 1usize..50,
            overlap_fraction in 0usize..10,
        ) {
            // overlap strictly below size, as valid configurations require
            let overlap = size * overlap_fraction / 10;
            let chars = normalized(&text);
            let chunks = TextChunker::new(size, overlap).chunk(&text);

            if chars.is_empty() {
                prop_assert!(chunks.is_empty());
                return Ok(());
            }

            prop_assert_eq!(chunks.len(), expected_count(chars.len(), size, overlap));

            let step = size - overlap;
            for (k, chunk) in chunks.iter().enumerate() {
                let start = k * step;
                let end = (start + size).min(chars.len());
                let expected: String = chars[start..end].iter().collect();
                prop_assert_eq!(chunk, &expected);
            }

            // The last window covers the tail of the text.
            let last_start = (chunks.len() - 1) * step;
            prop_assert!(last_start + size >= chars.len());
        }
    }
}

/// **Property: chunking always terminates and makes progress**, even for
/// degenerate `overlap >= size` configurations where the step floors at one.
mod prop_degenerate_overlap {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn oversized_overlap_still_terminates(
            text in "[a-z ]{1,100}",
            size in 1usize..20,
            extra in 0usize..20,
        ) {
            let overlap = size + extra;
            let chars = normalized(&text);
            let chunks = TextChunker::new(size, overlap).chunk(&text);

            if chars.is_empty() {
                prop_assert!(chunks.is_empty());
            } else if chars.len() <= size {
                prop_assert_eq!(chunks.len(), 1);
            } else {
                // step = 1: one window per start offset up to the last fit
                prop_assert_eq!(chunks.len(), chars.len() - size + 1);
            }
        }
    }
}

/// **Property: chunking is deterministic and idempotent across calls.**
mod prop_determinism {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn repeated_calls_agree(
            text in "[a-zA-Z0-9 .,]{0,300}",
            size in 1usize..50,
            overlap in 0usize..50,
        ) {
            let chunker = TextChunker::new(size, overlap);
            prop_assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
        }
    }
}
