//! Corpus assembly and chunking.
//!
//! A domain's corpus is the extracted PDF text followed by the
//! flattened JSON facts. The chunker cuts the corpus into contiguous
//! spans of at most `chunk_size` characters where each chunk starts
//! `chunk_overlap` characters before the previous chunk's end, so
//! dropping the overlapping prefixes reproduces the corpus exactly.
//! Cut points prefer paragraph and sentence breaks over mid-word
//! splits.

use serde::{Deserialize, Serialize};

/// A bounded-length span of the corpus, the unit of retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    pub text: String,
    /// Character offset of the chunk within the corpus.
    pub start_offset: usize,
    pub chunk_index: usize,
}

/// Join PDF text and flattened JSON facts with a blank-line separator.
pub fn assemble_corpus(pdf_text: &str, json_text: &str) -> String {
    match (pdf_text.is_empty(), json_text.is_empty()) {
        (true, true) => String::new(),
        (false, true) => pdf_text.to_string(),
        (true, false) => json_text.to_string(),
        (false, false) => format!("{}\n\n{}", pdf_text, json_text),
    }
}

#[derive(Debug, Clone)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Chunker {
    /// `chunk_overlap` must be smaller than `chunk_size`; config
    /// validation enforces this before a chunker is built.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap: chunk_overlap.min(chunk_size.saturating_sub(1)),
        }
    }

    pub fn split(&self, corpus: &str) -> Vec<Chunk> {
        let chars: Vec<char> = corpus.chars().collect();
        let total = chars.len();
        if total == 0 {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut chunk_index = 0;

        loop {
            let hard_end = (start + self.chunk_size).min(total);
            let end = if hard_end == total {
                total
            } else {
                find_break(&chars, start, hard_end)
            };

            chunks.push(Chunk {
                text: chars[start..end].iter().collect(),
                start_offset: start,
                chunk_index,
            });

            if end == total {
                break;
            }
            // Re-expose trailing context at the head of the next chunk,
            // always advancing by at least one character.
            start = end.saturating_sub(self.chunk_overlap).max(start + 1);
            chunk_index += 1;
        }

        chunks
    }
}

/// Pick a cut point in `(start, hard_end]`, preferring a paragraph
/// break, then a sentence end, then whitespace. The search floor keeps
/// chunks from collapsing below half the window.
fn find_break(chars: &[char], start: usize, hard_end: usize) -> usize {
    let window = hard_end - start;
    let floor = start + window / 2;

    if let Some(pos) = rfind_paragraph_break(chars, floor, hard_end) {
        return pos;
    }
    if let Some(pos) = rfind_sentence_end(chars, floor, hard_end) {
        return pos;
    }
    for idx in (floor..hard_end).rev() {
        if chars[idx].is_whitespace() {
            return idx + 1;
        }
    }
    hard_end
}

fn rfind_paragraph_break(chars: &[char], floor: usize, end: usize) -> Option<usize> {
    for idx in (floor..end.saturating_sub(1)).rev() {
        if chars[idx] == '\n' && chars[idx + 1] == '\n' {
            return Some(idx + 2);
        }
    }
    None
}

fn rfind_sentence_end(chars: &[char], floor: usize, end: usize) -> Option<usize> {
    for idx in (floor..end.saturating_sub(1)).rev() {
        let is_terminator = matches!(chars[idx], '.' | '!' | '?');
        if is_terminator && (chars[idx + 1] == ' ' || chars[idx + 1] == '\n') {
            return Some(idx + 2);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(chunks: &[Chunk]) -> String {
        let mut out = String::new();
        for chunk in chunks {
            let covered = out.chars().count();
            let skip = covered - chunk.start_offset;
            out.extend(chunk.text.chars().skip(skip));
        }
        out
    }

    #[test]
    fn empty_corpus_yields_no_chunks() {
        let chunker = Chunker::new(1000, 200);
        assert!(chunker.split("").is_empty());
    }

    #[test]
    fn short_corpus_yields_single_chunk() {
        let chunker = Chunker::new(1000, 200);
        let chunks = chunker.split("A short HR notice.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "A short HR notice.");
        assert_eq!(chunks[0].start_offset, 0);
    }

    #[test]
    fn chunks_respect_the_size_bound() {
        let chunker = Chunker::new(120, 30);
        let corpus = "Employees accrue leave monthly. ".repeat(40);
        for chunk in chunker.split(&corpus) {
            assert!(chunk.text.chars().count() <= 120);
        }
    }

    #[test]
    fn consecutive_chunks_share_overlap() {
        let chunker = Chunker::new(100, 25);
        let corpus = "The payroll cycle closes on the twenty-fifth. ".repeat(20);
        let chunks = chunker.split(&corpus);
        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let prev_end = pair[0].start_offset + pair[0].text.chars().count();
            assert!(pair[1].start_offset < prev_end, "chunks must overlap");
            assert!(prev_end - pair[1].start_offset <= 25);
        }
    }

    #[test]
    fn removing_overlaps_reproduces_the_corpus() {
        let chunker = Chunker::new(90, 20);
        let corpus = "Health cover extends to dependents. Dental is optional.\n\n".repeat(15);
        let chunks = chunker.split(&corpus);
        assert_eq!(reassemble(&chunks), corpus);
    }

    #[test]
    fn round_trip_holds_without_natural_boundaries() {
        let chunker = Chunker::new(50, 10);
        let corpus: String = std::iter::repeat('x').take(400).collect();
        let chunks = chunker.split(&corpus);
        assert_eq!(reassemble(&chunks), corpus);
    }

    #[test]
    fn cuts_prefer_sentence_boundaries() {
        let chunker = Chunker::new(80, 10);
        let corpus =
            "Reviews happen in April. Increments follow in June. Bonuses are paid in July. \
             Ratings range from one to five. Appeals close in August."
                .to_string();
        let chunks = chunker.split(&corpus);
        assert!(chunks.len() > 1);
        // Every non-final chunk should end at a sentence boundary.
        for chunk in &chunks[..chunks.len() - 1] {
            assert!(
                chunk.text.trim_end().ends_with('.'),
                "expected sentence-aligned cut, got: {:?}",
                chunk.text
            );
        }
    }

    #[test]
    fn assemble_joins_with_blank_line() {
        assert_eq!(assemble_corpus("pdf", "facts"), "pdf\n\nfacts");
        assert_eq!(assemble_corpus("pdf", ""), "pdf");
        assert_eq!(assemble_corpus("", "facts"), "facts");
        assert_eq!(assemble_corpus("", ""), "");
    }
}
