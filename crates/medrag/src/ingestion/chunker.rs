//! Size-bounded semantic splitting of oversized sections
//!
//! Sections within the word budget pass through whole. Oversized sections
//! are split on a priority list of separators, coarsest first, and the
//! resulting pieces are merged back into chunks that stay within the budget
//! while repeating a trailing window of words across chunk boundaries.

use unicode_segmentation::UnicodeSegmentation;

use crate::config::ChunkingConfig;
use crate::types::{ChunkMeta, Section};

/// Separators tried from coarsest to finest: blank line, bulleted-list
/// markers, single newline, sentence end.
const SEPARATORS: [&str; 5] = ["\n\n", "\n- ", "\n• ", "\n", ". "];

/// A chunk of section text before corpus-wide id assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionChunk {
    /// Chunk text
    pub content: String,
    /// Metadata inherited from the parent section
    pub metadata: ChunkMeta,
}

/// Recursive separator-priority splitter with word-measured overlap
pub struct SemanticChunker {
    max_tokens: usize,
    overlap: usize,
}

impl SemanticChunker {
    /// Create a chunker from the chunking configuration
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            max_tokens: config.max_section_tokens,
            overlap: config.chunk_overlap,
        }
    }

    /// Split one section into chunks of at most `max_section_tokens` words.
    ///
    /// A section already within the budget is kept whole. Splitting is
    /// deterministic: the same section and configuration always produce the
    /// same ordered chunks.
    pub fn chunk_section(&self, section: &Section) -> Vec<SectionChunk> {
        let text = section.text();
        let metadata = ChunkMeta::from_doc(&section.meta, &section.title);

        if word_count(&text) <= self.max_tokens {
            return vec![SectionChunk {
                content: text,
                metadata,
            }];
        }

        let pieces = self.split_recursive(&text, &SEPARATORS);
        self.merge_with_overlap(pieces)
            .into_iter()
            .map(|content| SectionChunk {
                content,
                metadata: metadata.clone(),
            })
            .collect()
    }

    /// Word budget for fresh content per chunk; the overlap seed fills the
    /// rest of the `max_tokens` allowance.
    fn fresh_budget(&self) -> usize {
        self.max_tokens.saturating_sub(self.overlap).max(1)
    }

    /// Break text into pieces no larger than the fresh-content budget,
    /// trying separators coarsest-first and recursing into finer ones for
    /// pieces that remain oversized.
    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let budget = self.fresh_budget();

        if word_count(text) <= budget {
            return vec![text.to_string()];
        }

        let Some((&sep, finer)) = separators.split_first() else {
            return split_word_windows(text, budget);
        };

        if !text.contains(sep) {
            return self.split_recursive(text, finer);
        }

        let mut pieces = Vec::new();
        for part in split_keeping_separator(text, sep) {
            if word_count(&part) <= budget {
                pieces.push(part);
            } else {
                pieces.extend(self.split_recursive(&part, finer));
            }
        }
        pieces
    }

    /// Greedily merge pieces into chunks, seeding each chunk after the
    /// first with the trailing `overlap` words of its predecessor.
    fn merge_with_overlap(&self, pieces: Vec<String>) -> Vec<String> {
        let budget = self.fresh_budget();
        let mut chunks: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_words = 0usize;
        let mut seed = String::new();

        for piece in pieces {
            let piece_words = word_count(&piece);

            if current_words > 0 && current_words + piece_words > budget {
                let chunk = join_seeded(&seed, &current);
                seed = trailing_words(&chunk, self.overlap).to_string();
                chunks.push(chunk);
                current = String::new();
                current_words = 0;
            }

            current.push_str(&piece);
            current_words += piece_words;
        }

        if current_words > 0 {
            chunks.push(join_seeded(&seed, &current));
        }

        chunks
    }
}

/// Count words at Unicode word boundaries
pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

/// Split `text` on `sep`, keeping the separator attached to the preceding
/// piece so concatenating the pieces reproduces the text. Pieces that are
/// pure whitespace are dropped.
fn split_keeping_separator(text: &str, sep: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (idx, _) in text.match_indices(sep) {
        let end = idx + sep.len();
        pieces.push(text[start..end].to_string());
        start = end;
    }
    if start < text.len() {
        pieces.push(text[start..].to_string());
    }

    pieces.retain(|p| !p.trim().is_empty());
    pieces
}

/// Fixed word windows for text that no separator can break down
fn split_word_windows(text: &str, budget: usize) -> Vec<String> {
    let indices: Vec<(usize, &str)> = text.unicode_word_indices().collect();
    if indices.is_empty() {
        return vec![text.to_string()];
    }

    let mut pieces = Vec::new();
    let mut word = 0;
    while word < indices.len() {
        let end_word = (word + budget).min(indices.len());
        let byte_start = indices[word].0;
        let byte_end = if end_word == indices.len() {
            text.len()
        } else {
            indices[end_word].0
        };
        pieces.push(text[byte_start..byte_end].to_string());
        word = end_word;
    }
    pieces
}

/// Suffix of `text` starting at its `n`-th-from-last word boundary
fn trailing_words(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let starts: Vec<usize> = text.unicode_word_indices().map(|(i, _)| i).collect();
    if starts.len() <= n {
        return text;
    }
    &text[starts[starts.len() - n]..]
}

/// Prepend the overlap seed to fresh chunk content
fn join_seeded(seed: &str, content: &str) -> String {
    if seed.is_empty() {
        return content.to_string();
    }
    if seed.ends_with(char::is_whitespace) || content.starts_with(char::is_whitespace) {
        format!("{}{}", seed, content)
    } else {
        format!("{} {}", seed, content)
    }
}
