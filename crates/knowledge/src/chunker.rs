//! Separator-based text chunking with configurable size and overlap.
//!
//! The text is split on a separator, then consecutive pieces are merged back
//! (joined by the separator) while the chunk stays within `chunk_size`
//! characters. After a chunk is emitted, trailing pieces totalling at most
//! `chunk_overlap` characters are carried into the next one. Sizes are
//! counted in characters, not bytes.

use crate::types::Chunk;
use std::collections::VecDeque;

/// Split `text` into chunks of at most `chunk_size` characters.
///
/// A single piece longer than `chunk_size` cannot be split further and is
/// emitted as its own oversized chunk, with a warning. An empty separator
/// splits between every character. Chunks are whitespace-trimmed and empty
/// chunks are dropped.
pub fn split_text(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    separator: &str,
) -> Vec<String> {
    let pieces: Vec<&str> = if separator.is_empty() {
        text.char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect()
    } else {
        text.split(separator).filter(|piece| !piece.is_empty()).collect()
    };

    let chunks = merge_pieces(&pieces, separator, chunk_size, chunk_overlap);

    tracing::debug!(
        "Split text into {} chunks (size: {}, overlap: {})",
        chunks.len(),
        chunk_size,
        chunk_overlap
    );

    chunks
}

/// Split `text` and wrap each piece as a positioned [`Chunk`].
pub fn chunk_text(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    separator: &str,
) -> Vec<Chunk> {
    split_text(text, chunk_size, chunk_overlap, separator)
        .into_iter()
        .enumerate()
        .map(|(position, text)| Chunk::new(position as u32, text))
        .collect()
}

fn merge_pieces(
    pieces: &[&str],
    separator: &str,
    chunk_size: usize,
    chunk_overlap: usize,
) -> Vec<String> {
    let separator_len = separator.chars().count();
    let joiner = |current: &VecDeque<&str>| if current.is_empty() { 0 } else { separator_len };

    let mut chunks = Vec::new();
    let mut current: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for &piece in pieces {
        let len = piece.chars().count();

        if total + len + joiner(&current) > chunk_size && !current.is_empty() {
            emit(&mut chunks, &current, separator, total, chunk_size);

            // Drop leading pieces until what remains fits as overlap
            while total > chunk_overlap
                || (total > 0 && total + len + joiner(&current) > chunk_size)
            {
                let Some(first) = current.pop_front() else {
                    break;
                };
                total = total.saturating_sub(first.chars().count() + joiner(&current));
            }
        }

        current.push_back(piece);
        total += len + if current.len() > 1 { separator_len } else { 0 };
    }

    if !current.is_empty() {
        emit(&mut chunks, &current, separator, total, chunk_size);
    }

    chunks
}

fn emit(
    chunks: &mut Vec<String>,
    current: &VecDeque<&str>,
    separator: &str,
    total: usize,
    chunk_size: usize,
) {
    if total > chunk_size {
        tracing::warn!(
            "Created a chunk of size {}, which is longer than the specified {}",
            total,
            chunk_size
        );
    }

    let joined = current.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
