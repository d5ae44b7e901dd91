//! Splitting of long replies into chunks that fit a transport's message
//! length limit.
//!
//! Limits count Unicode scalar values, matching how Discord measures
//! message length. A chunk ends at the nearest whitespace boundary that
//! does not exceed the limit: right at the limit when the next character is
//! whitespace, otherwise just after the last whitespace in the window. A
//! window without whitespace is cut hard at the limit. Chunks are borrowed slices, so concatenating them reproduces the
//! input exactly.

use std::iter::FusedIterator;

/// Lazily split `text` into chunks of at most `limit` characters.
///
/// Empty text yields no chunks. A `limit` of zero is treated as one. The
/// returned iterator is `Clone`, so a caller can walk it more than once.
pub fn chunk(text: &str, limit: usize) -> Chunks<'_> {
    Chunks {
        rest: text,
        limit: limit.max(1),
    }
}

/// Iterator returned by [`chunk`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    limit: usize,
}

impl<'a> Chunks<'a> {
    /// Byte offset in `rest` where the next chunk ends.
    fn split_point(&self) -> usize {
        let Some((cut, _)) = self.rest.char_indices().nth(self.limit) else {
            return self.rest.len();
        };
        if self.rest[cut..].starts_with(char::is_whitespace) {
            return cut;
        }
        self.rest[..cut]
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(idx, c)| idx + c.len_utf8())
            .unwrap_or(cut)
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let (head, tail) = self.rest.split_at(self.split_point());
        self.rest = tail;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.rest.is_empty() {
            (0, Some(0))
        } else {
            (1, Some(self.rest.len()))
        }
    }
}

impl FusedIterator for Chunks<'_> {}
