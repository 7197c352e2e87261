//! Knuth-Morris-Pratt search, generic over the token type.
//!
//! The analyzers call this with `char`, word and line tokens; equality is
//! whatever `PartialEq` means for the token, no strategy-specific logic
//! lives here.

/// Failure table for `pattern`: `table[i]` is the length of the longest
/// proper prefix of `pattern[..=i]` that is also a suffix of it.
pub fn failure_table<T: PartialEq>(pattern: &[T]) -> Vec<usize> {
    let mut table = vec![0usize; pattern.len()];
    let mut len = 0usize;
    let mut i = 1usize;

    while i < pattern.len() {
        if pattern[i] == pattern[len] {
            len += 1;
            table[i] = len;
            i += 1;
        } else if len != 0 {
            len = table[len - 1];
        } else {
            table[i] = 0;
            i += 1;
        }
    }

    table
}

/// All starting positions of `pattern` in `text`, in ascending order.
/// Overlapping occurrences are reported. An empty pattern yields no
/// matches; callers exclude empty patterns before searching.
pub fn find_all<T: PartialEq>(pattern: &[T], text: &[T]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }

    let table = failure_table(pattern);
    let mut matches = Vec::new();
    let mut j = 0usize;

    for (i, token) in text.iter().enumerate() {
        while j > 0 && pattern[j] != *token {
            j = table[j - 1];
        }
        if pattern[j] == *token {
            j += 1;
        }
        if j == pattern.len() {
            matches.push(i + 1 - j);
            j = table[j - 1];
        }
    }

    matches
}

/// First starting position of `pattern` in `text`, if any.
pub fn find_first<T: PartialEq>(pattern: &[T], text: &[T]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return None;
    }

    let table = failure_table(pattern);
    let mut j = 0usize;

    for (i, token) in text.iter().enumerate() {
        while j > 0 && pattern[j] != *token {
            j = table[j - 1];
        }
        if pattern[j] == *token {
            j += 1;
        }
        if j == pattern.len() {
            return Some(i + 1 - j);
        }
    }

    None
}
