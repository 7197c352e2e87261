//! Greedy extraction of common token runs with consumed-range exclusion.
//!
//! Matched spans are never cut out of the sequences; instead a consumed
//! mask is kept per side and later rounds only search the still-open
//! segments. This keeps the token slices immutable and makes each round
//! easy to test in isolation.

use crate::matcher;

/// One common run: pattern-side start, text-side start, length in tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonRun {
    pub pattern_start: usize,
    pub text_start: usize,
    pub len: usize,
}

/// Repeatedly find the longest run of unconsumed pattern tokens inside the
/// unconsumed text tokens, mark both spans consumed, and stop once no run
/// of at least `min_len` tokens remains.
///
/// Ties between equal-length candidates go to the earliest position in the
/// text side, then the earliest position in the pattern side.
pub fn greedy_common_runs<T: PartialEq>(
    pattern: &[T],
    text: &[T],
    min_len: usize,
) -> Vec<CommonRun> {
    debug_assert!(min_len >= 1);

    let mut pattern_used = vec![false; pattern.len()];
    let mut text_used = vec![false; text.len()];
    let mut runs = Vec::new();

    while let Some(run) = best_run(pattern, text, &pattern_used, &text_used, min_len) {
        for flag in &mut pattern_used[run.pattern_start..run.pattern_start + run.len] {
            *flag = true;
        }
        for flag in &mut text_used[run.text_start..run.text_start + run.len] {
            *flag = true;
        }
        runs.push(run);
    }

    runs
}

/// Maximal unconsumed ranges as (start, len) pairs.
fn open_segments(used: &[bool]) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut i = 0;

    while i < used.len() {
        if used[i] {
            i += 1;
            continue;
        }
        let start = i;
        while i < used.len() && !used[i] {
            i += 1;
        }
        segments.push((start, i - start));
    }

    segments
}

fn best_run<T: PartialEq>(
    pattern: &[T],
    text: &[T],
    pattern_used: &[bool],
    text_used: &[bool],
    min_len: usize,
) -> Option<CommonRun> {
    let pattern_segments = open_segments(pattern_used);
    let text_segments = open_segments(text_used);

    let max_pattern = pattern_segments.iter().map(|&(_, l)| l).max().unwrap_or(0);
    let max_text = text_segments.iter().map(|&(_, l)| l).max().unwrap_or(0);

    let mut len = max_pattern.min(max_text);
    while len >= min_len {
        let mut best: Option<CommonRun> = None;

        for &(seg_start, seg_len) in &pattern_segments {
            if seg_len < len {
                continue;
            }
            for offset in 0..=(seg_len - len) {
                let window_start = seg_start + offset;
                let window = &pattern[window_start..window_start + len];

                for &(text_start, text_len) in &text_segments {
                    if text_len < len {
                        continue;
                    }
                    if let Some(pos) =
                        matcher::find_first(window, &text[text_start..text_start + text_len])
                    {
                        let candidate = CommonRun {
                            pattern_start: window_start,
                            text_start: text_start + pos,
                            len,
                        };
                        let better = match best {
                            None => true,
                            Some(current) => {
                                candidate.text_start < current.text_start
                                    || (candidate.text_start == current.text_start
                                        && candidate.pattern_start < current.pattern_start)
                            }
                        };
                        if better {
                            best = Some(candidate);
                        }
                    }
                }
            }
        }

        if best.is_some() {
            return best;
        }
        len -= 1;
    }

    None
}
