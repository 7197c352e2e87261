//! Similarity strategies built on the KMP matcher.
//!
//! Each method reduces a pair of plaintexts to a similarity percentage in
//! [0, 100] plus the matched sequences that produced it. The percentage is
//! always the matched amount over the larger document, so comparing A to B
//! and B to A gives the same answer.

pub mod chars;
pub mod line;
mod runs;
pub mod word;

use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    WordBased,
    CharBased,
    LineBased,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::WordBased, Method::CharBased, Method::LineBased];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::WordBased => "word_based",
            Method::CharBased => "char_based",
            Method::LineBased => "line_based",
        }
    }
}

impl Default for Method {
    fn default() -> Self {
        Method::WordBased
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "word_based" => Ok(Method::WordBased),
            "char_based" => Ok(Method::CharBased),
            "line_based" => Ok(Method::LineBased),
            other => Err(Error::UnknownMethod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SequenceKind {
    #[serde(rename = "common_line")]
    CommonLine,
    #[serde(rename = "common_word_run")]
    CommonWordRun,
    #[serde(rename = "common_substring")]
    CommonSubstring,
}

/// A contiguous run of matching content. `length` is in the unit of the
/// kind: lines, words or characters.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedSequence {
    #[serde(rename = "type")]
    pub kind: SequenceKind,
    pub content: String,
    pub length: usize,
}

/// Outcome of one analyzer invocation over a document pair.
#[derive(Debug, Clone)]
pub struct Similarity {
    pub percent: u8,
    pub sequences: Vec<MatchedSequence>,
}

impl Similarity {
    fn none() -> Self {
        Similarity {
            percent: 0,
            sequences: Vec::new(),
        }
    }
}

/// Analyzer thresholds, validated at construction. A zero threshold is a
/// programming error, not a runtime condition, so it is rejected here once
/// and the analyzers themselves are infallible.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerConfig {
    min_run_words: usize,
    min_substring_chars: usize,
}

impl AnalyzerConfig {
    pub fn new(min_run_words: usize, min_substring_chars: usize) -> Result<Self, Error> {
        if min_run_words == 0 {
            return Err(Error::InvalidThreshold("min_run_words"));
        }
        if min_substring_chars == 0 {
            return Err(Error::InvalidThreshold("min_substring_chars"));
        }
        Ok(AnalyzerConfig {
            min_run_words,
            min_substring_chars,
        })
    }

    pub fn min_run_words(&self) -> usize {
        self.min_run_words
    }

    pub fn min_substring_chars(&self) -> usize {
        self.min_substring_chars
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            min_run_words: 2,
            min_substring_chars: 20,
        }
    }
}

/// Run the selected strategy over one document pair.
pub fn compare(method: Method, config: &AnalyzerConfig, a: &str, b: &str) -> Similarity {
    match method {
        Method::WordBased => word::compare(config, a, b),
        Method::CharBased => chars::compare(config, a, b),
        Method::LineBased => line::compare(a, b),
    }
}

/// `round(100 * matched / larger)`, clamped to [0, 100].
fn percent(matched: usize, larger: usize) -> u8 {
    if larger == 0 {
        return 0;
    }
    let pct = (matched as f64 * 100.0 / larger as f64).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Minimum run length actually applied: the configured threshold, clamped
/// to the shorter document so that identical short documents still score
/// 100.
fn effective_min_len(configured: usize, shorter_len: usize) -> usize {
    configured.min(shorter_len).max(1)
}
