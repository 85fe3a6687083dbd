//! Fuzzy matching of queries against candidate labels
//!
//! The default [`WordStartMatcher`] emulates the "type the initials of a
//! camel-case identifier" habit: `GL` finds `GreetingLogger`, `glog` finds it
//! too, and tighter candidates rank above longer ones.
//!
//! # Scoring
//!
//! The candidate is scanned once, left to right. Each matched character adds
//! the current streak value, which starts at [`BASE_SCORE`] and grows by
//! [`STREAK_STEP`] for every consecutive hit. A miss resets the streak. An
//! uppercase query character that lands on an uppercase word start earns
//! [`WORD_START_BONUS`] on top. Finally the number of unmatched candidate
//! characters is subtracted.
//!
//! ```
//! use typepick::matcher::score_and_include;
//!
//! assert!(score_and_include("GL", "GreetingLogger").included);
//! assert!(!score_and_include("GL", "AnotherLogger").included);
//! ```

use clap::ValueEnum;
use nucleo::pattern::{CaseMatching, Normalization, Pattern};
use nucleo::{Config, Utf32Str};
use serde::{Deserialize, Serialize};

/// Ranking score; higher is a better match
pub type MatchScore = i32;

/// Score granted to the first character of a streak
pub const BASE_SCORE: MatchScore = 5;

/// Added to the streak value after every consecutive hit
pub const STREAK_STEP: MatchScore = 2;

/// Extra score for an uppercase query character hitting an uppercase word start
pub const WORD_START_BONUS: MatchScore = 3;

/// Outcome of matching one query against one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Whether the candidate belongs in the result set
    pub included: bool,
    /// Ranking score; meaningless when `included` is false
    pub score: MatchScore,
}

impl MatchResult {
    /// A candidate that is left out of the results
    pub const EXCLUDED: Self = Self {
        included: false,
        score: 0,
    };

    /// Convert to `Some(score)` for included candidates
    #[must_use]
    pub const fn into_option(self) -> Option<MatchScore> {
        if self.included {
            Some(self.score)
        } else {
            None
        }
    }
}

/// Something that can decide inclusion and rank a candidate for a query
///
/// Implementations must be deterministic: the same `(query, candidate)` pair
/// always yields the same result.
pub trait Matcher {
    /// Score `candidate` against `query`
    fn score_and_include(&mut self, query: &str, candidate: &str) -> MatchResult;
}

/// Which matcher implementation to use
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatcherKind {
    /// Word-start subsequence scorer
    #[default]
    WordStart,
    /// fzf-style scoring via nucleo
    Nucleo,
}

impl MatcherKind {
    /// Instantiate the matcher
    #[must_use]
    pub fn build(self) -> Box<dyn Matcher> {
        match self {
            Self::WordStart => Box::new(WordStartMatcher),
            Self::Nucleo => Box::new(NucleoMatcher::new()),
        }
    }
}

/// The word-start subsequence matcher
#[derive(Debug, Clone, Copy, Default)]
pub struct WordStartMatcher;

impl Matcher for WordStartMatcher {
    fn score_and_include(&mut self, query: &str, candidate: &str) -> MatchResult {
        score_and_include(query, candidate)
    }
}

/// Whether the character at a position starts a word
///
/// A word starts at the beginning of the candidate, after any non-letter,
/// and at a camel-case hump (uppercase following lowercase).
fn is_word_start(prev: Option<char>, current: char) -> bool {
    match prev {
        None => true,
        Some(p) if !p.is_alphabetic() => true,
        Some(p) => current.is_uppercase() && p.is_lowercase(),
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Score a candidate against a query with the word-start rules
///
/// Empty (or whitespace-only) queries and empty candidates are never
/// included. Inclusion requires every non-whitespace query character to be
/// consumed in order.
#[must_use]
pub fn score_and_include(query: &str, candidate: &str) -> MatchResult {
    if candidate.is_empty() || query.trim().is_empty() {
        return MatchResult::EXCLUDED;
    }

    let mut pending = query.chars().filter(|c| !c.is_whitespace()).peekable();
    let mut streak = BASE_SCORE;
    let mut total: MatchScore = 0;
    let mut consumed: MatchScore = 0;
    let mut length: MatchScore = 0;
    let mut prev: Option<char> = None;

    for current in candidate.chars() {
        length += 1;

        if let Some(&wanted) = pending.peek() {
            if chars_eq_ignore_case(wanted, current) {
                total += streak;
                if wanted.is_uppercase() && current.is_uppercase() && is_word_start(prev, current)
                {
                    total += WORD_START_BONUS;
                }
                streak += STREAK_STEP;
                consumed += 1;
                pending.next();
            } else {
                streak = BASE_SCORE;
            }
        }

        prev = Some(current);
    }

    if pending.peek().is_some() {
        return MatchResult::EXCLUDED;
    }

    MatchResult {
        included: true,
        score: total - (length - consumed),
    }
}

/// fzf-style matcher backed by nucleo
///
/// The parsed pattern is cached for the last query, so scoring many
/// candidates against one query only parses it once.
pub struct NucleoMatcher {
    matcher: nucleo::Matcher,
    query: String,
    pattern: Pattern,
    buf: Vec<char>,
}

impl NucleoMatcher {
    /// Create a matcher with nucleo's default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: nucleo::Matcher::new(Config::DEFAULT),
            query: String::new(),
            pattern: Pattern::parse("", CaseMatching::Smart, Normalization::Smart),
            buf: Vec::new(),
        }
    }
}

impl Default for NucleoMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NucleoMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NucleoMatcher")
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl Matcher for NucleoMatcher {
    fn score_and_include(&mut self, query: &str, candidate: &str) -> MatchResult {
        if candidate.is_empty() || query.trim().is_empty() {
            return MatchResult::EXCLUDED;
        }

        if query != self.query {
            self.pattern = Pattern::parse(query, CaseMatching::Smart, Normalization::Smart);
            self.query = query.to_string();
        }

        let haystack = Utf32Str::new(candidate, &mut self.buf);
        self.pattern
            .score(haystack, &mut self.matcher)
            .map_or(MatchResult::EXCLUDED, |score| MatchResult {
                included: true,
                score: MatchScore::try_from(score).unwrap_or(MatchScore::MAX),
            })
    }
}
