//! Keyword rule compiler
//!
//! Turns a word list into one alternation rule that only matches whole
//! words.

use std::collections::BTreeSet;

use regex_syntax::is_word_character;

use super::error::{Error, Result};
use super::rules::Rule;
use super::tags::StyleTag;

/// Compile a list of words into a single whole-word rule
///
/// Words are deduplicated and tried longest first, so `int` wins over `in`
/// at the same position. A word that fails its boundary check gives way to
/// a shorter one at the same position. The same input always yields the
/// same pattern.
pub fn compile_keyword_rule<S: AsRef<str>>(
    words: &[S],
    case_insensitive: bool,
    style: StyleTag,
) -> Result<Rule> {
    let pattern = keyword_pattern(words, case_insensitive)?;
    Rule::style(&format!("keywords:{}", style), &pattern, style)
}

/// Compile a whitespace separated word list, the way brushes write them
pub fn compile_keyword_str(words: &str, case_insensitive: bool, style: StyleTag) -> Result<Rule> {
    let words: Vec<&str> = words.split_whitespace().collect();
    compile_keyword_rule(&words, case_insensitive, style)
}

fn keyword_pattern<S: AsRef<str>>(words: &[S], case_insensitive: bool) -> Result<String> {
    let unique: BTreeSet<&str> = words
        .iter()
        .map(|w| w.as_ref().trim())
        .filter(|w| !w.is_empty())
        .collect();
    if unique.is_empty() {
        return Err(Error::config("keyword rule needs at least one word"));
    }

    let mut ordered: Vec<&str> = unique.into_iter().collect();
    ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = ordered
        .iter()
        .map(|w| bounded(w))
        .collect::<Vec<_>>()
        .join("|");
    let flags = if case_insensitive { "(?i)" } else { "" };
    Ok(format!("{}(?:{})", flags, alternation))
}

/// Escape a word and anchor each identifier-character edge at `\b`
///
/// Edges made of punctuation stay free, so `.int` still matches in `$x.int`.
fn bounded(word: &str) -> String {
    let edge = |c: Option<char>| if c.is_some_and(is_word_character) { r"\b" } else { "" };
    format!(
        "{}{}{}",
        edge(word.chars().next()),
        regex::escape(word),
        edge(word.chars().next_back())
    )
}
