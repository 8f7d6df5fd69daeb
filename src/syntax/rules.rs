//! Pattern rules for tokenizing
//!
//! A rule binds one regular expression either to a fixed style tag or to a
//! processor function that decomposes each match into finer sub-tokens.

use regex::{Captures, Regex};

use super::error::{Error, Result};
use super::tags::StyleTag;
use super::token::{Match, SubToken};

/// Match processor
///
/// Receives the captures of one match (offsets relative to the scanned
/// text) and the match's start offset. Returns the sub-tokens to emit, which
/// may be none.
pub type Processor = fn(&Captures<'_>, usize) -> Vec<SubToken>;

/// What a rule does with its matches
#[derive(Clone, Copy)]
pub enum Action {
    /// Style the whole match with one tag
    Style(StyleTag),
    /// Let a processor decide the sub-tokens
    Processor(Processor),
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Style(tag) => f.debug_tuple("Style").field(tag).finish(),
            Action::Processor(_) => f.write_str("Processor(..)"),
        }
    }
}

/// A single matching unit of a brush
#[derive(Debug, Clone)]
pub struct Rule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Style or processor applied to matches
    pub action: Action,
}

impl Rule {
    /// Create a rule styling every match with `tag`
    pub fn style(name: &str, pattern: &str, tag: StyleTag) -> Result<Self> {
        Self::new(name, pattern, Action::Style(tag))
    }

    /// Create a rule whose matches are decomposed by `processor`
    pub fn processor(name: &str, pattern: &str, processor: Processor) -> Result<Self> {
        Self::new(name, pattern, Action::Processor(processor))
    }

    fn new(name: &str, pattern: &str, action: Action) -> Result<Self> {
        if can_match_empty(pattern)? {
            return Err(Error::config(format!(
                "rule '{}' can match the empty string: {}",
                name, pattern
            )));
        }
        let regex = Regex::new(pattern)
            .map_err(|e| Error::config(format!("rule '{}': {}", name, e)))?;
        Ok(Self {
            name: name.to_string(),
            pattern: regex,
            action,
        })
    }

    /// Find the first match at or after `start`
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        self.pattern
            .find_at(text, start)
            .map(|m| (m.start(), m.end()))
    }

    /// Scan `text` for all non-overlapping matches of this rule
    ///
    /// Each match is tagged with `rule_index`. Processor rules are expanded
    /// here, once per raw match.
    pub fn collect(&self, text: &str, rule_index: usize) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let found = match self.action {
                Action::Style(tag) => self.find_at(text, pos).map(|(start, end)| Match {
                    start,
                    end,
                    rule_index,
                    style: Some(tag),
                    sub_tokens: Vec::new(),
                }),
                Action::Processor(processor) => self.pattern.captures_at(text, pos).map(|caps| {
                    let (start, end) = caps
                        .get(0)
                        .map_or((pos, pos), |whole| (whole.start(), whole.end()));
                    Match {
                        start,
                        end,
                        rule_index,
                        style: None,
                        sub_tokens: processor(&caps, start),
                    }
                }),
            };

            match found {
                Some(m) if m.end > m.start => {
                    pos = m.end;
                    matches.push(m);
                }
                // Constructors refuse empty-capable patterns, but never loop
                Some(m) => match next_boundary(text, m.start) {
                    Some(next) => pos = next,
                    None => break,
                },
                None => break,
            }
        }

        matches
    }
}

/// Byte offset of the character after the one starting at `pos`
fn next_boundary(text: &str, pos: usize) -> Option<usize> {
    text[pos..].chars().next().map(|c| pos + c.len_utf8())
}

/// Check whether a pattern can produce a zero-length match
pub(crate) fn can_match_empty(pattern: &str) -> Result<bool> {
    let hir = regex_syntax::Parser::new()
        .parse(pattern)
        .map_err(|e| Error::config(format!("invalid pattern {}: {}", pattern, e)))?;
    Ok(hir.properties().minimum_len() == Some(0))
}
