//! Brush definitions
//!
//! A brush is the ordered rule set for one language together with the
//! names it answers to. Rule order is priority: when matches of two rules
//! overlap, the earlier rule wins.

use regex::Regex;

use super::error::{Error, Result};
use super::rules::{can_match_empty, Rule};

/// Delegation of a delimited region to another brush
///
/// The boundary pattern must define a `code` group; everything it matches
/// outside that group (the delimiters) stays with the outer brush.
#[derive(Debug, Clone)]
pub struct Embedded {
    /// Pattern locating one whole embedded region, delimiters included
    pub boundary: Regex,
    /// Language tag of the brush used inside the region
    pub language: String,
}

impl Embedded {
    /// Create an embedded-language delegation
    pub fn new(boundary: &str, language: &str) -> Result<Self> {
        if can_match_empty(boundary)? {
            return Err(Error::config(format!(
                "embedded boundary can match the empty string: {}",
                boundary
            )));
        }
        let regex = Regex::new(boundary).map_err(|e| Error::config(e.to_string()))?;
        if !regex.capture_names().any(|name| name == Some("code")) {
            return Err(Error::config(format!(
                "embedded boundary has no `code` group: {}",
                boundary
            )));
        }
        if language.is_empty() {
            return Err(Error::config("embedded language tag is empty"));
        }
        Ok(Self {
            boundary: regex,
            language: language.to_string(),
        })
    }

    /// Script tags of the `<? ... ?>` family
    ///
    /// An unterminated region runs to the end of the text.
    pub fn script_tags(language: &str) -> Result<Self> {
        Self::new(
            r"(?s)(?P<left><\?(?:=|php)?)(?P<code>.*?)(?P<right>\?>|\z)",
            language,
        )
    }
}

/// A complete brush for one language
#[derive(Debug, Clone)]
pub struct Brush {
    id: String,
    aliases: Vec<String>,
    rules: Vec<Rule>,
    embedded: Option<Embedded>,
}

impl Brush {
    /// Create a brush, validating its structure
    ///
    /// Aliases are kept in the given order with duplicates and the id
    /// itself removed.
    pub fn new<S: AsRef<str>>(id: &str, aliases: &[S], rules: Vec<Rule>) -> Result<Self> {
        if id.trim().is_empty() {
            return Err(Error::config("brush id is empty"));
        }
        if rules.is_empty() {
            return Err(Error::config(format!("brush '{}' has no rules", id)));
        }

        let mut names: Vec<String> = Vec::new();
        for alias in aliases {
            let alias = alias.as_ref();
            if alias.is_empty() {
                return Err(Error::config(format!("brush '{}' has an empty alias", id)));
            }
            if alias != id && !names.iter().any(|a| a == alias) {
                names.push(alias.to_string());
            }
        }

        Ok(Self {
            id: id.to_string(),
            aliases: names,
            rules,
            embedded: None,
        })
    }

    /// Builder: delegate delimited regions to another brush
    pub fn with_embedded(mut self, embedded: Embedded) -> Self {
        self.embedded = Some(embedded);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn embedded(&self) -> Option<&Embedded> {
        self.embedded.as_ref()
    }

    /// The id followed by every alias
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str()).chain(self.aliases.iter().map(|a| a.as_str()))
    }
}
