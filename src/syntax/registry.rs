//! Brush registry
//!
//! Maps language tags to brushes. Lookups are exact and case-sensitive.
//! An optional remap table translates external tags to internal brush ids
//! before lookup.

use std::collections::HashMap;

use tracing::debug;

use super::brush::Brush;
use super::builtin;
use super::error::{Error, Result};

/// Registered brushes and the names they answer to
#[derive(Debug, Default)]
pub struct Registry {
    /// Brushes in registration order
    brushes: Vec<Brush>,
    /// Id or alias to brush index
    names: HashMap<String, usize>,
    /// External tag to internal brush id
    remap: HashMap<String, String>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in brushes
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        for brush in builtin::all_brushes()? {
            registry.register(brush)?;
        }
        Ok(registry)
    }

    /// Add a brush under its id and aliases
    ///
    /// Fails if any of its names is already claimed by another brush.
    pub fn register(&mut self, brush: Brush) -> Result<()> {
        if let Some(taken) = brush.names().find(|name| self.names.contains_key(*name)) {
            let owner = &self.brushes[self.names[taken]];
            return Err(Error::config(format!(
                "'{}' of brush '{}' is already claimed by brush '{}'",
                taken,
                brush.id(),
                owner.id()
            )));
        }

        let index = self.brushes.len();
        for name in brush.names() {
            self.names.insert(name.to_string(), index);
        }
        debug!("Registered brush {} as {:?}", brush.id(), brush.names().collect::<Vec<_>>());
        self.brushes.push(brush);
        Ok(())
    }

    /// Translate `from` to the brush id `to` before every lookup
    pub fn add_remap(&mut self, from: &str, to: &str) {
        self.remap.insert(from.to_string(), to.to_string());
    }

    /// Apply the remap table to a tag; identity when no entry exists
    pub fn remap<'a>(&'a self, tag: &'a str) -> &'a str {
        self.remap.get(tag).map_or(tag, |id| id.as_str())
    }

    /// Find the brush for a language tag
    pub fn resolve(&self, tag: &str) -> Result<&Brush> {
        let name = self.remap(tag);
        match self.names.get(name) {
            Some(&index) => {
                debug!("Resolved {:?} to brush {}", tag, self.brushes[index].id());
                Ok(&self.brushes[index])
            }
            None => Err(Error::NotFound(tag.to_string())),
        }
    }

    /// Brushes in registration order
    pub fn brushes(&self) -> impl Iterator<Item = &Brush> {
        self.brushes.iter()
    }
}

/// Strip the presentation prefix from a language attribute
///
/// Accepts `brush: <tag>` (optionally followed by `;` and more options) and
/// `language-<tag>`, as found in class attributes. Any other value is
/// returned trimmed.
pub fn strip_tag_prefix(attribute: &str) -> &str {
    let attribute = attribute.trim();
    if let Some(rest) = attribute.strip_prefix("brush:") {
        return rest.split(';').next().unwrap_or(rest).trim();
    }
    attribute.strip_prefix("language-").unwrap_or(attribute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::rules::Rule;
    use crate::syntax::tags::StyleTag;

    fn brush(id: &str, aliases: &[&str]) -> Brush {
        let rule = Rule::style("word", r"\w+", StyleTag::Keyword).unwrap();
        Brush::new(id, aliases, vec![rule]).unwrap()
    }

    #[test]
    fn test_resolve_builtins() {
        let registry = Registry::with_builtins().unwrap();
        assert_eq!(registry.resolve("hq").unwrap().id(), "hash-query");
        assert_eq!(registry.resolve("hash-query").unwrap().id(), "hash-query");
        assert_eq!(registry.resolve("parser").unwrap().id(), "parser");
        assert_eq!(registry.resolve("php").unwrap().id(), "parser");
        let ids: Vec<_> = registry.brushes().map(|b| b.id()).collect();
        assert_eq!(ids, vec!["parser", "hash-query"]);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let registry = Registry::with_builtins().unwrap();
        assert!(registry.resolve("hq").is_ok());
        assert_eq!(
            registry.resolve("HQ").unwrap_err(),
            Error::NotFound("HQ".to_string())
        );
    }

    #[test]
    fn test_unknown_tag() {
        let registry = Registry::new();
        assert!(matches!(registry.resolve("cobol"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let mut registry = Registry::new();
        registry.register(brush("one", &["x"])).unwrap();
        let err = registry.register(brush("two", &["y", "x"])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        // The failed brush leaves no partial entries behind
        assert!(registry.resolve("y").is_err());
        assert!(registry.resolve("two").is_err());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = Registry::new();
        registry.register(brush("one", &[])).unwrap();
        assert!(registry.register(brush("one", &[])).is_err());
        assert!(registry.register(brush("other", &["one"])).is_err());
    }

    #[test]
    fn test_remap() {
        let mut registry = Registry::new();
        registry.register(brush("csharp", &["cs"])).unwrap();
        assert_eq!(registry.remap("c#"), "c#");
        assert!(registry.resolve("c#").is_err());

        registry.add_remap("c#", "csharp");
        assert_eq!(registry.remap("c#"), "csharp");
        assert_eq!(registry.resolve("c#").unwrap().id(), "csharp");
        assert_eq!(registry.remap("cs"), "cs");
    }

    #[test]
    fn test_strip_tag_prefix() {
        assert_eq!(strip_tag_prefix("brush: hq"), "hq");
        assert_eq!(strip_tag_prefix("brush:parser; gutter: false"), "parser");
        assert_eq!(strip_tag_prefix("language-php"), "php");
        assert_eq!(strip_tag_prefix(" hq "), "hq");
        assert_eq!(strip_tag_prefix("HQ"), "HQ");
    }

    #[test]
    fn test_remap_to_unknown_id() {
        let mut registry = Registry::new();
        registry.add_remap("vb", "visual-basic");
        assert_eq!(
            registry.resolve("vb").unwrap_err(),
            Error::NotFound("vb".to_string())
        );
    }
}
