//! Configuration file support
//!
//! Loads settings from ~/.brushwork.toml (or %USERPROFILE%\.brushwork.toml
//! on Windows), or from an explicitly named file.
//!
//! Example:
//! ```text
//! # tag remapping applied before brush lookup
//! [remap]
//! "c#" = "csharp"
//!
//! [[brush]]
//! id = "ini"
//! aliases = ["conf"]
//! rules = [
//!   { pattern = "(?m)^;.*$", style = "comments" },
//!   { keywords = ["true", "false"], style = "keyword", case_insensitive = true },
//! ]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::syntax::{self, compile_keyword_rule, Brush, Embedded, Registry, Rule, StyleTag};

/// Configuration settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// External language tag to brush id
    pub remap: BTreeMap<String, String>,
    /// User-defined brushes
    #[serde(rename = "brush")]
    pub brushes: Vec<BrushConfig>,
}

/// A brush defined in the config file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrushConfig {
    pub id: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Rules in priority order
    pub rules: Vec<RuleConfig>,
    pub embedded: Option<EmbeddedConfig>,
}

/// One rule of a configured brush
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RuleConfig {
    /// A word list compiled into one whole-word rule
    Keywords {
        keywords: Vec<String>,
        style: String,
        #[serde(default)]
        case_insensitive: bool,
    },
    /// A raw pattern
    Pattern {
        pattern: String,
        style: String,
        name: Option<String>,
    },
}

/// Embedded-language delegation of a configured brush
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbeddedConfig {
    /// Language tag of the embedded brush
    pub language: String,
    /// Boundary pattern with a `code` group; script tags when absent
    pub boundary: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".brushwork.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".brushwork.toml"))
        }
    }

    /// Load configuration
    ///
    /// An explicitly named file must exist. The default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        match Self::config_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => {
                debug!("No config file, using defaults");
                Ok(Config::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source: io::Error| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Register remaps and configured brushes
    pub fn apply(&self, registry: &mut Registry) -> syntax::Result<()> {
        for (from, to) in &self.remap {
            registry.add_remap(from, to);
        }
        for brush in &self.brushes {
            registry.register(brush.build()?)?;
        }
        Ok(())
    }
}

impl BrushConfig {
    /// Build the brush this entry describes
    pub fn build(&self) -> syntax::Result<Brush> {
        let rules = self
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| rule.build(&self.id, index))
            .collect::<syntax::Result<Vec<_>>>()?;
        let brush = Brush::new(&self.id, self.aliases.as_slice(), rules)?;

        Ok(match &self.embedded {
            Some(embedded) => brush.with_embedded(embedded.build()?),
            None => brush,
        })
    }
}

impl RuleConfig {
    fn build(&self, brush: &str, index: usize) -> syntax::Result<Rule> {
        match self {
            RuleConfig::Keywords { keywords, style, case_insensitive } => {
                compile_keyword_rule(keywords.as_slice(), *case_insensitive, parse_style(brush, style)?)
            }
            RuleConfig::Pattern { pattern, style, name } => {
                let name = name.clone().unwrap_or_else(|| format!("{}#{}", brush, index));
                Rule::style(&name, pattern, parse_style(brush, style)?)
            }
        }
    }
}

impl EmbeddedConfig {
    fn build(&self) -> syntax::Result<Embedded> {
        match &self.boundary {
            Some(boundary) => Embedded::new(boundary, &self.language),
            None => Embedded::script_tags(&self.language),
        }
    }
}

/// Parse a style tag name from a brush definition
fn parse_style(brush: &str, name: &str) -> syntax::Result<StyleTag> {
    StyleTag::from_name(name).ok_or_else(|| {
        syntax::Error::Configuration(format!("brush '{}' uses unknown style '{}'", brush, name))
    })
}
