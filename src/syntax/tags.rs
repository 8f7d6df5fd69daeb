//! Style tags carried by highlighted tokens
//!
//! The tag vocabulary is a stable contract with whatever renders the token
//! stream: the engine never interprets a tag, it only carries it through.

/// Style classes assigned to matched source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleTag {
    /// Line and block comments
    Comments,
    /// Language keywords
    Keyword,
    /// String literals and constructor references
    String,
    /// First auxiliary class (operators, hash keys, attribute names)
    Color1,
    /// Second auxiliary class
    Color2,
    /// Third auxiliary class (method definitions)
    Color3,
    /// Markup tag names
    Decorator,
    /// Variables
    Variable,
    /// Built-in and system functions
    Functions,
    /// Delimiters of an embedded script region
    Script,
}

impl StyleTag {
    /// Every tag, in vocabulary order
    pub const ALL: [StyleTag; 10] = [
        StyleTag::Comments,
        StyleTag::Keyword,
        StyleTag::String,
        StyleTag::Color1,
        StyleTag::Color2,
        StyleTag::Color3,
        StyleTag::Decorator,
        StyleTag::Variable,
        StyleTag::Functions,
        StyleTag::Script,
    ];

    /// The class name consumers use for this tag
    pub fn name(&self) -> &'static str {
        match self {
            StyleTag::Comments => "comments",
            StyleTag::Keyword => "keyword",
            StyleTag::String => "string",
            StyleTag::Color1 => "color1",
            StyleTag::Color2 => "color2",
            StyleTag::Color3 => "color3",
            StyleTag::Decorator => "decorator",
            StyleTag::Variable => "variable",
            StyleTag::Functions => "functions",
            StyleTag::Script => "script",
        }
    }

    /// Parse a tag from its class name (for brush files)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

impl std::fmt::Display for StyleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_roundtrip() {
        for tag in StyleTag::ALL {
            assert_eq!(StyleTag::from_name(tag.name()), Some(tag));
        }
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(StyleTag::from_name("Keyword"), None);
        assert_eq!(StyleTag::from_name("color4"), None);
        assert_eq!(StyleTag::from_name(""), None);
    }

    #[test]
    fn test_display_uses_class_name() {
        assert_eq!(StyleTag::Color3.to_string(), "color3");
        assert_eq!(StyleTag::Comments.to_string(), "comments");
    }
}
