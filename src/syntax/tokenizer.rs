//! Tokenizer engine
//!
//! Runs every rule of a brush over the text, resolves overlapping matches
//! by position and rule priority, and fills the gaps with plain text so the
//! returned tokens tile the whole input.

use tracing::{trace, warn};

use super::brush::{Brush, Embedded};
use super::error::Result;
use super::registry::Registry;
use super::token::{Match, Token};

/// Tokenizer bound to a registry
///
/// The registry is needed to resolve embedded languages and language tags.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'r> {
    registry: &'r Registry,
}

impl<'r> Tokenizer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Resolve `tag` and tokenize `text` with the brush it names
    pub fn highlight(&self, text: &str, tag: &str) -> Result<Vec<Token>> {
        let brush = self.registry.resolve(tag)?;
        Ok(self.tokenize(text, brush))
    }

    /// Tokenize `text` with `brush`, honouring its embedded language
    ///
    /// Embedding is one level deep: the embedded brush's own delegation is
    /// not followed.
    pub fn tokenize(&self, text: &str, brush: &Brush) -> Vec<Token> {
        let Some(embedded) = brush.embedded() else {
            return tokenize(text, brush);
        };
        match self.registry.resolve(&embedded.language) {
            Ok(inner) => tokenize_embedded(text, brush, embedded, inner),
            Err(e) => {
                warn!("Brush {} embeds an unavailable language: {}", brush.id(), e);
                tokenize(text, brush)
            }
        }
    }
}

/// Tokenize `text` with the rules of `brush`
///
/// Embedded-language delegation needs a registry and is handled by
/// [`Tokenizer::tokenize`]. Empty input yields no tokens.
pub fn tokenize(text: &str, brush: &Brush) -> Vec<Token> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<Match> = brush
        .rules()
        .iter()
        .enumerate()
        .flat_map(|(index, rule)| rule.collect(text, index))
        .collect();
    let found = matches.len();

    // Stable, so each rule keeps its document order on ties
    matches.sort_by_key(|m| (m.start, m.rule_index));
    let kept = resolve_overlaps(matches);
    trace!(
        "Brush {}: {} matches, {} kept over {} bytes",
        brush.id(),
        found,
        kept.len(),
        text.len()
    );

    fill_gaps(text, &kept)
}

/// Keep matches that start at or after the end of the last kept one
///
/// Expects matches ordered by `(start, rule_index)`. Overlapping matches
/// are dropped whole, never clipped.
pub fn resolve_overlaps(matches: Vec<Match>) -> Vec<Match> {
    let mut kept: Vec<Match> = Vec::with_capacity(matches.len());
    for m in matches {
        if !kept.last().is_some_and(|last| last.overlaps(&m)) {
            kept.push(m);
        }
    }
    kept
}

fn tokenize_embedded(text: &str, outer: &Brush, embedded: &Embedded, inner: &Brush) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    for caps in embedded.boundary.captures_iter(text) {
        let Some(code) = caps.name("code") else {
            continue;
        };
        append(&mut tokens, tokenize(&text[pos..code.start()], outer), pos);
        append(&mut tokens, tokenize(code.as_str(), inner), code.start());
        pos = code.end();
    }
    append(&mut tokens, tokenize(&text[pos..], outer), pos);

    tokens
}

/// Splice segment tokens in at `offset`, joining touching plain text
fn append(tokens: &mut Vec<Token>, segment: Vec<Token>, offset: usize) {
    for token in segment {
        let token = token.shifted(offset);
        match token.style {
            Some(_) => tokens.push(token),
            None => push_plain(tokens, token.start, token.end),
        }
    }
}

fn fill_gaps(text: &str, kept: &[Match]) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(kept.len() * 2 + 1);
    let mut pos = 0;

    for m in kept {
        push_plain(&mut tokens, pos, m.start);
        match m.style {
            Some(style) => tokens.push(Token::styled(m.start, m.end, style)),
            None => expand_sub_tokens(&mut tokens, text, m),
        }
        pos = m.end;
    }
    push_plain(&mut tokens, pos, text.len());

    tokens
}

/// Emit a processor match: its sub-tokens, with the rest of the match plain
///
/// Sub-tokens outside the match, empty, off a character boundary, or
/// overlapping an earlier sub-token are ignored.
fn expand_sub_tokens(tokens: &mut Vec<Token>, text: &str, m: &Match) {
    let mut subs: Vec<_> = m
        .sub_tokens
        .iter()
        .filter(|s| s.start >= m.start && s.end <= m.end && s.start < s.end)
        .filter(|s| text.is_char_boundary(s.start) && text.is_char_boundary(s.end))
        .copied()
        .collect();
    subs.sort_by_key(|s| s.start);

    let mut pos = m.start;
    for sub in subs {
        if sub.start < pos {
            continue;
        }
        push_plain(tokens, pos, sub.start);
        tokens.push(Token::styled(sub.start, sub.end, sub.style));
        pos = sub.end;
    }
    push_plain(tokens, pos, m.end);
}

fn push_plain(tokens: &mut Vec<Token>, start: usize, end: usize) {
    if end <= start {
        return;
    }
    match tokens.last_mut() {
        Some(last) if last.is_plain() && last.end == start => last.end = end,
        _ => tokens.push(Token::plain(start, end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::keywords::compile_keyword_str;
    use crate::syntax::rules::Rule;
    use crate::syntax::tags::StyleTag;
    use crate::syntax::token::SubToken;
    use regex::Captures;

    fn assert_tiles(tokens: &[Token], text: &str) {
        let mut pos = 0;
        for token in tokens {
            assert_eq!(token.start, pos, "gap or overlap at {} in {:?}", pos, tokens);
            assert!(token.end > token.start, "empty token in {:?}", tokens);
            pos = token.end;
        }
        assert_eq!(pos, text.len());
    }

    fn styled(tokens: &[Token], text: &str) -> Vec<(String, StyleTag)> {
        tokens
            .iter()
            .filter_map(|t| t.style.map(|s| (t.text(text).to_string(), s)))
            .collect()
    }

    fn brush(rules: Vec<Rule>) -> Brush {
        let none: [&str; 0] = [];
        Brush::new("test", &none, rules).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let brush = brush(vec![Rule::style("word", r"\w+", StyleTag::Keyword).unwrap()]);
        assert!(tokenize("", &brush).is_empty());
    }

    #[test]
    fn test_plain_only() {
        let brush = brush(vec![Rule::style("digits", r"\d+", StyleTag::Color2).unwrap()]);
        let tokens = tokenize("no digits here", &brush);
        assert_eq!(tokens, vec![Token::plain(0, 14)]);
    }

    #[test]
    fn test_earlier_rule_wins_same_start() {
        let text = "abc def";
        let brush = brush(vec![
            Rule::style("short", r"ab", StyleTag::Keyword).unwrap(),
            Rule::style("long", r"abc def", StyleTag::String).unwrap(),
        ]);
        let tokens = tokenize(text, &brush);
        assert_tiles(&tokens, text);
        assert_eq!(tokens[0], Token::styled(0, 2, StyleTag::Keyword));
        assert_eq!(tokens[1], Token::plain(2, 7));
    }

    #[test]
    fn test_identical_spans_lower_index_wins() {
        let text = "same";
        let brush = brush(vec![
            Rule::style("first", r"same", StyleTag::Color1).unwrap(),
            Rule::style("second", r"same", StyleTag::Color2).unwrap(),
        ]);
        assert_eq!(tokenize(text, &brush), vec![Token::styled(0, 4, StyleTag::Color1)]);
    }

    #[test]
    fn test_overlap_discarded_not_clipped() {
        let text = "\"a # b\" # c";
        let brush = brush(vec![
            Rule::style("comment", r"#.*", StyleTag::Comments).unwrap(),
            Rule::style("string", r#""[^"]*""#, StyleTag::String).unwrap(),
        ]);
        let tokens = tokenize(text, &brush);
        assert_tiles(&tokens, text);
        // The comment rule's only match starts inside the string and is
        // dropped whole, so the trailing "# c" stays plain.
        assert_eq!(
            tokens,
            vec![Token::styled(0, 7, StyleTag::String), Token::plain(7, 11)]
        );
    }

    #[test]
    fn test_priority_independent_of_rule_count() {
        let text = "for in for";
        let keyword = compile_keyword_str("for in", false, StyleTag::Keyword).unwrap();
        let shadow = Rule::style("any", r"\w+", StyleTag::Color1).unwrap();
        let a = tokenize(text, &brush(vec![keyword.clone(), shadow.clone()]));
        let b = tokenize(text, &brush(vec![keyword, shadow.clone(), shadow]));
        assert_eq!(a, b);
        assert!(a.iter().filter(|t| !t.is_plain()).all(|t| t.style == Some(StyleTag::Keyword)));
    }

    fn angle_name(caps: &Captures<'_>, _start: usize) -> Vec<SubToken> {
        caps.name("name")
            .map(|m| vec![SubToken::new(m.start(), m.end(), StyleTag::Decorator)])
            .unwrap_or_default()
    }

    fn nothing(_caps: &Captures<'_>, _start: usize) -> Vec<SubToken> {
        Vec::new()
    }

    fn out_of_range(_caps: &Captures<'_>, start: usize) -> Vec<SubToken> {
        vec![
            SubToken::new(0, 100, StyleTag::Color1),
            SubToken::new(start + 1, start + 3, StyleTag::Color2),
            SubToken::new(start + 2, start + 4, StyleTag::Color3),
        ]
    }

    #[test]
    fn test_processor_sub_tokens() {
        let text = "x <item> y";
        let brush = brush(vec![Rule::processor("tag", r"<(?P<name>\w+)>", angle_name).unwrap()]);
        let tokens = tokenize(text, &brush);
        assert_tiles(&tokens, text);
        assert_eq!(
            tokens,
            vec![
                Token::plain(0, 3),
                Token::styled(3, 7, StyleTag::Decorator),
                Token::plain(7, 10),
            ]
        );
    }

    #[test]
    fn test_empty_processor_still_claims_span() {
        let text = "<if>";
        let brush = brush(vec![
            Rule::processor("tag", r"<\w+>", nothing).unwrap(),
            compile_keyword_str("if", false, StyleTag::Keyword).unwrap(),
        ]);
        assert_eq!(tokenize(text, &brush), vec![Token::plain(0, 4)]);
    }

    #[test]
    fn test_bad_sub_tokens_ignored() {
        let text = "<abcd>";
        let brush = brush(vec![Rule::processor("tag", r"<\w+>", out_of_range).unwrap()]);
        let tokens = tokenize(text, &brush);
        assert_tiles(&tokens, text);
        assert_eq!(styled(&tokens, text), vec![("ab".to_string(), StyleTag::Color2)]);
    }

    #[test]
    fn test_multibyte_text() {
        let text = "«ключ» if ключ";
        let brush = brush(vec![compile_keyword_str("if ключ", false, StyleTag::Keyword).unwrap()]);
        let tokens = tokenize(text, &brush);
        assert_tiles(&tokens, text);
        assert_eq!(
            styled(&tokens, text),
            vec![
                ("ключ".to_string(), StyleTag::Keyword),
                ("if".to_string(), StyleTag::Keyword),
                ("ключ".to_string(), StyleTag::Keyword),
            ]
        );
    }

    #[test]
    fn test_embedded_region() {
        let outer = Rule::style("word", r"[a-z]+", StyleTag::Color1).unwrap();
        let inner = Rule::style("var", r"\$\w+", StyleTag::Variable).unwrap();
        let none: [&str; 0] = [];
        let outer = Brush::new("outer", &none, vec![outer])
            .unwrap()
            .with_embedded(Embedded::script_tags("inner").unwrap());
        let mut registry = Registry::new();
        registry.register(Brush::new("inner", &none, vec![inner]).unwrap()).unwrap();

        let text = "ab <?php $x cd ?> ef";
        let tokens = Tokenizer::new(&registry).tokenize(text, &outer);
        assert_tiles(&tokens, text);
        assert_eq!(
            styled(&tokens, text),
            vec![
                ("ab".to_string(), StyleTag::Color1),
                ("php".to_string(), StyleTag::Color1),
                ("$x".to_string(), StyleTag::Variable),
                ("ef".to_string(), StyleTag::Color1),
            ]
        );
    }

    #[test]
    fn test_embedded_language_missing() {
        let none: [&str; 0] = [];
        let outer = Brush::new("outer", &none, vec![Rule::style("word", r"[a-z]+", StyleTag::Color1).unwrap()])
            .unwrap()
            .with_embedded(Embedded::script_tags("nowhere").unwrap());
        let registry = Registry::new();
        let text = "ab <? cd ?>";
        let tokens = Tokenizer::new(&registry).tokenize(text, &outer);
        assert_eq!(tokens, tokenize(text, &outer));
        assert_eq!(styled(&tokens, text).len(), 2);
    }

    #[test]
    fn test_highlight_unknown_tag() {
        let registry = Registry::new();
        assert!(Tokenizer::new(&registry).highlight("x", "nope").is_err());
    }

    #[test]
    fn test_resolve_overlaps_keeps_earliest() {
        let m = |start, end, rule_index| Match {
            start,
            end,
            rule_index,
            style: Some(StyleTag::Keyword),
            sub_tokens: Vec::new(),
        };
        let kept = resolve_overlaps(vec![m(0, 2, 0), m(0, 4, 1), m(3, 6, 0), m(4, 5, 2), m(6, 7, 1)]);
        let spans: Vec<_> = kept.iter().map(|m| (m.start, m.end, m.rule_index)).collect();
        assert_eq!(spans, vec![(0, 2, 0), (3, 6, 0), (6, 7, 1)]);
    }
}
