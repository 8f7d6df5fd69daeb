//! Parser3 brush, answering to `parser` and `php`

use regex::Captures;

use crate::syntax::brush::{Brush, Embedded};
use crate::syntax::cache::compile;
use crate::syntax::error::Result;
use crate::syntax::keywords::compile_keyword_str;
use crate::syntax::rules::Rule;
use crate::syntax::tags::StyleTag;
use crate::syntax::token::SubToken;

const FUNCTIONS: &str = "auto eval connect cache process rem taint untaint \
    .roll .sql-string .unix-timestamp .last-day \
    .gmt-string .int .double .bool .inc .dec .mul .div .mod \
    .format apply-taint bool";

const KEYWORDS: &str = "case CLASS -f -d in def USE for while break continue goto if is ne eq \
    in switch throw try BASE use OPTIONS GET_ SET_";

/// Create the Parser3 brush
pub fn parser_brush() -> Result<Brush> {
    let rules = vec![
        Rule::style("line_comment", r"(?m)^#[^\r\n]*", StyleTag::Comments)?,
        Rule::style("rem_comment", r"(?s)rem\{.*?\}", StyleTag::Comments)?,
        Rule::style("class_directive", r"(?m)^@(?:BASE|USE|CLASS|OPTIONS)", StyleTag::Keyword)?,
        Rule::style(
            "method_definition",
            r"(?m)^@[\w\-]+\[[\w^;\-]*\](?:\[[\w^;\-]*\])?[^\r\n]*",
            StyleTag::Color3,
        )?,
        Rule::style("system_io", r"(?:response|request|xdoc|string|status):\w+", StyleTag::Functions)?,
        Rule::style("system_env", r"(?:math|inet|file|date|void|form|cookie):\w+", StyleTag::Functions)?,
        Rule::style("system_data", r"(?:double|int|console|mail|json|sleep):\w+", StyleTag::Functions)?,
        Rule::style("system_misc", r"(?:reflection|regex|memory|curl):\w+", StyleTag::Functions)?,
        Rule::style("hash_key", r"\$\.\w+", StyleTag::Color1)?,
        Rule::style("constructor", r"\w+::\w+", StyleTag::String)?,
        Rule::style("variable", r"\$\w+", StyleTag::Variable)?,
        compile_keyword_str(FUNCTIONS, true, StyleTag::Functions)?,
        compile_keyword_str(KEYWORDS, false, StyleTag::Keyword)?,
        Rule::processor("markup", r"(?s)<[\s/?]*\w+(?P<attributes>.*?)[\s/?]*>", markup)?,
    ];

    Ok(Brush::new("parser", &["parser", "php"], rules)?
        .with_embedded(Embedded::script_tags("parser")?))
}

/// Split a markup tag into attribute names and the tag name
///
/// Everything else inside the tag stays plain.
fn markup(caps: &Captures<'_>, start: usize) -> Vec<SubToken> {
    let Some(whole) = caps.get(0) else {
        return Vec::new();
    };
    let code = whole.as_str();
    let mut result = Vec::new();

    if caps.name("attributes").is_some() {
        let attributes = compile!(r#"(?s)(?P<name>[\w:\-.]+)\s*=\s*(?P<value>".*?"|'.*?'|\w+)"#);
        for attribute in attributes.captures_iter(code) {
            if let Some(name) = attribute.name("name") {
                result.push(SubToken::new(start + name.start(), start + name.end(), StyleTag::Color1));
            }
        }
    }

    let tag = compile!(r"<[\s/?]*(?P<name>[:\w\-.]+)");
    if let Some(name) = tag.captures(code).and_then(|c| c.name("name")) {
        result.push(SubToken::new(start + name.start(), start + name.end(), StyleTag::Decorator));
    }

    result
}
