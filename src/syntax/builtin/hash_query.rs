//! Hash query brush, answering to `hash-query` and `hq`

use crate::syntax::brush::Brush;
use crate::syntax::error::Result;
use crate::syntax::keywords::compile_keyword_str;
use crate::syntax::rules::Rule;
use crate::syntax::tags::StyleTag;

const KEYWORDS: &str =
    "for in where withsubs do and or let crack from dir file hash string not validate find";

const OPERATORS: &str =
    "md5 md4 sha1 sha256 sha384 sha512 crc32 whirlpool name size limit offset dict min max";

/// Create the hash query brush
pub fn hash_query_brush() -> Result<Brush> {
    let rules = vec![
        Rule::style("comment", r"(?m)^#[^\r\n]*", StyleTag::Comments)?,
        Rule::style("double_string", r#"(?s)"(?:[^\\"]|\\.)*""#, StyleTag::String)?,
        Rule::style("single_string", r"(?s)'(?:[^\\']|\\.)*'", StyleTag::String)?,
        compile_keyword_str(OPERATORS, true, StyleTag::Color1)?,
        compile_keyword_str(KEYWORDS, true, StyleTag::Keyword)?,
    ];

    Brush::new("hash-query", &["hq"], rules)
}
