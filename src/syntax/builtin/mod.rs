//! Built-in brushes
//!
//! Reference brushes for Parser3 and the hash query language.

mod hash_query;
mod parser;

use super::brush::Brush;
use super::error::Result;

pub use hash_query::hash_query_brush;
pub use parser::parser_brush;

/// Get all built-in brushes
pub fn all_brushes() -> Result<Vec<Brush>> {
    Ok(vec![parser_brush()?, hash_query_brush()?])
}
