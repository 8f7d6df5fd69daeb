//! Brush-based source tokenizer
//!
//! This module turns raw text plus a language tag into classified spans:
//! - Rules bind a pattern to a style tag or a match processor
//! - Brushes order rules by priority for one language
//! - The registry resolves language tags to brushes
//! - The tokenizer resolves overlapping matches into a token stream

mod brush;
mod cache;
mod error;
mod keywords;
mod registry;
mod rules;
mod tags;
mod token;
mod tokenizer;

pub mod builtin;

pub use brush::{Brush, Embedded};
pub use error::{Error, Result};
pub use keywords::{compile_keyword_rule, compile_keyword_str};
pub use registry::{strip_tag_prefix, Registry};
pub use rules::{Action, Processor, Rule};
pub use tags::StyleTag;
pub use token::{Match, SubToken, Token};
pub use tokenizer::{resolve_overlaps, tokenize, Tokenizer};
