//! brushwork - brush-based source code tokenizer
//!
//! Turns a code snippet plus a language tag into a stream of plain and
//! styled tokens for a renderer to wrap in markup.
//!
//! ```no_run
//! use brushwork::syntax::{Registry, Tokenizer};
//!
//! let registry = Registry::with_builtins()?;
//! let text = "for f from dir 'c:' do find";
//! for token in Tokenizer::new(&registry).highlight(text, "hq")? {
//!     println!("{:?} {:?}", token.style, token.text(text));
//! }
//! # Ok::<(), brushwork::syntax::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod syntax;
