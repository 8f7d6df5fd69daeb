//! Lazily compiled constant patterns

/// Compile a constant pattern once and hand out a `&'static Regex`
///
/// Only for literal patterns known to be valid; an invalid one panics on
/// first use.
macro_rules! compile {
    ($pattern:expr) => {{
        use std::sync::OnceLock;
        static REGEX: OnceLock<regex::Regex> = OnceLock::new();
        REGEX.get_or_init(|| regex::Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}

pub(crate) use compile;
