//! `[template]` references inside an Authorization value.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]").unwrap());

/// One bracketed reference and where it sits in the header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReference {
    /// Template name between the brackets, surrounding whitespace removed.
    pub name: String,
    span: Range<usize>,
}

impl TokenReference {
    /// `value` with this reference (brackets included) replaced by `token`.
    pub fn substitute(&self, value: &str, token: &str) -> String {
        let mut out = value.to_string();
        out.replace_range(self.span.clone(), token);
        out
    }
}

/// All references in `value`, left to right. A blank reference such as `[  ]`
/// is kept with an empty name so resolving it fails instead of sending the
/// brackets upstream.
pub fn find_references(value: &str) -> Vec<TokenReference> {
    REFERENCE_RE
        .captures_iter(value)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().trim();
            Some(TokenReference {
                name: name.to_string(),
                span: whole.range(),
            })
        })
        .collect()
}
