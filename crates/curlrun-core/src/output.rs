//! Parsing of captured curl output.
//!
//! The output is `[headers blank-line] body "\nHTTP Status: NNN\n"`. The status
//! line is found by its marker rather than by character counting, so bodies of
//! any shape and non-3-digit codes (curl prints `000` on connection failure)
//! split cleanly.

use crate::command::STATUS_MARKER;

/// Status, header block and body of one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurlOutput {
    /// Header block, trimmed. Empty unless headers were requested.
    pub headers: String,
    /// Body, trimmed.
    pub body: String,
    /// Raw status text from the status line, trimmed. Empty if the line is missing.
    pub status: String,
}

impl CurlOutput {
    pub fn status_code(&self) -> Option<u16> {
        self.status.parse().ok()
    }
}

/// Split raw curl stdout. `show_headers` must match the flag the command was built with.
pub fn parse_output(raw: &str, show_headers: bool) -> CurlOutput {
    let (response, status) = match raw.rfind(STATUS_MARKER) {
        Some(pos) => (&raw[..pos], raw[pos + STATUS_MARKER.len()..].trim()),
        None => (raw, ""),
    };

    let (headers, body) = if show_headers {
        split_headers(response)
    } else {
        ("", response)
    };

    CurlOutput {
        headers: headers.trim().to_string(),
        body: body.trim().to_string(),
        status: status.to_string(),
    }
}

/// Header block and body, split at the first blank line. CRLF is tried first.
fn split_headers(response: &str) -> (&str, &str) {
    let response = response.trim();
    for sep in ["\r\n\r\n", "\n\n"] {
        if let Some((head, body)) = response.split_once(sep) {
            if !body.is_empty() {
                return (head, body);
            }
        }
    }
    (response, "")
}
