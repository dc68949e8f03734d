//! Token resolution failures. Every variant aborts the run.

use std::io;
use thiserror::Error;

use crate::template::TemplateError;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token template {name} not found")]
    FileNotFound { name: String },
    #[error("token template {name} could not be loaded")]
    Template {
        name: String,
        #[source]
        source: TemplateError,
    },
    #[error("failed to run token request")]
    Spawn(#[source] io::Error),
    #[error("authorization header has {count} token references; only one is supported")]
    MultipleReferences { count: usize },
    #[error("invalid HTTP status code from token request: {status:?}")]
    InvalidStatus { status: String },
    #[error("token request failed with HTTP {code}")]
    TokenRequestFailed { code: u16 },
    #[error("token response body is empty")]
    EmptyBody,
    #[error("token response is not valid JSON")]
    MalformedJson {
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("token response has no usable `{field}`")]
    TokenMissing { field: String },
}
