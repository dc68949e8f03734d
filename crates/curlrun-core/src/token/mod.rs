//! Bearer token resolution.
//!
//! An Authorization value such as `Bearer [token_issue.yml]` names another
//! template. That template is executed, its JSON response is read, and the
//! token replaces the bracketed reference. Only one level of indirection is
//! followed: the token template's own headers are sent as written.

mod error;
mod reference;

pub use error::TokenError;
pub use reference::{find_references, TokenReference};

use serde_json::Value;

use crate::command::CommandBuilder;
use crate::output::{parse_output, CurlOutput};
use crate::process::Runner;
use crate::template::{RequestSpec, TemplateError, TemplateStore};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No Authorization header, or no reference in it.
    NotNeeded,
    /// `spec` is the input with the token substituted; `source` names the token template.
    Resolved { spec: RequestSpec, source: String },
}

pub struct TokenResolver<'a, R: Runner> {
    store: &'a TemplateStore,
    builder: &'a CommandBuilder,
    runner: &'a R,
    header: String,
    token_field: String,
}

impl<'a, R: Runner> TokenResolver<'a, R> {
    pub fn new(store: &'a TemplateStore, builder: &'a CommandBuilder, runner: &'a R) -> Self {
        Self {
            store,
            builder,
            runner,
            header: "Authorization".to_string(),
            token_field: "accesstoken".to_string(),
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn with_token_field(mut self, field: impl Into<String>) -> Self {
        self.token_field = field.into();
        self
    }

    /// Resolve the token reference in `spec`, if any. `spec` itself is never modified.
    pub fn resolve(&self, spec: &RequestSpec) -> Result<Resolution, TokenError> {
        let Some(value) = spec.header(&self.header) else {
            return Ok(Resolution::NotNeeded);
        };

        let references = find_references(value);
        let reference = match references.as_slice() {
            [] => return Ok(Resolution::NotNeeded),
            [only] => only,
            many => return Err(TokenError::MultipleReferences { count: many.len() }),
        };

        tracing::info!("fetching token via {}", reference.name);
        let token_spec = self.store.load(&reference.name).map_err(|e| match e {
            TemplateError::NotFound { name, .. } => TokenError::FileNotFound { name },
            other => TokenError::Template {
                name: reference.name.clone(),
                source: other,
            },
        })?;

        let command = self.builder.build(&token_spec, false);
        tracing::debug!(
            "token request {}: {:?}",
            token_spec.api_name(),
            command.redacted_argv()
        );
        let process = self.runner.run(&command).map_err(TokenError::Spawn)?;
        let output = parse_output(&process.stdout, false);
        let token = extract_token(&output, &self.token_field)?;

        let resolved = spec.with_header(&self.header, &reference.substitute(value, &token));
        tracing::info!("token acquired via {}", reference.name);
        Ok(Resolution::Resolved {
            spec: resolved,
            source: reference.name.clone(),
        })
    }
}

/// Read the token from a parsed token response.
pub fn extract_token(output: &CurlOutput, field: &str) -> Result<String, TokenError> {
    let code = output
        .status_code()
        .ok_or_else(|| TokenError::InvalidStatus {
            status: output.status.clone(),
        })?;
    tracing::info!("token request returned HTTP {}", code);
    if code != 200 {
        return Err(TokenError::TokenRequestFailed { code });
    }

    if output.body.is_empty() {
        return Err(TokenError::EmptyBody);
    }

    let json: Value =
        serde_json::from_str(&output.body).map_err(|source| TokenError::MalformedJson {
            body: output.body.clone(),
            source,
        })?;

    match json.get(field).and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(TokenError::TokenMissing {
            field: field.to_string(),
        }),
    }
}
