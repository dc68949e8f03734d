//! One run: load template, resolve token, build, execute, parse.
//!
//! Strictly sequential. When a token is needed, the token request completes
//! before the primary command is even built.

use std::io;
use thiserror::Error;

use crate::command::{CommandBuilder, CurlCommand};
use crate::config::CurlrunConfig;
use crate::output::{parse_output, CurlOutput};
use crate::process::{ProcessOutput, Runner};
use crate::template::{RequestSpec, TemplateError, TemplateStore};
use crate::token::{Resolution, TokenError, TokenResolver};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("token resolution failed")]
    Token(#[from] TokenError),
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Everything the report needs about a finished run.
#[derive(Debug, Clone)]
pub struct Execution {
    /// Spec actually sent (token already substituted).
    pub spec: RequestSpec,
    pub command: CurlCommand,
    pub process: ProcessOutput,
    pub output: CurlOutput,
    /// Token template used, if any.
    pub token_source: Option<String>,
}

/// Templates, command builder and runner wired together from configuration.
pub struct Pipeline<R: Runner> {
    store: TemplateStore,
    builder: CommandBuilder,
    runner: R,
    authorization_header: String,
    token_field: String,
}

impl<R: Runner> Pipeline<R> {
    pub fn new(cfg: &CurlrunConfig, runner: R) -> Self {
        Self {
            store: TemplateStore::new(cfg.templates_dir.clone()),
            builder: CommandBuilder::new(cfg.curl_program.clone()),
            runner,
            authorization_header: cfg.authorization_header.clone(),
            token_field: cfg.token_field.clone(),
        }
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Resolve the token reference in `spec`, returning the spec to send and the token source.
    pub fn resolve(&self, spec: &RequestSpec) -> Result<(RequestSpec, Option<String>), TokenError> {
        let resolver = TokenResolver::new(&self.store, &self.builder, &self.runner)
            .with_header(self.authorization_header.clone())
            .with_token_field(self.token_field.clone());

        match resolver.resolve(spec)? {
            Resolution::NotNeeded => Ok((spec.clone(), None)),
            Resolution::Resolved { spec, source } => Ok((spec, Some(source))),
        }
    }

    /// Run template `name` end to end.
    pub fn execute(&self, name: &str, show_headers: bool) -> Result<Execution, RunError> {
        let spec = self.store.load(name)?;
        self.execute_spec(&spec, show_headers)
    }

    /// Run an already loaded spec end to end.
    pub fn execute_spec(
        &self,
        spec: &RequestSpec,
        show_headers: bool,
    ) -> Result<Execution, RunError> {
        let (spec, token_source) = self.resolve(spec)?;

        let command = self.builder.build(&spec, show_headers);
        tracing::info!("{} {} ({})", spec.method, spec.url, spec.api_name());

        let process = self
            .runner
            .run(&command)
            .map_err(|source| RunError::Spawn {
                program: command.program().to_string(),
                source,
            })?;
        let output = parse_output(&process.stdout, show_headers);
        tracing::info!("{} returned status {:?}", spec.url, output.status);

        Ok(Execution {
            spec,
            command,
            process,
            output,
            token_source,
        })
    }
}
