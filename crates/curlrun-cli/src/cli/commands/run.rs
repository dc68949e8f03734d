//! `curlrun <name>` – execute one template and print the report.

use anyhow::Result;
use curlrun_core::config::CurlrunConfig;
use curlrun_core::pipeline::{Pipeline, RunError};
use curlrun_core::process::{ProcessRunner, Runner};
use curlrun_core::token::TokenError;
use std::io::{self, Write};

use crate::cli::report::{self, ReportOptions};

pub fn run_request(cfg: &CurlrunConfig, name: &str, opts: ReportOptions) -> Result<()> {
    let stdout = io::stdout();
    execute_and_report(cfg, ProcessRunner, name, opts, &mut stdout.lock())
}

/// Run template `name` through `runner` and write the report to `out`.
pub(crate) fn execute_and_report<R: Runner>(
    cfg: &CurlrunConfig,
    runner: R,
    name: &str,
    opts: ReportOptions,
    out: &mut impl Write,
) -> Result<()> {
    let pipeline = Pipeline::new(cfg, runner);
    match pipeline.execute(name, opts.show_headers) {
        Ok(run) => {
            write!(out, "{}", report::render(&run, opts))?;
            Ok(())
        }
        Err(RunError::Token(err)) => {
            // The raw body is the only clue when the token endpoint answers with non-JSON.
            if let TokenError::MalformedJson { body, .. } = &err {
                writeln!(out, "{body}")?;
            }
            Err(anyhow::Error::new(err).context("token acquisition failed; aborting"))
        }
        Err(err) => Err(err.into()),
    }
}
