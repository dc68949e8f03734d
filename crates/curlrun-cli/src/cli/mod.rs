//! CLI for curlrun.

mod commands;
mod report;

use anyhow::Result;
use clap::Parser;
use curlrun_core::config;
use std::path::PathBuf;

use commands::{run_list, run_request};
use report::ReportOptions;

/// Run a YAML request template through curl and print the result.
#[derive(Debug, Parser)]
#[command(name = "curlrun", version)]
#[command(about = "Run YAML request templates through curl", long_about = None)]
pub struct Cli {
    /// Template file name inside the templates directory (e.g. get_echo.yml).
    #[arg(required_unless_present = "list")]
    pub name: Option<String>,

    /// Request response headers and print them.
    #[arg(short = 'i', long = "show-header")]
    pub show_header: bool,

    /// Print reproducible bash and PowerShell command lines.
    #[arg(short = 'c', long = "show-command")]
    pub show_command: bool,

    /// Templates directory; overrides `templates_dir` from config.toml.
    #[arg(long, value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// List available templates and exit.
    #[arg(long, conflicts_with = "name")]
    pub list: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let mut cfg = config::load_or_init()?;
        if let Some(dir) = self.templates_dir {
            cfg.templates_dir = dir;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        if self.list {
            return run_list(&cfg);
        }

        let Some(name) = self.name else {
            anyhow::bail!("missing template name");
        };
        let opts = ReportOptions {
            show_headers: self.show_header,
            show_command: self.show_command,
        };
        run_request(&cfg, &name, opts)
    }
}

#[cfg(test)]
mod tests;
