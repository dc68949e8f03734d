//! curl command construction.
//!
//! Turns a [`RequestSpec`] into the argv handed to the curl process. The argv
//! always ends with a `-w` write-out directive that appends the status line
//! parsed back by [`crate::output`].

mod quote;

pub use quote::{quote_bash, quote_powershell};

use crate::template::RequestSpec;

/// Write-out directive: a final line carrying the HTTP status code.
pub const WRITE_OUT: &str = "\nHTTP Status: %{http_code}\n";

/// Text that opens the status line produced by [`WRITE_OUT`].
pub const STATUS_MARKER: &str = "\nHTTP Status: ";

/// Stand-in for secret values in logged commands.
pub const REDACTED: &str = "***";

/// Ordered curl argv; `argv[0]` is the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlCommand {
    argv: Vec<String>,
}

impl CurlCommand {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// argv for display: newlines in the last element become a literal `\n`
    /// so the write-out directive stays on one line.
    pub fn display_argv(&self) -> Vec<String> {
        let mut argv = self.argv.clone();
        if let Some(last) = argv.last_mut() {
            *last = last.replace('\n', "\\n");
        }
        argv
    }

    /// argv safe for logs: header values, `-d` bodies and `--data-urlencode`
    /// values are masked. Header names and param keys stay readable.
    pub fn redacted_argv(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.argv.len());
        let mut flag: Option<&str> = None;
        for arg in &self.argv {
            let shown = match flag.take() {
                Some("-H") => match arg.split_once(':') {
                    Some((name, _)) => format!("{name}: {REDACTED}"),
                    None => REDACTED.to_string(),
                },
                Some("-d") => REDACTED.to_string(),
                Some("--data-urlencode") => match arg.split_once('=') {
                    Some((key, _)) => format!("{key}={REDACTED}"),
                    None => REDACTED.to_string(),
                },
                _ => {
                    if matches!(arg.as_str(), "-H" | "-d" | "--data-urlencode") {
                        flag = Some(arg.as_str());
                    }
                    arg.clone()
                }
            };
            out.push(shown);
        }
        out
    }

    /// Reproducible bash/macOS command line.
    pub fn to_bash(&self) -> String {
        self.display_argv()
            .iter()
            .map(|arg| quote_bash(arg))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Reproducible PowerShell command line. A bare `curl` becomes `curl.exe`
    /// so the Invoke-WebRequest alias is bypassed.
    pub fn to_powershell(&self) -> String {
        self.display_argv()
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                if i == 0 && arg == "curl" {
                    "curl.exe".to_string()
                } else {
                    quote_powershell(arg)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Builds curl commands for a given program.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new("curl")
    }
}

impl CommandBuilder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the argv for `spec`. With `show_headers`, response headers are
    /// dumped to stdout ahead of the body (`-D -`).
    pub fn build(&self, spec: &RequestSpec, show_headers: bool) -> CurlCommand {
        let method = spec.method.to_ascii_uppercase();
        let is_get = method == "GET";
        let sends_body = method == "POST" || method == "PUT";

        if is_get && spec.data.is_some() {
            tracing::warn!("GET does not send data; ignoring it");
        } else if !is_get && !sends_body && (!spec.params.is_empty() || spec.data.is_some()) {
            tracing::warn!(
                "method {} does not send params or data; ignoring them",
                spec.method
            );
        }

        let url = if is_get && !spec.params.is_empty() {
            with_query(&spec.url, &spec.params)
        } else {
            spec.url.clone()
        };

        let mut argv = vec![self.program.clone(), "-s".to_string()];
        if show_headers {
            argv.extend(["-D".to_string(), "-".to_string()]);
        }
        argv.extend(["-X".to_string(), spec.method.clone(), url]);

        for (key, value) in &spec.headers {
            argv.push("-H".to_string());
            argv.push(format!("{key}: {value}"));
        }

        if sends_body {
            if let Some(data) = &spec.data {
                argv.push("-d".to_string());
                argv.push(data.clone());
            } else {
                for (key, value) in &spec.params {
                    argv.push("--data-urlencode".to_string());
                    argv.push(format!("{key}={value}"));
                }
            }
        }

        argv.push("-w".to_string());
        argv.push(WRITE_OUT.to_string());

        CurlCommand::new(argv)
    }
}

/// Append form-encoded `params` to `url`, joining with `&` when a query is already present.
fn with_query(url: &str, params: &[(String, String)]) -> String {
    // Serializing string pairs cannot fail.
    let query = serde_urlencoded::to_string(params).unwrap_or_default();
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{query}")
}
