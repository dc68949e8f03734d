//! Human-readable report of one run.

use curlrun_core::pipeline::Execution;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub show_headers: bool,
    pub show_command: bool,
}

/// Pretty-print `body` if it is JSON, otherwise return it unchanged.
pub fn format_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

pub fn render(run: &Execution, opts: ReportOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, run, opts);
    out
}

fn write_report(out: &mut String, run: &Execution, opts: ReportOptions) -> std::fmt::Result {
    writeln!(out, "=== Request ===")?;
    writeln!(out, "API name: {}", run.spec.api_name())?;
    if let Some(source) = &run.token_source {
        writeln!(out, "Token: acquired via {source}")?;
    }
    if opts.show_command {
        writeln!(out, "[bash/macOS]")?;
        writeln!(out, "{}", run.command.to_bash())?;
        writeln!(out, "[PowerShell]")?;
        writeln!(out, "{}", run.command.to_powershell())?;
    }

    writeln!(out)?;
    writeln!(out, "=== Result ===")?;
    writeln!(out, "HTTP status: {}", run.output.status)?;
    if !run.process.success() {
        match run.process.exit_code {
            Some(code) => writeln!(out, "curl exited with code {code}")?,
            None => writeln!(out, "curl was terminated by a signal")?,
        }
        let stderr = run.process.stderr.trim();
        if !stderr.is_empty() {
            writeln!(out, "{stderr}")?;
        }
    }

    if opts.show_headers {
        writeln!(out)?;
        writeln!(out, "Response headers:")?;
        writeln!(out, "{}", run.output.headers)?;
    }

    writeln!(out)?;
    writeln!(out, "Response body:")?;
    writeln!(out, "{}", format_body(&run.output.body))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use curlrun_core::command::CommandBuilder;
    use curlrun_core::output::CurlOutput;
    use curlrun_core::process::ProcessOutput;
    use curlrun_core::template::RequestSpec;

    fn execution(body: &str, headers: &str) -> Execution {
        let spec = RequestSpec::from_yaml("api_name: Echo\nurl: http://x/echo\n").unwrap();
        let command = CommandBuilder::default().build(&spec, !headers.is_empty());
        Execution {
            spec,
            command,
            process: ProcessOutput {
                exit_code: Some(0),
                ..ProcessOutput::default()
            },
            output: CurlOutput {
                headers: headers.to_string(),
                body: body.to_string(),
                status: "200".to_string(),
            },
            token_source: None,
        }
    }

    #[test]
    fn format_body_pretty_prints_json() {
        assert_eq!(format_body(r#"{"a":1}"#), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn format_body_keeps_non_ascii() {
        assert_eq!(format_body(r#"{"name":"東京"}"#), "{\n  \"name\": \"東京\"\n}");
    }

    #[test]
    fn format_body_passes_text_through() {
        assert_eq!(format_body("<html>ok</html>"), "<html>ok</html>");
        assert_eq!(format_body(""), "");
    }

    #[test]
    fn report_basic_sections() {
        let text = render(&execution(r#"{"ok":true}"#, ""), ReportOptions::default());
        assert!(text.contains("API name: Echo"));
        assert!(text.contains("HTTP status: 200"));
        assert!(text.contains("Response body:\n{\n  \"ok\": true\n}"));
        assert!(!text.contains("[bash/macOS]"));
        assert!(!text.contains("Response headers:"));
        assert!(!text.contains("Token:"));
    }

    #[test]
    fn report_with_command_and_headers() {
        let mut run = execution("plain", "HTTP/1.1 200 OK");
        run.token_source = Some("auth.yml".to_string());
        let opts = ReportOptions {
            show_headers: true,
            show_command: true,
        };
        let text = render(&run, opts);
        assert!(text.contains("Token: acquired via auth.yml"));
        assert!(text.contains("[bash/macOS]\ncurl -s -D - -X GET"));
        assert!(text.contains("[PowerShell]\ncurl.exe -s -D - -X GET"));
        assert!(text.contains("Response headers:\nHTTP/1.1 200 OK"));
        assert!(text.ends_with("Response body:\nplain\n"));
    }

    #[test]
    fn report_mentions_curl_failure() {
        let mut run = execution("", "");
        run.output.status = "000".to_string();
        run.process = ProcessOutput {
            stdout: String::new(),
            stderr: "curl: (6) Could not resolve host: x\n".to_string(),
            exit_code: Some(6),
        };
        let text = render(&run, ReportOptions::default());
        assert!(text.contains("HTTP status: 000"));
        assert!(text.contains("curl exited with code 6\ncurl: (6) Could not resolve host: x"));
    }
}
