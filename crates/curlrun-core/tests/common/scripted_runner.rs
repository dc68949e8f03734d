//! Runner that replays canned curl output and records every command it was given.

use curlrun_core::command::CurlCommand;
use curlrun_core::process::{ProcessOutput, Runner};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

#[derive(Default)]
pub struct ScriptedRunner {
    responses: RefCell<VecDeque<io::Result<ProcessOutput>>>,
    calls: RefCell<Vec<CurlCommand>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response whose stdout is `body` followed by the status line.
    pub fn respond(self, status: &str, body: &str) -> Self {
        let stdout = format!("{body}\nHTTP Status: {status}\n");
        self.respond_raw(&stdout)
    }

    pub fn respond_raw(self, stdout: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(ProcessOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: Some(0),
        }));
        self
    }

    pub fn fail_spawn(self) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(io::Error::new(io::ErrorKind::NotFound, "curl not found")));
        self
    }

    pub fn calls(&self) -> Vec<CurlCommand> {
        self.calls.borrow().clone()
    }
}

impl Runner for ScriptedRunner {
    fn run(&self, command: &CurlCommand) -> io::Result<ProcessOutput> {
        self.calls.borrow_mut().push(command.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected command: {:?}", command.argv()))
    }
}

/// True if `command` sends header `line` (e.g. "Authorization: Bearer x").
pub fn sends_header(command: &CurlCommand, line: &str) -> bool {
    command
        .argv()
        .windows(2)
        .any(|w| w[0] == "-H" && w[1] == line)
}
