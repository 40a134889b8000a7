//! A [`CommandRunner`] that records invocations instead of spawning processes.

use std::cell::RefCell;

use super::{CommandInvocation, CommandRunner, ExecutionError};

type Handler = Box<dyn Fn(&CommandInvocation) -> Result<String, ExecutionError>>;

pub(crate) struct RecordingRunner {
    calls: RefCell<Vec<CommandInvocation>>,
    handler: Handler,
}

impl RecordingRunner {
    /// Every command succeeds with empty output.
    pub(crate) fn succeeding() -> Self {
        Self::with_handler(|_| Ok(String::new()))
    }

    /// Every command is answered by `handler`, which may also emulate side
    /// effects on disk.
    pub(crate) fn with_handler(
        handler: impl Fn(&CommandInvocation) -> Result<String, ExecutionError> + 'static,
    ) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            handler: Box::new(handler),
        }
    }

    pub(crate) fn calls(&self) -> Vec<CommandInvocation> {
        self.calls.borrow().clone()
    }

    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| c.command_line.clone())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &CommandInvocation) -> Result<String, ExecutionError> {
        self.calls.borrow_mut().push(invocation.clone());
        (self.handler)(invocation)
    }
}
