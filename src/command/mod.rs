use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[cfg(test)]
pub(crate) mod testing;

/// How the child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Child shares the terminal. Nothing is captured.
    Inherit,
    /// stdout and stderr are captured; stdout is returned on success.
    Capture,
}

/// One external command to execute.
///
/// Built per call and discarded afterwards. The command line is either handed
/// to `shell -c` or split into words with `shell-words` and spawned directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub command_line: String,
    pub cwd: Option<PathBuf>,
    pub shell: Option<PathBuf>,
    pub stdio: StdioMode,
    /// A `node_modules/.bin` directory to put in front of `PATH`.
    pub prefer_local: Option<PathBuf>,
    /// Extra environment variables for the child.
    pub env: Vec<(String, String)>,
}

impl CommandInvocation {
    pub fn new(command_line: impl Into<String>) -> Self {
        Self {
            command_line: command_line.into(),
            cwd: None,
            shell: None,
            stdio: StdioMode::Inherit,
            prefer_local: None,
            env: Vec::new(),
        }
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Run through `/bin/bash -c`.
    pub fn bash(mut self) -> Self {
        self.shell = Some(PathBuf::from("/bin/bash"));
        self
    }

    pub fn capture(mut self) -> Self {
        self.stdio = StdioMode::Capture;
        self
    }

    pub fn prefer_local(mut self, bin_dir: impl Into<PathBuf>) -> Self {
        self.prefer_local = Some(bin_dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

/// Failure of an external command.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("cannot parse command line `{command}`: {reason}")]
    InvalidCommandLine { command: String, reason: String },

    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}{}", exit_label(*code), stderr_suffix(stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{trimmed}")
    }
}

/// Executes external commands on behalf of the converters.
///
/// Calls block until the child exits. There is no timeout and no retry.
pub trait CommandRunner {
    /// Run the invocation to completion.
    ///
    /// Returns captured stdout in [`StdioMode::Capture`], an empty string
    /// otherwise. A non-zero exit is an [`ExecutionError::Failed`].
    fn run(&self, invocation: &CommandInvocation) -> Result<String, ExecutionError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &CommandInvocation) -> Result<String, ExecutionError> {
        tracing::debug!(
            command = %invocation.command_line,
            cwd = ?invocation.cwd,
            shell = ?invocation.shell,
            "running external command"
        );

        let mut command = build_command(invocation)?;
        let spawn_error = |source| ExecutionError::Spawn {
            command: invocation.command_line.clone(),
            source,
        };

        match invocation.stdio {
            StdioMode::Inherit => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(spawn_error)?;
                if status.success() {
                    Ok(String::new())
                } else {
                    Err(ExecutionError::Failed {
                        command: invocation.command_line.clone(),
                        code: status.code(),
                        stderr: String::new(),
                    })
                }
            }
            StdioMode::Capture => {
                let output = command
                    .stdin(Stdio::null())
                    .output()
                    .map_err(spawn_error)?;
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                if output.status.success() {
                    Ok(stdout)
                } else {
                    Err(ExecutionError::Failed {
                        command: invocation.command_line.clone(),
                        code: output.status.code(),
                        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    })
                }
            }
        }
    }
}

fn build_command(invocation: &CommandInvocation) -> Result<Command, ExecutionError> {
    let mut command = match &invocation.shell {
        Some(shell) => {
            let mut command = Command::new(shell);
            command.arg("-c").arg(&invocation.command_line);
            command
        }
        None => {
            let words = split_command_line(&invocation.command_line)?;
            let (program, args) = words.split_first().ok_or_else(|| {
                ExecutionError::InvalidCommandLine {
                    command: invocation.command_line.clone(),
                    reason: "empty command".to_string(),
                }
            })?;
            let mut command = Command::new(program);
            command.args(args);
            command
        }
    };

    if let Some(cwd) = &invocation.cwd {
        command.current_dir(cwd);
    }
    if let Some(bin_dir) = &invocation.prefer_local {
        command.env("PATH", prepend_path(bin_dir, std::env::var_os("PATH")));
    }
    command.envs(invocation.env.iter().map(|(k, v)| (k, v)));
    Ok(command)
}

pub(crate) fn split_command_line(line: &str) -> Result<Vec<String>, ExecutionError> {
    shell_words::split(line).map_err(|e| ExecutionError::InvalidCommandLine {
        command: line.to_string(),
        reason: e.to_string(),
    })
}

fn prepend_path(dir: &Path, current: Option<OsString>) -> OsString {
    let mut entries = vec![dir.to_path_buf()];
    if let Some(current) = current {
        entries.extend(std::env::split_paths(&current));
    }
    // join only fails on entries containing the separator
    std::env::join_paths(&entries).unwrap_or_else(|_| dir.as_os_str().to_os_string())
}
