use std::path::Path;

use crate::command::{CommandInvocation, CommandRunner, ExecutionError};
use crate::error::Error;
use crate::report;

/// State of the working tree as far as the safety check is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeStatus {
    Clean,
    /// Not under version control; nothing to protect.
    Untracked,
    Dirty,
}

impl TreeStatus {
    pub fn blocks(&self) -> bool {
        matches!(self, TreeStatus::Dirty)
    }
}

/// Ask git whether `cwd` has uncommitted changes.
///
/// Outside a repository the tree counts as untracked. Any other git failure,
/// including git not being installed, counts as dirty. git runs in the C
/// locale so its messages are untranslated.
pub fn tree_status(runner: &dyn CommandRunner, cwd: &Path) -> TreeStatus {
    let invocation = CommandInvocation::new("git status --porcelain")
        .cwd(cwd)
        .capture()
        .env("LC_ALL", "C");
    match runner.run(&invocation) {
        Ok(stdout) if stdout.trim().is_empty() => TreeStatus::Clean,
        Ok(_) => TreeStatus::Dirty,
        Err(ExecutionError::Failed { stderr, .. })
            if stderr.to_lowercase().contains("not a git repository") =>
        {
            TreeStatus::Untracked
        }
        Err(err) => {
            tracing::warn!(error = %err, "could not determine git status");
            TreeStatus::Dirty
        }
    }
}

/// Stop the run on a dirty working tree unless `force` is set.
pub fn check_repository_clean(
    runner: &dyn CommandRunner,
    cwd: &Path,
    force: bool,
) -> Result<(), Error> {
    let status = tree_status(runner, cwd);
    tracing::debug!(?status, force, "git safety check");
    if !status.blocks() {
        return Ok(());
    }
    if force {
        report::warning("WARNING: Forcibly continuing.");
        Ok(())
    } else {
        Err(Error::DirtyWorkingTree)
    }
}
