use std::path::PathBuf;

use crate::command::ExecutionError;
use crate::config::ConfigError;
use crate::manifest::ManifestError;

/// Every way a run can fail.
///
/// Precondition failures (`DirtyWorkingTree`, `DependencyDirectoryNotFound`,
/// `InvalidConverter`) carry guidance for the user. Everything else is
/// propagated from the step that failed and aborts the remaining steps.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum Error {
    #[error("the git working tree has uncommitted changes")]
    #[diagnostic(
        code(commition::dirty_tree),
        help(
            "Before we continue, please stash or commit your git changes.\n\
             You may use the --force flag to override this safety check."
        )
    )]
    DirtyWorkingTree,

    #[error("could not locate node_modules in {} or any parent directory", start.display())]
    #[diagnostic(
        code(commition::no_dependency_dir),
        help("Did you forget to npm init or npm install?")
    )]
    DependencyDirectoryNotFound { start: PathBuf },

    #[error("invalid converter choice '{given}'")]
    #[diagnostic(code(commition::invalid_converter))]
    InvalidConverter {
        given: String,
        #[help]
        choices: String,
    },

    #[error(transparent)]
    #[diagnostic(code(commition::command_failed))]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    #[diagnostic(code(commition::manifest))]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    #[diagnostic(code(commition::config))]
    Config(#[from] ConfigError),

    #[error("interactive prompt failed: {0}")]
    #[diagnostic(code(commition::prompt))]
    Prompt(#[from] dialoguer::Error),

    #[error("failed to access {}: {source}", path.display())]
    #[diagnostic(code(commition::io))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
