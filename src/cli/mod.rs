pub(crate) mod logging;
pub(crate) mod run;

use std::path::PathBuf;

/// Parsed command line, handed from the binary to the library.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Positional arguments; the first one names the converter.
    pub input: Vec<String>,
    pub force: bool,
    pub lint_staged: bool,
    pub config: Option<PathBuf>,
}
