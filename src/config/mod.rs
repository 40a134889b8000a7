//! Optional KDL settings file.
//!
//! ```kdl
//! commit-spec {
//!     changelog-preset "angular"
//!     lint-staged #true
//!     staged "*.{js,jsx,ts,tsx}" "eslint --fix"
//! }
//! ```

mod document;

use std::path::{Path, PathBuf};

use document::{ConfigDocument, ConfigSection, ParseNode};

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "commition.kdl";

const COMMIT_SPEC_SECTION: &str = "commit-spec";

/// Errors that can occur when loading or parsing a settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("invalid KDL syntax: {0}")]
    ParseError(String),
    #[error("invalid config: {0}")]
    ValidationError(String),
}

/// All user-tunable settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub commit_spec: CommitSpecSettings,
}

/// Settings for the commit-spec converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSpecSettings {
    /// conventional-changelog preset passed as `-p`.
    pub changelog_preset: String,
    pub lint_staged: bool,
    /// lint-staged tasks. Empty means the built-in default.
    pub staged: Vec<StagedRule>,
}

impl Default for CommitSpecSettings {
    fn default() -> Self {
        Self {
            changelog_preset: "angular".to_string(),
            lint_staged: false,
            staged: Vec::new(),
        }
    }
}

/// One lint-staged entry: a glob and the commands run on matching files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedRule {
    pub pattern: String,
    pub commands: Vec<String>,
}

impl Settings {
    /// Load from an explicit path, or from [`DEFAULT_CONFIG_FILE`] in `cwd`
    /// when it exists. No file at all means defaults.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::ReadError(e)
            }
        })?;
        tracing::info!(path = %path.display(), "loaded settings");
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let doc = ConfigDocument::parse(content)?;

        let mut seen_commit_spec = false;
        for node in doc.top_level() {
            if node.name() != COMMIT_SPEC_SECTION {
                return Err(invalid(
                    &node,
                    &format!("unknown section '{}'", node.name()),
                ));
            }
            if seen_commit_spec {
                return Err(invalid(
                    &node,
                    &format!("duplicate section '{COMMIT_SPEC_SECTION}'"),
                ));
            }
            seen_commit_spec = true;
        }

        let commit_spec = match doc.section(COMMIT_SPEC_SECTION) {
            Some(section) => parse_commit_spec(&section)?,
            None => CommitSpecSettings::default(),
        };
        Ok(Settings { commit_spec })
    }
}

fn parse_commit_spec(section: &ConfigSection) -> Result<CommitSpecSettings, ConfigError> {
    let mut settings = CommitSpecSettings::default();
    for node in section.nodes() {
        match node.name() {
            "changelog-preset" => settings.changelog_preset = single_string(&node)?,
            "lint-staged" => {
                settings.lint_staged = node.bool_value().ok_or_else(|| {
                    invalid(&node, "lint-staged expects #true or #false")
                })?
            }
            "staged" => settings.staged.push(staged_rule(&node)?),
            other => return Err(invalid(&node, &format!("unknown setting '{other}'"))),
        }
    }
    Ok(settings)
}

fn single_string(node: &ParseNode) -> Result<String, ConfigError> {
    match node.string_values().as_slice() {
        [value] if node.entry_count() == 1 && !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(invalid(
            node,
            &format!("{} expects exactly one non-empty string", node.name()),
        )),
    }
}

fn staged_rule(node: &ParseNode) -> Result<StagedRule, ConfigError> {
    let values = node.string_values();
    if values.len() != node.entry_count() {
        return Err(invalid(node, "staged only accepts string arguments"));
    }
    match values.split_first() {
        Some((pattern, commands)) if !commands.is_empty() => Ok(StagedRule {
            pattern: pattern.to_string(),
            commands: commands.iter().map(|c| c.to_string()).collect(),
        }),
        _ => Err(invalid(node, "staged expects a glob followed by at least one command")),
    }
}

fn invalid(node: &ParseNode, message: &str) -> ConfigError {
    ConfigError::ValidationError(format!("line {}: {message}", node.line()))
}
