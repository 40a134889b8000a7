//! The fixed set of converters and how one gets picked.

pub mod commit_spec;
pub mod editorconfig;
pub mod gitlab_ci;

use std::path::{Path, PathBuf};

use crate::command::CommandRunner;
use crate::config::Settings;
use crate::error::Error;

/// Parsed command-line switches handed to every converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Bypass the clean-tree check and overwrite or reinitialize existing setup.
    pub force: bool,
    /// Add lint-staged to the commit-spec setup.
    pub lint_staged: bool,
}

/// Everything a converter needs from the outside world.
pub struct ConverterContext<'a> {
    pub cwd: PathBuf,
    /// Raw positional arguments, converter name first.
    pub input: &'a [String],
    pub flags: Flags,
    pub settings: &'a Settings,
    pub runner: &'a dyn CommandRunner,
}

impl ConverterContext<'_> {
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}

pub type ConverterFn = fn(&ConverterContext<'_>) -> Result<(), Error>;

/// A named entry in [`REGISTRY`].
pub struct ConverterDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub run: ConverterFn,
}

impl std::fmt::Debug for ConverterDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

pub static REGISTRY: &[ConverterDescriptor] = &[
    ConverterDescriptor {
        id: "commit-spec",
        label: "Add git commit specification for gitlab or github commit log.",
        run: commit_spec::run,
    },
    ConverterDescriptor {
        id: "editorconfig",
        label: "Add .editorconfig file for editor configuration.",
        run: editorconfig::run,
    },
    ConverterDescriptor {
        id: "gitlab-ci",
        label: "Add gitlab ci pipeline with commit message linting.",
        run: gitlab_ci::run,
    },
];

pub fn find(id: &str) -> Option<&'static ConverterDescriptor> {
    REGISTRY.iter().find(|c| c.id == id)
}

/// `- id` per line, for error messages.
pub fn valid_ids() -> String {
    REGISTRY
        .iter()
        .map(|c| format!("- {}", c.id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `id: label` lines aligned for help and the selection prompt.
pub fn choice_labels() -> Vec<String> {
    let width = REGISTRY.iter().map(|c| c.id.len()).max().unwrap_or(0) + 1;
    REGISTRY
        .iter()
        .map(|c| format!("{:<width$} {}", format!("{}:", c.id), c.label))
        .collect()
}

/// Interactive single-choice selection over [`REGISTRY`].
pub trait Prompt {
    /// Index into [`REGISTRY`] of the chosen converter.
    fn choose(&self, labels: &[String]) -> Result<usize, Error>;
}

/// Arrow-key selection on the terminal via `dialoguer`.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn choose(&self, labels: &[String]) -> Result<usize, Error> {
        let index = dialoguer::Select::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt("Which converter would you like to apply?")
            .items(labels)
            .default(0)
            .max_length(labels.len())
            .interact()?;
        Ok(index)
    }
}

/// Resolve the converter to run.
///
/// A given id must be in the registry; otherwise the user is prompted.
pub fn resolve(
    id: Option<&str>,
    prompt: &dyn Prompt,
) -> Result<&'static ConverterDescriptor, Error> {
    match id {
        Some(id) => find(id).ok_or_else(|| Error::InvalidConverter {
            given: id.to_string(),
            choices: format!("Pick one of:\n{}", valid_ids()),
        }),
        None => {
            let index = prompt.choose(&choice_labels())?;
            REGISTRY.get(index).ok_or_else(|| Error::InvalidConverter {
                given: format!("#{index}"),
                choices: format!("Pick one of:\n{}", valid_ids()),
            })
        }
    }
}

/// Run the converter's entry point.
pub fn dispatch(converter: &ConverterDescriptor, ctx: &ConverterContext<'_>) -> Result<(), Error> {
    tracing::info!(converter = converter.id, ?ctx.flags, "running converter");
    (converter.run)(ctx)
}
