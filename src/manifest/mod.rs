//! Reading, merging and rewriting JSON configuration files.
//!
//! [`ManifestDocument`] keeps the indentation it found on disk so a rewrite
//! looks like the user's own formatting. Key order is preserved through
//! `serde_json`'s `preserve_order` feature.

mod indent;
mod merge;
pub mod script;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

pub use indent::Indent;
pub use merge::deep_merge;

/// Errors from reading or writing a JSON configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{} must contain a JSON object at the top level", path.display())]
    NotAnObject { path: PathBuf },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot load {} as a config module: {reason}", path.display())]
    Script { path: PathBuf, reason: String },
}

/// A JSON object file together with the indentation it should be written with.
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    path: PathBuf,
    content: Value,
    indent: Indent,
}

impl ManifestDocument {
    /// Read a manifest and detect its indentation.
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        let text = read_text(path)?;
        let indent = Indent::detect(&text).unwrap_or_default();
        Self::parse(path, &text, indent)
    }

    /// Read a manifest, keeping an indentation captured earlier in the run.
    pub fn read_with_indent(path: &Path, indent: Indent) -> Result<Self, ManifestError> {
        let text = read_text(path)?;
        Self::parse(path, &text, indent)
    }

    fn parse(path: &Path, text: &str, indent: Indent) -> Result<Self, ManifestError> {
        let content: Value = serde_json::from_str(text).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if !content.is_object() {
            return Err(ManifestError::NotAnObject {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
            content,
            indent,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn indent(&self) -> &Indent {
        &self.indent
    }

    pub fn value(&self) -> &Value {
        &self.content
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.content.get(key)
    }

    /// Whether a JSON pointer (`/scripts/changelog`) resolves to a value.
    pub fn contains(&self, pointer: &str) -> bool {
        self.content.pointer(pointer).is_some()
    }

    /// Declared in `dependencies` or `devDependencies`.
    pub fn has_dependency(&self, name: &str) -> bool {
        ["dependencies", "devDependencies"]
            .iter()
            .any(|section| self.content.get(section).and_then(|s| s.get(name)).is_some())
    }

    pub fn merge(&mut self, patch: &Value) {
        deep_merge(&mut self.content, patch);
    }

    /// Pretty JSON with this document's indent and a trailing newline.
    pub fn render(&self) -> String {
        let mut text = to_pretty_json(&self.content, &self.indent);
        text.push('\n');
        text
    }

    pub fn write(&self) -> Result<(), ManifestError> {
        tracing::debug!(path = %self.path.display(), "writing manifest");
        std::fs::write(&self.path, self.render()).map_err(|source| ManifestError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn merge_and_write(&mut self, patch: &Value) -> Result<(), ManifestError> {
        self.merge(patch);
        self.write()
    }
}

/// Serialize `value` as pretty JSON using `indent` for each nesting level.
pub fn to_pretty_json(value: &Value, indent: &Indent) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_str().as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    // a Value always serializes into an in-memory buffer
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn read_text(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })
}
