//! JSON configuration embedded in a loadable JavaScript module:
//! `module.exports = { ... };`.

use std::path::Path;

use serde_json::Value;

use super::{deep_merge, to_pretty_json, Indent, ManifestError};
use crate::command::{CommandInvocation, CommandRunner};

const EXPORT_PREFIXES: &[&str] = &["module.exports", "export default"];

/// What [`create_or_merge`] did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptOutcome {
    Created,
    Merged,
}

/// Write `patch` to `path`, merging into the exported object if the file exists.
pub fn create_or_merge(
    path: &Path,
    patch: &Value,
    indent: &Indent,
    runner: &dyn CommandRunner,
) -> Result<ScriptOutcome, ManifestError> {
    let (mut config, outcome) = match load(path, runner)? {
        Some(existing) => (existing, ScriptOutcome::Merged),
        None => (Value::Object(Default::default()), ScriptOutcome::Created),
    };
    deep_merge(&mut config, patch);
    write(path, &config, indent)?;
    Ok(outcome)
}

/// Load the exported object, or `None` if the file does not exist.
///
/// Plain JSON exports are parsed directly. Anything else (unquoted keys,
/// comments, computed values) is evaluated with `node`.
pub fn load(path: &Path, runner: &dyn CommandRunner) -> Result<Option<Value>, ManifestError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ManifestError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let value = match extract_static(&text) {
        Some(value) => value,
        None => {
            tracing::debug!(path = %path.display(), "config is not plain JSON, evaluating with node");
            evaluate_with_node(path, runner)?
        }
    };

    if !value.is_object() {
        return Err(ManifestError::Script {
            path: path.to_path_buf(),
            reason: "the module does not export an object".to_string(),
        });
    }
    Ok(Some(value))
}

/// `module.exports = <json>;` followed by a newline.
pub fn render(value: &Value, indent: &Indent) -> String {
    format!("module.exports = {};\n", to_pretty_json(value, indent))
}

pub fn write(path: &Path, value: &Value, indent: &Indent) -> Result<(), ManifestError> {
    tracing::debug!(path = %path.display(), "writing config module");
    std::fs::write(path, render(value, indent)).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn extract_static(text: &str) -> Option<Value> {
    let body = EXPORT_PREFIXES.iter().find_map(|prefix| {
        let start = text.find(prefix)? + prefix.len();
        let rest = text[start..].trim_start();
        if *prefix == "module.exports" {
            rest.strip_prefix('=')
        } else {
            Some(rest)
        }
    })?;
    let body = body.trim();
    let body = body.strip_suffix(';').unwrap_or(body);
    serde_json::from_str(body).ok()
}

fn evaluate_with_node(path: &Path, runner: &dyn CommandRunner) -> Result<Value, ManifestError> {
    let script_error = |reason: String| ManifestError::Script {
        path: path.to_path_buf(),
        reason,
    };

    let absolute = std::path::absolute(path).map_err(|e| script_error(e.to_string()))?;
    let literal =
        serde_json::to_string(&absolute.to_string_lossy()).map_err(|e| script_error(e.to_string()))?;
    let expression = format!("JSON.stringify(require({literal}))");
    let command_line = shell_words::join(["node", "-p", expression.as_str()]);

    let mut invocation = CommandInvocation::new(command_line).capture();
    if let Some(parent) = absolute.parent() {
        invocation = invocation.cwd(parent);
    }

    let stdout = runner
        .run(&invocation)
        .map_err(|e| script_error(e.to_string()))?;
    serde_json::from_str(stdout.trim()).map_err(|e| script_error(e.to_string()))
}
