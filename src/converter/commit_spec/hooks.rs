use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::command::{CommandInvocation, CommandRunner};
use crate::error::Error;
use crate::manifest::{Indent, ManifestDocument};
use crate::project::ProjectContext;
use crate::report;

pub(super) const HOOK_MANAGER: &str = "husky";
const HOOK_DIR: &str = ".husky";
const SAMPLE_HOOK: &str = "pre-commit";

/// husky releases up to 4.x read hooks from `package.json`; later ones use
/// one script per hook under `.husky/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookGeneration {
    Legacy,
    Modern,
}

impl HookGeneration {
    /// Legacy when the manifest already carries a `husky` section or the
    /// installed husky is 4.x or older.
    pub fn detect(manifest: &ManifestDocument, project: &ProjectContext) -> Self {
        if manifest.get(HOOK_MANAGER).is_some() {
            return HookGeneration::Legacy;
        }
        match installed_major_version(project, HOOK_MANAGER) {
            Some(major) if major <= 4 => HookGeneration::Legacy,
            _ => HookGeneration::Modern,
        }
    }
}

#[derive(Deserialize)]
struct PackageInfo {
    version: String,
}

fn installed_major_version(project: &ProjectContext, name: &str) -> Option<u64> {
    let path = project.installed_package_dir(name).join("package.json");
    let text = std::fs::read_to_string(path).ok()?;
    let info: PackageInfo = serde_json::from_str(&text).ok()?;
    info.version.split('.').next()?.parse().ok()
}

/// One git hook and the command it runs, per husky generation.
pub(super) struct Hook {
    pub name: &'static str,
    pub legacy: &'static str,
    pub modern: &'static str,
}

pub(super) static PREPARE_COMMIT_MSG: Hook = Hook {
    name: "prepare-commit-msg",
    legacy: "exec < /dev/tty && git cz --hook || true",
    modern: "exec < /dev/tty && git cz --hook || true",
};

pub(super) static COMMIT_MSG: Hook = Hook {
    name: "commit-msg",
    legacy: "commitlint -E HUSKY_GIT_PARAMS",
    modern: "npx --no-install commitlint --edit $1",
};

pub(super) static PRE_COMMIT: Hook = Hook {
    name: "pre-commit",
    legacy: "lint-staged",
    modern: "npx --no-install lint-staged",
};

pub(super) fn hooks_for(lint_staged: bool) -> Vec<&'static Hook> {
    let mut hooks = vec![&PREPARE_COMMIT_MSG, &COMMIT_MSG];
    if lint_staged {
        hooks.push(&PRE_COMMIT);
    }
    hooks
}

/// Merge `husky.hooks` into the manifest.
pub(super) fn configure_legacy(
    project: &ProjectContext,
    indent: &Indent,
    hooks: &[&Hook],
) -> Result<(), Error> {
    let mut manifest = ManifestDocument::read_with_indent(&project.manifest_path(), indent.clone())?;
    let entries: Map<String, Value> = hooks
        .iter()
        .map(|hook| (hook.name.to_string(), Value::from(hook.legacy)))
        .collect();
    manifest.merge_and_write(&json!({ HOOK_MANAGER: { "hooks": entries } }))?;
    Ok(())
}

/// Create `.husky/<hook>` scripts through husky itself.
///
/// Runs `husky-init` when the hook directory is missing and drops the sample
/// hook it generates. Hook files that already exist are left alone.
pub(super) fn configure_modern(
    project: &ProjectContext,
    runner: &dyn CommandRunner,
    hooks: &[&Hook],
) -> Result<(), Error> {
    let root = &project.root_directory;
    let hook_dir = root.join(HOOK_DIR);

    if !hook_dir.exists() {
        runner.run(&CommandInvocation::new("npx husky-init").bash().cwd(root))?;
        remove_sample_hook(&hook_dir.join(SAMPLE_HOOK))?;
    }

    for hook in hooks {
        if hook_dir.join(hook.name).exists() {
            report::warning(&format!(
                "{HOOK_DIR}/{} already exists. To change it, add '{}'",
                hook.name, hook.modern
            ));
            continue;
        }
        let command_line = format!(
            "npx husky add {HOOK_DIR}/{} {}",
            hook.name,
            shell_words::quote(hook.modern)
        );
        runner.run(&CommandInvocation::new(command_line).bash().cwd(root))?;
    }
    Ok(())
}

fn remove_sample_hook(path: &Path) -> Result<(), Error> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}
