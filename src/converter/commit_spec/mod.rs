//! Conventional commits end to end: commitizen prompts, commitlint checks,
//! a changelog script, and husky hooks wiring them into git.
//!
//! Steps run in order and stop at the first failure. Each one checks what
//! the project already has, so a partially configured project can simply be
//! run again.

mod hooks;
mod packages;


use serde_json::{json, Map, Value};

use super::ConverterContext;
use crate::command::CommandInvocation;
use crate::config::StagedRule;
use crate::error::Error;
use crate::manifest::script::{self, ScriptOutcome};
use crate::manifest::{Indent, ManifestDocument};
use crate::project::ProjectContext;
use crate::report;

pub use hooks::HookGeneration;

const COMMITIZEN_ADAPTER: &str = "cz-conventional-changelog";
const COMMITLINT_CONFIG_FILE: &str = "commitlint.config.js";
const COMMITLINT_PRESET: &str = "@commitlint/config-conventional";
const DEFAULT_STAGED_PATTERN: &str = "*.{js,jsx,ts,tsx}";
const DEFAULT_STAGED_COMMAND: &str = "eslint --fix";

/// State shared by every step of one run.
struct Setup<'a> {
    ctx: &'a ConverterContext<'a>,
    project: ProjectContext,
    /// Captured from the manifest before any step touched it.
    indent: Indent,
    generation: HookGeneration,
    lint_staged: bool,
}

pub fn run(ctx: &ConverterContext<'_>) -> Result<(), Error> {
    let project = ProjectContext::discover(ctx.cwd())?;
    let manifest = ManifestDocument::read(&project.manifest_path())?;
    let generation = HookGeneration::detect(&manifest, &project);
    let lint_staged = ctx.flags.lint_staged || ctx.settings.commit_spec.lint_staged;
    tracing::info!(?generation, lint_staged, "configuring commit tooling");

    let setup = Setup {
        ctx,
        indent: manifest.indent().clone(),
        project,
        generation,
        lint_staged,
    };

    setup.install_packages(&manifest)?;
    setup.init_commitizen()?;
    setup.add_changelog_script()?;
    setup.write_commitlint_config()?;
    setup.configure_hooks()?;
    if setup.lint_staged {
        setup.add_lint_staged_config()?;
    }
    Ok(())
}

impl Setup<'_> {
    fn reload_manifest(&self) -> Result<ManifestDocument, Error> {
        Ok(ManifestDocument::read_with_indent(
            &self.project.manifest_path(),
            self.indent.clone(),
        )?)
    }

    fn install_packages(&self, manifest: &ManifestDocument) -> Result<(), Error> {
        let pm = self.project.package_manager;
        let packages = packages::plan(manifest, &self.project, self.generation, self.lint_staged);
        let command_line = format!(
            "{} {} {}",
            pm.install_command(),
            pm.dev_flag(),
            packages.join(" ")
        );
        self.ctx
            .runner
            .run(&CommandInvocation::new(command_line).cwd(&self.project.root_directory))?;
        report::success("installed dependency packages.");
        Ok(())
    }

    fn init_commitizen(&self) -> Result<(), Error> {
        let pm = self.project.package_manager;
        let mut words = vec!["commitizen", "init", COMMITIZEN_ADAPTER];
        words.extend(pm.commitizen_flag());
        words.push(pm.dev_flag());
        words.push(pm.exact_flag());
        if self.ctx.flags.force {
            words.push("--force");
        }

        let invocation = CommandInvocation::new(words.join(" "))
            .bash()
            .cwd(self.ctx.cwd())
            .prefer_local(self.project.bin_directory());
        self.ctx.runner.run(&invocation)?;
        report::success("installed git commit log flow configuration.");
        Ok(())
    }

    fn add_changelog_script(&self) -> Result<(), Error> {
        let mut manifest = self.reload_manifest()?;
        if manifest.contains("/scripts/changelog") && !self.ctx.flags.force {
            report::warning("WARNING: The changelog script already exists, it will be overwritten.");
        }
        let preset = &self.ctx.settings.commit_spec.changelog_preset;
        manifest.merge_and_write(&json!({
            "scripts": {
                "changelog": format!("conventional-changelog -p {preset} -i CHANGELOG.md -s")
            }
        }))?;
        report::success("installed [changelog] script.");
        Ok(())
    }

    fn write_commitlint_config(&self) -> Result<(), Error> {
        let path = self.project.root_directory.join(COMMITLINT_CONFIG_FILE);
        let outcome = script::create_or_merge(
            &path,
            &json!({ "extends": [COMMITLINT_PRESET] }),
            &self.indent,
            self.ctx.runner,
        )?;
        tracing::debug!(?outcome, path = %path.display(), "commitlint config");
        match outcome {
            ScriptOutcome::Created => report::success("installed commitlint.config.js file."),
            ScriptOutcome::Merged => report::success("updated commitlint.config.js file."),
        }
        Ok(())
    }

    fn configure_hooks(&self) -> Result<(), Error> {
        let hooks = hooks::hooks_for(self.lint_staged);
        match self.generation {
            HookGeneration::Legacy => hooks::configure_legacy(&self.project, &self.indent, &hooks)?,
            HookGeneration::Modern => {
                hooks::configure_modern(&self.project, self.ctx.runner, &hooks)?
            }
        }
        report::success("installed husky hooks.");
        Ok(())
    }

    fn add_lint_staged_config(&self) -> Result<(), Error> {
        let mut manifest = self.reload_manifest()?;
        if manifest.contains("/lint-staged") && !self.ctx.flags.force {
            report::warning("WARNING: The lint-staged config already exists, it will be merged.");
        }
        let tasks = staged_tasks(&self.ctx.settings.commit_spec.staged);
        manifest.merge_and_write(&json!({ "lint-staged": tasks }))?;
        report::success("installed lint-staged configuration.");
        Ok(())
    }
}

/// The lint-staged mapping: glob → commands.
fn staged_tasks(rules: &[StagedRule]) -> Map<String, Value> {
    if rules.is_empty() {
        let mut tasks = Map::new();
        tasks.insert(
            DEFAULT_STAGED_PATTERN.to_string(),
            json!([DEFAULT_STAGED_COMMAND]),
        );
        return tasks;
    }
    rules
        .iter()
        .map(|rule| (rule.pattern.clone(), json!(rule.commands)))
        .collect()
}
