use crate::manifest::ManifestDocument;
use crate::project::ProjectContext;
use crate::report;

use super::hooks::{HookGeneration, HOOK_MANAGER};

/// Installed on every run.
pub(super) const CORE_PACKAGES: &[&str] = &[
    "commitizen",
    "cz-conventional-changelog",
    "conventional-changelog",
];

pub(super) const COMMITLINT_SCOPE: &str = "@commitlint";
pub(super) const COMMITLINT_PACKAGES: &[&str] =
    &["@commitlint/cli", "@commitlint/config-conventional"];
pub(super) const LINT_STAGED: &str = "lint-staged";

/// Packages the install step should add, in install order.
///
/// Core tooling is always listed. husky, commitlint and lint-staged are only
/// listed when the project does not already have them; each skip is reported.
pub(super) fn plan(
    manifest: &ManifestDocument,
    project: &ProjectContext,
    generation: HookGeneration,
    lint_staged: bool,
) -> Vec<&'static str> {
    let mut packages = CORE_PACKAGES.to_vec();

    match husky_skip_reason(manifest, generation) {
        Some(reason) => report::warning(&format!("{reason}, skipping its installation.")),
        None => packages.push(HOOK_MANAGER),
    }

    if project.has_installed(COMMITLINT_SCOPE) {
        report::warning("@commitlint is already installed, skipping its installation.");
    } else {
        packages.extend_from_slice(COMMITLINT_PACKAGES);
    }

    if lint_staged {
        if project.has_installed(LINT_STAGED) || manifest.has_dependency(LINT_STAGED) {
            report::warning("lint-staged is already installed, skipping its installation.");
        } else {
            packages.push(LINT_STAGED);
        }
    }

    tracing::debug!(?packages, "planned package installation");
    packages
}

/// Why husky should not be installed again, if it shouldn't.
fn husky_skip_reason(manifest: &ManifestDocument, generation: HookGeneration) -> Option<&'static str> {
    if manifest.get(HOOK_MANAGER).is_some() {
        Some("husky is already configured in package.json")
    } else if generation == HookGeneration::Legacy {
        Some("husky 4 or older is already installed")
    } else if manifest.has_dependency(HOOK_MANAGER) {
        Some("husky is already a dependency")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn project_with(manifest: &str, installed: &[&str]) -> (tempfile::TempDir, ProjectContext, ManifestDocument) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), manifest).unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        for name in installed {
            fs::create_dir_all(dir.path().join("node_modules").join(Path::new(name))).unwrap();
        }
        let project = ProjectContext::discover(dir.path()).unwrap();
        let doc = ManifestDocument::read(&project.manifest_path()).unwrap();
        (dir, project, doc)
    }

    #[test]
    fn fresh_project_gets_everything() {
        let (_dir, project, doc) = project_with(r#"{"name": "app"}"#, &[]);
        assert_eq!(
            plan(&doc, &project, HookGeneration::Modern, false),
            vec![
                "commitizen",
                "cz-conventional-changelog",
                "conventional-changelog",
                "husky",
                "@commitlint/cli",
                "@commitlint/config-conventional",
            ]
        );
    }

    #[test]
    fn declared_husky_is_skipped() {
        let (_dir, project, doc) =
            project_with(r#"{"devDependencies": {"husky": "^8.0.0"}}"#, &[]);
        let packages = plan(&doc, &project, HookGeneration::Modern, false);
        assert!(!packages.contains(&"husky"));
    }

    #[test]
    fn legacy_configured_husky_is_skipped() {
        let (_dir, project, doc) = project_with(r#"{"husky": {"hooks": {}}}"#, &[]);
        let packages = plan(&doc, &project, HookGeneration::Legacy, false);
        assert!(!packages.contains(&"husky"));
    }

    #[test]
    fn installed_legacy_husky_is_skipped_with_its_own_reason() {
        let (_dir, project, doc) = project_with("{}", &["husky"]);
        assert_eq!(
            husky_skip_reason(&doc, HookGeneration::Legacy),
            Some("husky 4 or older is already installed")
        );
        assert!(!plan(&doc, &project, HookGeneration::Legacy, false).contains(&"husky"));
    }

    #[test]
    fn skip_reason_names_the_manifest_section_or_dependency() {
        let (_dir, _project, doc) = project_with(r#"{"husky": {"hooks": {}}}"#, &[]);
        assert_eq!(
            husky_skip_reason(&doc, HookGeneration::Legacy),
            Some("husky is already configured in package.json")
        );

        let (_dir, _project, doc) = project_with(r#"{"devDependencies": {"husky": "^8.0.0"}}"#, &[]);
        assert_eq!(
            husky_skip_reason(&doc, HookGeneration::Modern),
            Some("husky is already a dependency")
        );

        let (_dir, _project, doc) = project_with("{}", &[]);
        assert_eq!(husky_skip_reason(&doc, HookGeneration::Modern), None);
    }

    #[test]
    fn installed_commitlint_is_skipped() {
        let (_dir, project, doc) = project_with("{}", &["@commitlint/cli"]);
        let packages = plan(&doc, &project, HookGeneration::Modern, false);
        assert!(!packages.contains(&"@commitlint/cli"));
        assert!(!packages.contains(&"@commitlint/config-conventional"));
        assert!(packages.starts_with(CORE_PACKAGES));
    }

    #[test]
    fn lint_staged_only_when_requested_and_missing() {
        let (_dir, project, doc) = project_with("{}", &[]);
        assert!(!plan(&doc, &project, HookGeneration::Modern, false).contains(&LINT_STAGED));
        assert!(plan(&doc, &project, HookGeneration::Modern, true).contains(&LINT_STAGED));

        let (_dir, project, doc) = project_with("{}", &["lint-staged"]);
        assert!(!plan(&doc, &project, HookGeneration::Modern, true).contains(&LINT_STAGED));
    }
}
