use std::path::PathBuf;

use super::ConverterContext;
use crate::error::Error;
use crate::project::{self, PackageManager};
use crate::report;

const FILE_NAME: &str = ".gitlab-ci.yml";

const TEMPLATE: &str = r#"image: node:lts

stages:
  - install
  - lint
  - build

cache:
  key:
    files:
      - {lockfile}
  paths:
    - node_modules/

install:
  stage: install
  script:
    - {install}

commitlint:
  stage: lint
  rules:
    - if: $CI_PIPELINE_SOURCE == "merge_request_event"
  script:
    - {exec} commitlint --from "$CI_MERGE_REQUEST_DIFF_BASE_SHA" --to "$CI_COMMIT_SHA" --verbose

build:
  stage: build
  script:
    - {run} build
  artifacts:
    paths:
      - dist/
"#;

/// Write `.gitlab-ci.yml` at the project root, or in the working directory
/// when there is no installed project.
pub fn run(ctx: &ConverterContext<'_>) -> Result<(), Error> {
    let root = project_root(ctx);
    let path = root.join(FILE_NAME);
    if path.exists() && !ctx.flags.force {
        report::warning(&format!(
            "{FILE_NAME} already exists, skipping. Use --force to overwrite it."
        ));
        return Ok(());
    }

    let pm = PackageManager::detect(&root);
    tracing::debug!(root = %root.display(), ?pm, "writing gitlab ci pipeline");
    std::fs::write(&path, render(pm)).map_err(|e| Error::io(&path, e))?;
    report::success("installed .gitlab-ci.yml file.");
    Ok(())
}

fn project_root(ctx: &ConverterContext<'_>) -> PathBuf {
    project::locate_project_root(ctx.cwd()).unwrap_or_else(|_| ctx.cwd().to_path_buf())
}

fn render(pm: PackageManager) -> String {
    TEMPLATE
        .replace("{lockfile}", pm.lockfile())
        .replace("{install}", pm.ci_install())
        .replace("{exec}", pm.exec())
        .replace("{run}", pm.run_script())
}
