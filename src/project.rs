use std::path::{Path, PathBuf};

use crate::error::Error;

pub(crate) const DEPENDENCY_DIR: &str = "node_modules";
pub(crate) const MANIFEST_FILE: &str = "package.json";
const YARN_LOCKFILE: &str = "yarn.lock";

/// Which package manager governs the project, decided by its lockfile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
}

impl PackageManager {
    /// `yarn.lock` in `root` means Yarn; anything else is npm.
    pub fn detect(root: &Path) -> Self {
        if root.join(YARN_LOCKFILE).is_file() {
            PackageManager::Yarn
        } else {
            PackageManager::Npm
        }
    }

    pub fn install_command(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm install",
            PackageManager::Yarn => "yarn add",
        }
    }

    pub fn dev_flag(self) -> &'static str {
        match self {
            PackageManager::Npm => "--save-dev",
            PackageManager::Yarn => "--dev",
        }
    }

    pub fn exact_flag(self) -> &'static str {
        match self {
            PackageManager::Npm => "--save-exact",
            PackageManager::Yarn => "--exact",
        }
    }

    /// Extra flag commitizen needs to drive this package manager.
    pub fn commitizen_flag(self) -> Option<&'static str> {
        match self {
            PackageManager::Npm => None,
            PackageManager::Yarn => Some("--yarn"),
        }
    }

    /// Command prefix for a clean, lockfile-respecting install in CI.
    pub fn ci_install(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm ci",
            PackageManager::Yarn => "yarn install --frozen-lockfile",
        }
    }

    /// Command prefix for executing a locally installed binary.
    pub fn exec(self) -> &'static str {
        match self {
            PackageManager::Npm => "npx --no-install",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Command prefix for running a `package.json` script.
    pub fn run_script(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm run",
            PackageManager::Yarn => "yarn",
        }
    }

    pub fn lockfile(self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Yarn => YARN_LOCKFILE,
        }
    }
}

/// Where the project lives and how it is managed.
///
/// Computed once per converter run and passed by reference to every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub root_directory: PathBuf,
    pub dependency_directory: PathBuf,
    pub package_manager: PackageManager,
}

impl ProjectContext {
    pub fn discover(start: &Path) -> Result<Self, Error> {
        let dependency_directory = locate_dependency_directory(start)?;
        let root_directory = root_of(&dependency_directory);
        let package_manager = PackageManager::detect(&root_directory);
        tracing::info!(
            root = %root_directory.display(),
            ?package_manager,
            "discovered project"
        );
        Ok(Self {
            root_directory,
            dependency_directory,
            package_manager,
        })
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root_directory.join(MANIFEST_FILE)
    }

    /// `node_modules/.bin`, for running locally installed tools.
    pub fn bin_directory(&self) -> PathBuf {
        self.dependency_directory.join(".bin")
    }

    /// Install location of a package; scoped names (`@scope/name`) nest.
    pub fn installed_package_dir(&self, name: &str) -> PathBuf {
        name.split('/')
            .fold(self.dependency_directory.clone(), |dir, part| dir.join(part))
    }

    pub fn has_installed(&self, name: &str) -> bool {
        self.installed_package_dir(name).is_dir()
    }
}

/// Nearest `node_modules` directory in `start` or any of its ancestors.
pub fn locate_dependency_directory(start: &Path) -> Result<PathBuf, Error> {
    start
        .ancestors()
        .map(|dir| dir.join(DEPENDENCY_DIR))
        .find(|candidate| candidate.is_dir())
        .ok_or_else(|| Error::DependencyDirectoryNotFound {
            start: start.to_path_buf(),
        })
}

/// The project root: parent of the nearest dependency directory.
pub fn locate_project_root(start: &Path) -> Result<PathBuf, Error> {
    locate_dependency_directory(start).map(|dir| root_of(&dir))
}

fn root_of(dependency_directory: &Path) -> PathBuf {
    dependency_directory
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dependency_directory.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_dependency_dir_in_start() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();

        let found = locate_dependency_directory(dir.path()).unwrap();
        assert_eq!(found, dir.path().join("node_modules"));
    }

    #[test]
    fn finds_nearest_ancestor_dependency_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        let nested = dir.path().join("packages/app");
        fs::create_dir_all(nested.join("node_modules")).unwrap();
        let deeper = nested.join("src/components");
        fs::create_dir_all(&deeper).unwrap();

        assert_eq!(
            locate_dependency_directory(&deeper).unwrap(),
            nested.join("node_modules")
        );
        assert_eq!(locate_project_root(&deeper).unwrap(), nested);
    }

    #[test]
    fn file_named_node_modules_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("node_modules"), "").unwrap();
        let result = locate_dependency_directory(dir.path());
        assert!(matches!(
            result,
            Err(Error::DependencyDirectoryNotFound { .. })
        ));
    }

    #[test]
    fn empty_project_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ProjectContext::discover(dir.path()).unwrap_err();
        match err {
            Error::DependencyDirectoryNotFound { start } => assert_eq!(start, dir.path()),
            other => panic!("expected DependencyDirectoryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn yarn_lock_selects_yarn() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("yarn.lock"), "").unwrap();

        let ctx = ProjectContext::discover(dir.path()).unwrap();
        assert_eq!(ctx.package_manager, PackageManager::Yarn);
        assert_eq!(ctx.root_directory, dir.path());
        assert_eq!(ctx.manifest_path(), dir.path().join("package.json"));
    }

    #[test]
    fn no_lockfile_selects_npm() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(PackageManager::detect(dir.path()), PackageManager::Npm);
    }

    #[test]
    fn package_manager_vocabulary() {
        assert_eq!(PackageManager::Npm.install_command(), "npm install");
        assert_eq!(PackageManager::Npm.dev_flag(), "--save-dev");
        assert_eq!(PackageManager::Npm.exact_flag(), "--save-exact");
        assert_eq!(PackageManager::Npm.commitizen_flag(), None);
        assert_eq!(PackageManager::Yarn.install_command(), "yarn add");
        assert_eq!(PackageManager::Yarn.dev_flag(), "--dev");
        assert_eq!(PackageManager::Yarn.exact_flag(), "--exact");
        assert_eq!(PackageManager::Yarn.commitizen_flag(), Some("--yarn"));
    }

    #[test]
    fn scoped_package_dir_nests() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/@commitlint/cli")).unwrap();
        let ctx = ProjectContext::discover(dir.path()).unwrap();

        assert!(ctx.has_installed("@commitlint"));
        assert!(ctx.has_installed("@commitlint/cli"));
        assert!(!ctx.has_installed("husky"));
    }
}
