//! Local working-copy access through git2, shelling out to `git` for pushes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Config, ErrorCode, IndexAddOption, Repository, RepositoryInitOptions, Signature};
use tracing::debug;

use crate::domain::AppError;
use crate::ports::{GIT_METADATA_DIR, LocalRepository};

const ORIGIN: &str = "origin";
const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";
const FALLBACK_AUTHOR: (&str, &str) = ("funcpipe", "funcpipe@localhost");
const FALLBACK_BRANCH: &str = "master";
const BRANCH_REF_PREFIX: &str = "refs/heads/";

#[derive(Debug, Clone)]
pub struct Git2LocalRepository {
    root: PathBuf,
}

impl Git2LocalRepository {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn metadata_dir(&self) -> PathBuf {
        self.root.join(GIT_METADATA_DIR)
    }

    fn open(&self) -> Result<Repository, AppError> {
        Repository::open(&self.root).map_err(|e| AppError::git("git2::Repository::open", e))
    }

    fn open_or_init(&self, branch: &str) -> Result<Repository, AppError> {
        if self.has_repository() {
            return self.open();
        }
        let mut options = RepositoryInitOptions::new();
        options.initial_head(branch);
        Repository::init_opts(&self.root, &options)
            .map_err(|e| AppError::git("git2::Repository::init", e))
    }

    /// Branch `git init` would start on, honouring `init.defaultBranch`.
    fn default_branch() -> String {
        Config::open_default()
            .and_then(|config| config.get_string("init.defaultBranch"))
            .unwrap_or_else(|_| FALLBACK_BRANCH.to_string())
    }

    fn run(&self, args: &[&str], cwd: Option<&Path>) -> Result<String, AppError> {
        let mut command = Command::new("git");
        command.args(args);
        command.current_dir(cwd.unwrap_or(&self.root));

        let rendered = format!("git {}", args.join(" "));
        debug!(command = %rendered, "Running git");
        let output = command.output().map_err(|e| AppError::git(&rendered, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::git(
                rendered,
                if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Commit the whole working tree when the branch has no commit yet.
    fn ensure_initial_commit(&self, repo: &Repository) -> Result<(), AppError> {
        match repo.head() {
            Ok(_) => return Ok(()),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {}
            Err(e) => return Err(AppError::git("git2::Repository::head", e)),
        }

        let mut index = repo.index().map_err(|e| AppError::git("git2::Repository::index", e))?;
        index
            .add_all(["*"], IndexAddOption::DEFAULT, None)
            .map_err(|e| AppError::git("git add --all", e))?;
        index.write().map_err(|e| AppError::git("git2::Index::write", e))?;
        let tree_id =
            index.write_tree().map_err(|e| AppError::git("git2::Index::write_tree", e))?;
        let tree =
            repo.find_tree(tree_id).map_err(|e| AppError::git("git2::Repository::find_tree", e))?;

        let signature = repo
            .signature()
            .or_else(|_| Signature::now(FALLBACK_AUTHOR.0, FALLBACK_AUTHOR.1))
            .map_err(|e| AppError::git("git2::Signature::now", e))?;
        repo.commit(Some("HEAD"), &signature, &signature, INITIAL_COMMIT_MESSAGE, &tree, &[])
            .map_err(|e| AppError::git("git commit", e))?;
        Ok(())
    }
}

impl LocalRepository for Git2LocalRepository {
    fn has_repository(&self) -> bool {
        self.metadata_dir().exists()
    }

    fn origin_url(&self) -> Result<Option<String>, AppError> {
        if !self.has_repository() {
            return Ok(None);
        }
        let repo = self.open()?;
        match repo.find_remote(ORIGIN) {
            Ok(remote) => Ok(remote.url().map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(AppError::git("git2::Repository::find_remote", e)),
        }
    }

    fn remove_metadata(&self) -> Result<(), AppError> {
        fs::remove_dir_all(self.metadata_dir())?;
        Ok(())
    }

    fn branch(&self) -> Result<String, AppError> {
        if self.has_repository() {
            let repo = self.open()?;
            // HEAD names its branch even before the first commit.
            let head = repo
                .find_reference("HEAD")
                .map_err(|e| AppError::git("git2::Repository::find_reference", e))?;
            let name = head
                .symbolic_target()
                .and_then(|target| target.strip_prefix(BRANCH_REF_PREFIX))
                .map(str::to_string);
            if let Some(name) = name {
                return Ok(name);
            }
            debug!("HEAD is detached; using the default branch");
        }
        Ok(Self::default_branch())
    }

    fn publish(&self, remote_url: &str, branch: &str) -> Result<(), AppError> {
        let repo = self.open_or_init(branch)?;
        self.ensure_initial_commit(&repo)?;

        match repo.find_remote(ORIGIN) {
            Ok(_) => repo
                .remote_set_url(ORIGIN, remote_url)
                .map_err(|e| AppError::git("git remote set-url", e))?,
            Err(e) if e.code() == ErrorCode::NotFound => {
                repo.remote(ORIGIN, remote_url)
                    .map_err(|e| AppError::git("git remote add", e))?;
            }
            Err(e) => return Err(AppError::git("git2::Repository::find_remote", e)),
        }

        self.push(ORIGIN)
    }

    fn attach_remote(&self, name: &str, url: &str) -> Result<(), AppError> {
        let repo = self.open()?;
        match repo.remote(name, url) {
            Ok(_) => Ok(()),
            Err(e) if e.code() == ErrorCode::Exists => {
                Err(AppError::RemoteConflict { remote: name.to_string() })
            }
            Err(e) => Err(AppError::git("git remote add", e)),
        }
    }

    fn push(&self, remote: &str) -> Result<(), AppError> {
        self.run(&["push", "-u", remote, "HEAD"], None)?;
        Ok(())
    }
}
