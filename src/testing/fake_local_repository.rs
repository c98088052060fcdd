use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::LocalRepository;

#[derive(Default)]
pub struct FakeLocalRepository {
    pub present: Mutex<bool>,
    pub origin: Mutex<Option<String>>,
    pub remotes: Mutex<Vec<(String, String)>>,
    pub published: Mutex<Vec<String>>,
    pub published_branches: Mutex<Vec<String>>,
    /// Checked-out branch; `None` reads as `master`.
    pub branch: Mutex<Option<String>>,
    pub pushed: Mutex<Vec<String>>,
    pub removed: Mutex<bool>,
}

impl FakeLocalRepository {
    /// Working directory without repository metadata.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Existing repository whose `origin` points at `url`.
    pub fn with_origin(url: &str) -> Self {
        let fake = Self::default();
        *fake.present.lock().unwrap() = true;
        *fake.origin.lock().unwrap() = Some(url.to_string());
        fake.remotes.lock().unwrap().push(("origin".to_string(), url.to_string()));
        fake
    }

    /// Existing repository without an `origin` remote.
    pub fn without_origin() -> Self {
        let fake = Self::default();
        *fake.present.lock().unwrap() = true;
        fake
    }

    pub fn on_branch(self, branch: &str) -> Self {
        *self.branch.lock().unwrap() = Some(branch.to_string());
        self
    }

    pub fn published_urls(&self) -> Vec<String> {
        self.published.lock().unwrap().clone()
    }

    pub fn was_removed(&self) -> bool {
        *self.removed.lock().unwrap()
    }
}

impl LocalRepository for FakeLocalRepository {
    fn has_repository(&self) -> bool {
        *self.present.lock().unwrap()
    }

    fn origin_url(&self) -> Result<Option<String>, AppError> {
        Ok(self.origin.lock().unwrap().clone())
    }

    fn remove_metadata(&self) -> Result<(), AppError> {
        *self.present.lock().unwrap() = false;
        *self.origin.lock().unwrap() = None;
        self.remotes.lock().unwrap().clear();
        *self.removed.lock().unwrap() = true;
        Ok(())
    }

    fn branch(&self) -> Result<String, AppError> {
        Ok(self.branch.lock().unwrap().clone().unwrap_or_else(|| "master".to_string()))
    }

    fn publish(&self, remote_url: &str, branch: &str) -> Result<(), AppError> {
        *self.present.lock().unwrap() = true;
        *self.origin.lock().unwrap() = Some(remote_url.to_string());
        self.published.lock().unwrap().push(remote_url.to_string());
        self.published_branches.lock().unwrap().push(branch.to_string());
        Ok(())
    }

    fn attach_remote(&self, name: &str, url: &str) -> Result<(), AppError> {
        let mut remotes = self.remotes.lock().unwrap();
        if remotes.iter().any(|(existing, _)| existing == name) {
            return Err(AppError::RemoteConflict { remote: name.to_string() });
        }
        remotes.push((name.to_string(), url.to_string()));
        Ok(())
    }

    fn push(&self, remote: &str) -> Result<(), AppError> {
        self.pushed.lock().unwrap().push(remote.to_string());
        Ok(())
    }
}
