use std::path::PathBuf;

use crate::domain::{AppError, PipelineFileSpec};

/// Pipeline-definition file in the working directory.
pub trait PipelineFileStore {
    fn exists(&self) -> bool;

    /// Render and (over)write the file; returns its path.
    fn write(&self, spec: &PipelineFileSpec) -> Result<PathBuf, AppError>;
}
