use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::{AppError, PipelineFileSpec};
use crate::ports::PipelineFileStore;

#[derive(Default)]
pub struct MemoryPipelineFile {
    pub existing: Mutex<bool>,
    pub writes: Mutex<Vec<PipelineFileSpec>>,
}

impl MemoryPipelineFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn existing() -> Self {
        let file = Self::default();
        *file.existing.lock().unwrap() = true;
        file
    }

    pub fn written(&self) -> Vec<PipelineFileSpec> {
        self.writes.lock().unwrap().clone()
    }
}

impl PipelineFileStore for MemoryPipelineFile {
    fn exists(&self) -> bool {
        *self.existing.lock().unwrap()
    }

    fn write(&self, spec: &PipelineFileSpec) -> Result<PathBuf, AppError> {
        *self.existing.lock().unwrap() = true;
        self.writes.lock().unwrap().push(spec.clone());
        Ok(PathBuf::from("azure-pipelines.yml"))
    }
}
