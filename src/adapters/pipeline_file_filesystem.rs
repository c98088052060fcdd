//! Pipeline definition file rendered from embedded templates.

use std::fs;
use std::path::PathBuf;

use include_dir::{Dir, include_dir};
use minijinja::{Environment, UndefinedBehavior};

use crate::domain::{AppError, PipelineFileSpec, RuntimeLanguage};
use crate::ports::PipelineFileStore;

static PIPELINE_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/pipelines");

const FALLBACK_TEMPLATE: &str = "generic.yml.j2";

pub struct FilesystemPipelineFileStore {
    path: PathBuf,
}

impl FilesystemPipelineFileStore {
    /// `path` is the pipeline file location, usually relative to the repository root.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn template_name(language: RuntimeLanguage) -> String {
    match language {
        RuntimeLanguage::Unknown => FALLBACK_TEMPLATE.to_string(),
        known => format!("{}.yml.j2", known.as_str()),
    }
}

pub fn render_pipeline(spec: &PipelineFileSpec) -> Result<String, AppError> {
    let name = template_name(spec.language);
    let source = PIPELINE_TEMPLATES
        .get_file(&name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| {
            AppError::PipelineTemplate(format!("Missing embedded template '{}'", name))
        })?;

    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    let rendered = env
        .render_str(source, spec)
        .map_err(|err| AppError::PipelineTemplate(format!("{}: {}", name, err)))?;

    serde_yaml::from_str::<serde_yaml::Value>(&rendered).map_err(|err| {
        AppError::PipelineTemplate(format!("{} rendered invalid YAML: {}", name, err))
    })?;
    Ok(rendered)
}

impl PipelineFileStore for FilesystemPipelineFileStore {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn write(&self, spec: &PipelineFileSpec) -> Result<PathBuf, AppError> {
        let content = render_pipeline(spec)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        Ok(self.path.clone())
    }
}
