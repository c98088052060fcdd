mod function_app_catalog;
mod local_repository;
mod operator_prompt;
mod pipeline_file_store;
mod pipeline_service;

pub use function_app_catalog::FunctionAppCatalog;
pub use local_repository::{GIT_METADATA_DIR, LocalRepository};
pub use operator_prompt::OperatorPrompt;
pub use pipeline_file_store::PipelineFileStore;
pub use pipeline_service::PipelineService;
