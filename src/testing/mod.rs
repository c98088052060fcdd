mod fake_function_apps;
mod fake_local_repository;
mod fake_pipeline_service;
mod memory_pipeline_file;
mod scripted_prompt;

pub use fake_function_apps::FakeFunctionApps;
pub use fake_local_repository::FakeLocalRepository;
pub use fake_pipeline_service::FakePipelineService;
pub use memory_pipeline_file::MemoryPipelineFile;
pub use scripted_prompt::{Answer, ScriptedPrompt};
