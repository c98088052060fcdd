pub mod devops_client;
pub mod dialoguer_prompt;
pub mod function_app_http;
pub mod git_repository;
pub mod pipeline_file_filesystem;
