//! funcpipe: get-or-create provisioning of an Azure DevOps build and release
//! pipeline for an Azure function app.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use domain::AppError;
