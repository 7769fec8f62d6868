//! Hoist - interactive deployment of a git repository to a Linux host
//!
//! Hoist clones a repository, copies it to a server over SSH, builds and runs
//! it with Docker (single container or compose stack), puts nginx in front of
//! it on port 80 and checks that the result actually serves. The same
//! pipeline can be rerun at any time and converges; `--teardown` removes a
//! deployment again.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{DeploymentSummary, Orchestrator, PipelineOptions, TeardownSummary};
pub use config::{ConfigError, Settings};
pub use domain::value_objects::DeploymentStage;
pub use error::{DeployError, DeployResult, StageFailure, EXIT_INTERRUPTED};
