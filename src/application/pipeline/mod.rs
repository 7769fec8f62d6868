//! Deployment Pipeline
//!
//! Sequences the stage use cases for a deploy or a teardown, tags every
//! failure with the stage it happened in, and guarantees the local working
//! copy is gone when the run ends.

mod options;
mod result;
mod use_case;
mod workspace;


pub use options::{Collaborators, PipelineOptions};
pub use result::{DeploymentSummary, TeardownSummary};
pub use use_case::Orchestrator;
pub use workspace::{TransientDir, WORK_DIR_NAME};
