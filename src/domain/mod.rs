//! Domain Layer
//!
//! The deployment model without I/O: validated operator input, the immutable
//! deployment configuration, the generated proxy site, and the ports every
//! stage talks through.
//!
//! ## Structure
//!
//! - `value_objects/` - Validated scalar types (RepoUrl, RemoteHost, AppPort, AccessToken, RemoteCommand)
//! - `entities/` - DeploymentConfig, RemoteSession, ProxyRule, BuildDescriptor
//! - `ports/` - Interfaces implemented by infrastructure (RemoteShell, SourceControl, FileTransfer, Prompter, DeployLog)
//!
//! Nothing here spawns a process or opens a file. A `DeploymentConfig` is
//! built once from parsed input and only read afterwards; every remote or
//! local side effect goes through a trait in `ports/`.

pub mod entities;
pub mod ports;
pub mod value_objects;
