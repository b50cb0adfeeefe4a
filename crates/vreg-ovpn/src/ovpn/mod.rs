//! OpenVPN profile intake – re-exports public API surface.

pub mod types;
pub mod error;
pub mod config;
pub mod settings;
pub mod service;

pub use types::*;
pub use error::{ConfigIssue, IntakeError, IntakeResult};
pub use config::{check, issues, parse, scan_directives};
pub use settings::IntakeSettings;
pub use service::{EndpointRecord, OvpnIntakeService};
