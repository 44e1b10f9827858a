//! Configuration for the feedback settings module

use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVICE_ID: &str = "feedback-settings";

/// Feedback settings module configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Reported as `serviceId` in error responses
    #[serde(default = "default_service_id")]
    pub service_id: String,

    /// Run pending migrations when the module starts
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_id: default_service_id(),
            run_migrations: true,
        }
    }
}

fn default_service_id() -> String {
    DEFAULT_SERVICE_ID.to_owned()
}

fn default_true() -> bool {
    true
}
