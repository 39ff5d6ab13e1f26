//! Environment context handed to the interpreter by the outer driver.

use serde::{Deserialize, Serialize};

/// Driver-side context for one interpreter invocation.
///
/// `done` marks the episode boundary: when set, the interpreter clears its
/// per-match session state and returns the agent pair unchanged. The
/// configuration is an opaque value passed through for agents and drivers;
/// the interpreter never reads it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// The previous episode has ended.
    pub done: bool,

    /// Opaque driver configuration, passed through uninterpreted.
    pub configuration: serde_json::Value,
}

impl Environment {
    /// A running environment with no configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment signalling that the previous episode ended.
    #[must_use]
    pub fn completed() -> Self {
        Self {
            done: true,
            configuration: serde_json::Value::Null,
        }
    }

    /// Attach a driver configuration value.
    #[must_use]
    pub fn with_configuration(mut self, configuration: serde_json::Value) -> Self {
        self.configuration = configuration;
        self
    }
}
