//! # builder.rs
//!
//! This module provides the configuration of a calculator session and a
//! builder to assemble one.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::history;
use crate::mode::{AngleMode, NumeralBase};
use crate::session::Session;

/// Delay before a displayed `Error` returns to `0`.
pub const DEFAULT_ERROR_RESET_DELAY: Duration = Duration::from_secs(2);

/// Settings a [`Session`] starts with.
///
/// Missing fields take their defaults when deserialized, so a partial
/// document such as `{"angle": "radians"}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of history entries kept.
    pub history_capacity: usize,
    /// Delay before an error display is cleared.
    pub error_reset_delay: Duration,
    /// Initial numeral base.
    pub base: NumeralBase,
    /// Initial angle mode.
    pub angle: AngleMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: history::DEFAULT_CAPACITY,
            error_reset_delay: DEFAULT_ERROR_RESET_DELAY,
            base: NumeralBase::default(),
            angle: AngleMode::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionBuilder
{
    config: SessionConfig,
}

impl SessionBuilder
{
    /// Creates a new `SessionBuilder` with the default configuration.
    ///
    /// This is the starting point for building a [`Session`].
    /// You can chain methods like `with_history_capacity` and `with_angle_mode`
    /// to configure the builder before calling `build`.
    ///
    /// # Examples
    /// ```rust
    /// use calcpad::{AngleMode, SessionBuilder};
    ///
    /// let session = SessionBuilder::new()
    ///     .with_history_capacity(10)
    ///     .with_angle_mode(AngleMode::Radians)
    ///     .build();
    /// assert_eq!(session.angle_mode(), AngleMode::Radians);
    /// ```
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Replaces the whole configuration, e.g. one read from JSON.
    pub fn with_config(mut self, config: SessionConfig) -> Self
    {
        self.config = config;
        self
    }

    /// Sets how many history entries are kept.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self
    {
        self.config.history_capacity = capacity;
        self
    }

    /// Sets how long `Error` stays on the display.
    pub fn with_error_reset_delay(mut self, delay: Duration) -> Self
    {
        self.config.error_reset_delay = delay;
        self
    }

    /// Sets the initial numeral base.
    pub fn with_base(mut self, base: NumeralBase) -> Self
    {
        self.config.base = base;
        self
    }

    /// Sets the initial angle mode.
    pub fn with_angle_mode(mut self, angle: AngleMode) -> Self
    {
        self.config.angle = angle;
        self
    }

    /// Returns the configuration assembled so far.
    pub fn config(&self) -> &SessionConfig
    {
        &self.config
    }

    /// Builds a fresh session showing `0`.
    pub fn build(self) -> Session
    {
        Session::new(self.config)
    }
}
