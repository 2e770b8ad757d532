//! Draggable configuration.

use std::env;

use thiserror::Error;

use crate::geometry::Padding;

/// Environment variable holding padding, as either `size` or
/// `left,top,right,bottom`.
pub const PADDING_ENV_VAR: &str = "DRAGGABLE_PADDING";
/// Environment variable enabling recovery on drop.
pub const RECOVER_ENV_VAR: &str = "DRAGGABLE_RECOVER";

/// Error parsing configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A number could not be parsed, or is not finite.
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    /// Padding must have one or four sides.
    #[error("padding must have 1 or 4 comma-separated sides, not {0}")]
    PaddingSideCount(usize),
    /// A boolean flag could not be parsed.
    #[error("invalid flag {0:?}; expected true or false")]
    InvalidFlag(String),
    /// No easing curve has this name.
    #[error("unknown easing {0:?}")]
    UnknownEasing(String),
    /// An environment variable could not be parsed.
    #[error("bad value for ${var}: {source}")]
    Env {
        /// Name of the environment variable.
        var: &'static str,
        /// Underlying error.
        #[source]
        source: Box<ConfigError>,
    },
}

/// Configuration for a [`crate::Draggable`].
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct DraggableConfig {
    /// Margins between the draggable element and the edges of the viewport.
    pub padding: Padding,
    /// Whether the element animates back to its origin when released.
    pub recover_on_drop: bool,
}
impl DraggableConfig {
    /// Returns the default configuration: 30 pixels of padding on each side,
    /// with no recovery.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the padding, accepting either a uniform size or a [`Padding`].
    #[must_use]
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();
        self
    }
    /// Sets whether the element animates back to its origin when released.
    #[must_use]
    pub fn recover_on_drop(mut self, recover_on_drop: bool) -> Self {
        self.recover_on_drop = recover_on_drop;
        self
    }

    /// Overrides fields of `self` that are set in the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_vars(|var| env::var(var).ok())
    }

    /// Overrides fields of `self` using a variable lookup function, so that
    /// the environment can be substituted.
    pub fn with_vars(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(s) = lookup(PADDING_ENV_VAR) {
            self.padding = s.parse().map_err(env_error(PADDING_ENV_VAR))?;
        }
        if let Some(s) = lookup(RECOVER_ENV_VAR) {
            self.recover_on_drop = parse_flag(&s).map_err(env_error(RECOVER_ENV_VAR))?;
        }
        Ok(self)
    }
}

fn env_error(var: &'static str) -> impl Fn(ConfigError) -> ConfigError {
    move |e| ConfigError::Env {
        var,
        source: Box::new(e),
    }
}

fn parse_flag(s: &str) -> Result<bool, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(s.to_owned())),
    }
}
