//! TOML configuration for building positions.
//!
//! ```toml
//! representation = "mailbox"
//! initial_state = "empty"
//! # fen = "8/8/8/8/8/8/8/K6k w - - 0 1"
//! ```

use crate::factory::{self, InitialState, Representation, UnknownName};
use crate::MoveGenerator;
use chess_core::FenError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a configuration or building its position.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// The file is not valid TOML or does not match [`EngineConfig`].
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    /// The `fen` override is malformed.
    #[error("invalid fen in config: {0}")]
    Fen(#[from] FenError),
    #[error(transparent)]
    UnknownRepresentation(#[from] UnknownName),
}

/// Which representation to build and from which state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Defaults to `x88`.
    #[serde(default)]
    pub representation: Representation,
    /// Defaults to `standard_starting`. Ignored when `fen` is set.
    #[serde(default)]
    pub initial_state: InitialState,
    /// Starting position as FEN, overriding `initial_state`.
    #[serde(default)]
    pub fen: Option<String>,
}

impl EngineConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading engine config");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Overrides the representation by name, as given on a command line or
    /// in an environment variable.
    pub fn with_representation_name(mut self, name: &str) -> Result<Self, ConfigError> {
        self.representation = name.parse()?;
        Ok(self)
    }

    /// Builds the configured starting position.
    pub fn build(&self) -> Result<Box<dyn MoveGenerator>, ConfigError> {
        match &self.fen {
            Some(fen) => Ok(factory::from_fen(self.representation, fen)?),
            None => Ok(factory::create(self.representation, self.initial_state)),
        }
    }
}
