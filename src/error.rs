//! Errors raised around the simulation core.
//!
//! The trajectory code itself is total; these only come from validating
//! configuration and from setting up the driving loop.

use std::fmt;

/// A tuning value or step size outside its allowed range.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
  /// A named parameter is non-finite or out of range.
  InvalidValue { name: &'static str, value: f64 },
  /// Spawning needs at least one lane.
  NoLanes,
  /// The fixed time step must be positive and finite.
  InvalidStep(f64),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidValue { name, value } => {
        write!(f, "Invalid value for {}: {}", name, value)
      }
      ConfigError::NoLanes => write!(f, "At least one spawn lane is required"),
      ConfigError::InvalidStep(dt) => {
        write!(f, "Time step must be positive and finite, got {}", dt)
      }
    }
  }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur when running a simulation.
#[derive(Debug)]
pub enum SimulationError {
  Config(ConfigError),
  /// Failed to install the Ctrl-C stop handler.
  StopSignal(ctrlc::Error),
}

impl fmt::Display for SimulationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SimulationError::Config(e) => write!(f, "Configuration error: {}", e),
      SimulationError::StopSignal(e) => write!(f, "Failed to install stop handler: {}", e),
    }
  }
}

impl std::error::Error for SimulationError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      SimulationError::Config(e) => Some(e),
      SimulationError::StopSignal(e) => Some(e),
    }
  }
}

impl From<ConfigError> for SimulationError {
  fn from(e: ConfigError) -> Self {
    SimulationError::Config(e)
  }
}

impl From<ctrlc::Error> for SimulationError {
  fn from(e: ctrlc::Error) -> Self {
    SimulationError::StopSignal(e)
  }
}
