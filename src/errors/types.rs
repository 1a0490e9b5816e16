//! Error type definitions for the matching engine
//!
//! The engine itself is pure: pattern misses and empty match sets are normal
//! outcomes, not errors. The types here cover the entry boundary only —
//! invalid configuration, malformed station data, and pattern compilation.

use thiserror::Error;

/// Top-level engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid configuration rejected at the engine boundary
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Malformed regional station data
    #[error("Station data error: {region} - {message}")]
    StationData { region: String, message: String },

    /// A pattern set failed to compile (reachable only through pathological
    /// user-supplied ignore tags)
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Convenience methods for creating common error types
impl EngineError {
    /// Create a configuration error with a custom message
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a station data error for a named region
    pub fn station_data<R: Into<String>, M: Into<String>>(region: R, message: M) -> Self {
        Self::StationData {
            region: region.into(),
            message: message.into(),
        }
    }
}
