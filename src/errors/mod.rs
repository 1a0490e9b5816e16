//! Centralized error handling for the matching engine
//!
//! Inside the core, a name that fails to parse or a channel with zero
//! qualifying streams is represented by an explicit "none" outcome and never
//! raised as an error. Errors exist only at the boundary:
//!
//! - **Configuration**: threshold or visible-limit values outside their valid
//!   ranges are rejected, not clamped
//! - **Station data**: regional record sets that fail to deserialize
//! - **Patterns**: an ignore-tag set that cannot be compiled into patterns

pub mod types;

pub use types::*;

/// Convenience type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;
