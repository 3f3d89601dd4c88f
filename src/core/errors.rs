/*!
 * Error Types
 * Configuration-boundary errors with thiserror, miette, and serde support
 *
 * Acquire and release never fail. Only building a pool from external
 * configuration can.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pool setup errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum PoolError {
    #[error("Invalid pool configuration: {0}")]
    #[diagnostic(
        code(pool::invalid_config),
        help("Check the pool configuration values. Retain limits must be positive.")
    )]
    InvalidConfig(String),

    #[error("Invalid value {value:?} for environment variable {var}")]
    #[diagnostic(
        code(pool::invalid_env),
        help("Unset the variable or give it a positive integer value.")
    )]
    InvalidEnv { var: String, value: String },
}
