//! # Host Errors

use shared_types::{ActionFailure, ErrorKind, Name};
use thiserror::Error;

/// Why a transaction was rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// A transaction must carry at least one action.
    #[error("transaction has no actions")]
    Empty,

    /// No program is deployed under the addressed account.
    #[error("action {index}: no program deployed at {account}")]
    UnknownProgram {
        /// Top-level action index.
        index: usize,
        /// Addressed account.
        account: Name,
    },

    /// A program refused an action.
    #[error("action {index} ({account}::{action}) failed: {failure}")]
    Aborted {
        /// Top-level action index.
        index: usize,
        /// Program account.
        account: Name,
        /// Action name.
        action: Name,
        /// The program's refusal.
        failure: ActionFailure,
    },

    /// Inline actions nested too deep.
    #[error("action {index}: inline actions nested deeper than {max_depth}")]
    InlineDepthExceeded {
        /// Top-level action index.
        index: usize,
        /// Configured limit.
        max_depth: usize,
    },

    /// An inline action claimed authority its sender does not hold.
    #[error("action {index}: inline action from {sender} may only carry {sender}'s authority")]
    InlineAuthorization {
        /// Top-level action index.
        index: usize,
        /// Program that queued the inline action.
        sender: Name,
    },
}

impl TransactionError {
    /// Remediation category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty | Self::UnknownProgram { .. } | Self::InlineDepthExceeded { .. } => {
                ErrorKind::Malformed
            }
            Self::Aborted { failure, .. } => failure.kind,
            Self::InlineAuthorization { .. } => ErrorKind::Unauthorized,
        }
    }

    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty_transaction",
            Self::UnknownProgram { .. } => "unknown_program",
            Self::Aborted { failure, .. } => failure.code,
            Self::InlineDepthExceeded { .. } => "inline_depth_exceeded",
            Self::InlineAuthorization { .. } => "inline_authorization",
        }
    }

    /// The program failure, if a program refused an action.
    pub fn failure(&self) -> Option<&ActionFailure> {
        match self {
            Self::Aborted { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

/// Host configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read config {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    /// TOML parse error.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Values parse but do not fit together.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<dm_01_manager::ConfigError> for ConfigError {
    fn from(err: dm_01_manager::ConfigError) -> Self {
        Self::Invalid(err.to_string())
    }
}
