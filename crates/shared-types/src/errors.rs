//! # Error Types
//!
//! Primitive errors plus the failure taxonomy every program error maps into.

use crate::entities::Name;
use std::fmt;
use thiserror::Error;

/// Invalid account or action name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Empty string.
    #[error("name is empty")]
    Empty,

    /// Longer than the maximum name length.
    #[error("name too long: {len} > {max} characters")]
    TooLong {
        /// Actual length.
        len: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// Character outside `a-z`, `1-5`, `.`.
    #[error("invalid character {ch:?} at position {position}")]
    InvalidChar {
        /// Offending character.
        ch: char,
        /// Character index.
        position: usize,
    },

    /// Names may not end with a dot.
    #[error("name ends with '.'")]
    TrailingDot,
}

/// Invalid symbol or asset text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Symbol code is not 1-7 uppercase letters.
    #[error("invalid symbol code: {0:?}")]
    InvalidSymbolCode(String),

    /// Too many fractional digits.
    #[error("precision too high: {0}")]
    PrecisionTooHigh(u8),

    /// Text does not look like `<amount> <CODE>` / `<precision>,<CODE>`.
    #[error("malformed asset: {0:?}")]
    Malformed(String),

    /// Amount does not fit in 64 bits.
    #[error("asset amount overflow: {0:?}")]
    Overflow(String),
}

/// Action payload encoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Arguments could not be encoded.
    #[error("failed to encode action data: {0}")]
    Encode(String),

    /// Action data did not decode as the expected argument type.
    #[error("failed to decode {action} data: {reason}")]
    Decode {
        /// `account::name` of the action being decoded.
        action: String,
        /// Decoder message.
        reason: String,
    },
}

/// Authorization check failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The action does not carry the authority of `required`.
    #[error("missing authority of {required}")]
    MissingAuthority {
        /// Account whose authority was required.
        required: Name,
    },
}

// =============================================================================
// FAILURE TAXONOMY
// =============================================================================

/// Category of an action failure. Tells a client how to remediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong caller.
    Unauthorized,
    /// Registry, deposit or cadence record missing.
    NotFound,
    /// Time-lock or cadence delay not yet elapsed.
    TooEarly,
    /// Caller is blacklisted.
    Forbidden,
    /// Wrong sibling action, wrong payment fields, or extra actions.
    ShapeMismatch,
    /// Content field length / prefix / size violation.
    FieldInvalid,
    /// Undecodable payload or action not handled by the program.
    Malformed,
    /// Record already exists where a fresh one must be created.
    Conflict,
    /// A collaborator (payment, storage) refused the request.
    External,
}

impl ErrorKind {
    /// Stable lowercase label, used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::TooEarly => "too_early",
            Self::Forbidden => "forbidden",
            Self::ShapeMismatch => "shape_mismatch",
            Self::FieldInvalid => "field_invalid",
            Self::Malformed => "malformed",
            Self::Conflict => "conflict",
            Self::External => "external",
        }
    }

    /// True if resubmitting the same transaction later can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TooEarly)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A program's refusal to execute an action. Fatal to the enclosing
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{kind}] {code}: {message}")]
pub struct ActionFailure {
    /// Remediation category.
    pub kind: ErrorKind,
    /// Stable reason code, e.g. `post_too_soon`.
    pub code: &'static str,
    /// Human readable detail.
    pub message: String,
}

impl ActionFailure {
    /// Create a failure.
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }
}

impl From<AuthError> for ActionFailure {
    fn from(err: AuthError) -> Self {
        Self::new(ErrorKind::Unauthorized, "missing_authority", err.to_string())
    }
}

impl From<CodecError> for ActionFailure {
    fn from(err: CodecError) -> Self {
        Self::new(ErrorKind::Malformed, "malformed_action_data", err.to_string())
    }
}
