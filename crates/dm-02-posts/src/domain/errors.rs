//! # Domain Errors
//!
//! Error types for the posts program.

use crate::ports::outbound::SinkError;
use shared_types::{ActionFailure, ActionId, AuthError, CodecError, ErrorKind, Name};
use thiserror::Error;

fn describe(found: &Option<ActionId>) -> String {
    found
        .as_ref()
        .map_or_else(|| "nothing".to_string(), ToString::to_string)
}

/// A content field outside its bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldViolation {
    /// Title too short or too long.
    #[error("title length must be larger than {min} and less than {max}, got {len}")]
    TitleLength {
        /// Actual length.
        len: usize,
        /// Exclusive lower bound.
        min: usize,
        /// Exclusive upper bound.
        max: usize,
    },

    /// Uri too short or too long.
    #[error("uri length must be larger than {min} and less than {max}, got {len}")]
    UriLength {
        /// Actual length.
        len: usize,
        /// Exclusive lower bound.
        min: usize,
        /// Exclusive upper bound.
        max: usize,
    },

    /// Uri has the wrong scheme.
    #[error("uri must start with \"{prefix}\"")]
    UriScheme {
        /// Required prefix.
        prefix: String,
    },

    /// Size is zero.
    #[error("size must be larger than 0")]
    ZeroSize,

    /// Content type too long.
    #[error("type length must be less than {max}, got {len}")]
    ContentTypeLength {
        /// Actual length.
        len: usize,
        /// Exclusive upper bound.
        max: usize,
    },

    /// Description too long.
    #[error("description length must be less than {max}, got {len}")]
    DescriptionLength {
        /// Actual length.
        len: usize,
        /// Exclusive upper bound.
        max: usize,
    },
}

impl FieldViolation {
    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TitleLength { .. } => "title_length",
            Self::UriLength { .. } => "uri_length",
            Self::UriScheme { .. } => "uri_scheme",
            Self::ZeroSize => "size_zero",
            Self::ContentTypeLength { .. } => "type_length",
            Self::DescriptionLength { .. } => "description_length",
        }
    }
}

/// Posts program errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostsError {
    /// Submitter's authority missing.
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// The manager's validation is not where it must be.
    #[error("expected {expected} at index {index}, found {}", describe(.found))]
    WrongFollowingAction {
        /// Position checked.
        index: usize,
        /// Required action.
        expected: ActionId,
        /// What sits there.
        found: Option<ActionId>,
    },

    /// A field is out of bounds.
    #[error(transparent)]
    Field(#[from] FieldViolation),

    /// Action payload did not decode.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Only the post action is accepted.
    #[error("only post action is allowed, got {0}")]
    UnknownAction(Name),

    /// The content store refused the submission.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl PostsError {
    /// Remediation category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::WrongFollowingAction { .. } => ErrorKind::ShapeMismatch,
            Self::Field(_) => ErrorKind::FieldInvalid,
            Self::Codec(_) | Self::UnknownAction(_) => ErrorKind::Malformed,
            Self::Sink(_) => ErrorKind::External,
        }
    }

    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "missing_authority",
            Self::WrongFollowingAction { .. } => "wrong_following_action",
            Self::Field(violation) => violation.code(),
            Self::Codec(_) => "malformed_action_data",
            Self::UnknownAction(_) => "action_not_allowed",
            Self::Sink(_) => "content_sink_failed",
        }
    }
}

impl From<PostsError> for ActionFailure {
    fn from(err: PostsError) -> Self {
        ActionFailure::new(err.kind(), err.code(), err.to_string())
    }
}
