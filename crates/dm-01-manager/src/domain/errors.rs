//! # Domain Errors
//!
//! Error types for the manager program. Every variant maps to a stable
//! reason code and an `ErrorKind` so clients can tell "wait and retry"
//! apart from "fix the transaction" and "talk to the administrator".

use crate::ports::outbound::PaymentError;
use shared_types::{
    ActionFailure, ActionId, Asset, AuthError, CodecError, ErrorKind, Name, Timestamp,
};
use thiserror::Error;

fn describe(found: &Option<ActionId>) -> String {
    found
        .as_ref()
        .map_or_else(|| "nothing".to_string(), ToString::to_string)
}

/// Violation of the expected transaction shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    /// The content submission is not where it must be.
    #[error("expected {expected} at index {index}, found {}", describe(.found))]
    WrongPrecedingAction {
        /// Position checked.
        index: usize,
        /// Required action.
        expected: ActionId,
        /// What sits there.
        found: Option<ActionId>,
    },

    /// A non-whitelisted user sent no deposit.
    #[error("deposit transfer required at index {index}")]
    MissingPayment {
        /// Position the transfer must occupy.
        index: usize,
    },

    /// Something other than a token transfer sits in the payment slot.
    #[error("expected {expected} at index {index}, found {found}")]
    WrongPaymentAction {
        /// Position checked.
        index: usize,
        /// Required action.
        expected: ActionId,
        /// What sits there.
        found: ActionId,
    },

    /// The payment slot holds a transfer whose arguments do not decode.
    #[error("deposit transfer at index {index} is unreadable: {reason}")]
    UnreadablePayment {
        /// Position of the transfer.
        index: usize,
        /// Decoder message.
        reason: String,
    },

    /// Deposit not paid by the posting user.
    #[error("deposit must come from {expected}, not {found}")]
    WrongSender {
        /// Posting user.
        expected: Name,
        /// Transfer sender.
        found: Name,
    },

    /// Deposit not paid to the manager.
    #[error("deposit recipient must be {expected}, not {found}")]
    WrongRecipient {
        /// Manager account.
        expected: Name,
        /// Transfer recipient.
        found: Name,
    },

    /// Deposit amount or symbol differs from the configured deposit.
    #[error("deposit mismatched: expected {expected}, got {found}")]
    WrongAmount {
        /// Configured deposit.
        expected: Asset,
        /// Transferred quantity.
        found: Asset,
    },

    /// An action follows the deposit transfer.
    #[error("unexpected action at index {index}: at most one deposit transfer may follow validation")]
    TooManyActions {
        /// Index of the extra action.
        index: usize,
    },

    /// A whitelisted user's transaction carries an extra action.
    #[error("unexpected action at index {index}: whitelisted posts take no deposit")]
    TooManyActionsWithoutDeposit {
        /// Index of the extra action.
        index: usize,
    },

    /// `validatepost` runs somewhere other than its configured position.
    #[error("validatepost must run at index {expected}, not {found}")]
    WrongValidatorPosition {
        /// Configured position.
        expected: usize,
        /// Actual position.
        found: usize,
    },
}

impl ShapeViolation {
    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongPrecedingAction { .. } => "wrong_preceding_action",
            Self::MissingPayment { .. } => "missing_deposit",
            Self::WrongPaymentAction { .. } => "wrong_payment_action",
            Self::UnreadablePayment { .. } => "unreadable_payment",
            Self::WrongSender { .. } => "wrong_sender",
            Self::WrongRecipient { .. } => "wrong_recipient",
            Self::WrongAmount { .. } => "wrong_amount",
            Self::TooManyActions { .. } => "too_many_actions",
            Self::TooManyActionsWithoutDeposit { .. } => "too_many_actions_without_deposit",
            Self::WrongValidatorPosition { .. } => "wrong_validator_position",
        }
    }
}

/// Manager program errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManagerError {
    /// Caller lacks the required authority.
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// No whitelist entry for the user.
    #[error("whitelist entry for {0} does not exist")]
    WhitelistEntryNotFound(Name),

    /// No blacklist entry for the user.
    #[error("blacklist entry for {0} does not exist")]
    BlacklistEntryNotFound(Name),

    /// No deposit at the given time.
    #[error("deposit of {user} at {time} does not exist")]
    DepositNotFound {
        /// Depositor.
        user: Name,
        /// Deposit creation time.
        time: Timestamp,
    },

    /// No cadence record for the user.
    #[error("user info for {0} does not exist")]
    CadenceRecordNotFound(Name),

    /// Refund requested before the time-lock elapsed.
    #[error("deposit made at {deposited_at} can only be refunded from {unlocks_at}")]
    RefundLocked {
        /// Deposit creation time.
        deposited_at: Timestamp,
        /// Earliest refund time.
        unlocks_at: Timestamp,
    },

    /// Post submitted before the minimum delay elapsed.
    #[error("last post at {last_action}, next post allowed from {next_allowed}")]
    PostTooSoon {
        /// Last accepted action.
        last_action: Timestamp,
        /// Earliest next action.
        next_allowed: Timestamp,
    },

    /// Cadence record closed before the minimum delay elapsed.
    #[error("last post at {last_action}, user info can be closed from {next_allowed}")]
    CloseTooSoon {
        /// Last accepted action.
        last_action: Timestamp,
        /// Earliest close time.
        next_allowed: Timestamp,
    },

    /// User is blacklisted.
    #[error("user {0} is blacklisted")]
    Blacklisted(Name),

    /// Transaction does not have the required shape.
    #[error(transparent)]
    Shape(#[from] ShapeViolation),

    /// A deposit already exists at this key.
    #[error("deposit of {user} at {time} already exists")]
    DuplicateDeposit {
        /// Depositor.
        user: Name,
        /// Deposit creation time.
        time: Timestamp,
    },

    /// Action payload did not decode.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Action not handled by the manager.
    #[error("action {0} not allowed")]
    UnknownAction(Name),

    /// Refund transfer refused by the payment collaborator.
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl ManagerError {
    /// Remediation category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::WhitelistEntryNotFound(_)
            | Self::BlacklistEntryNotFound(_)
            | Self::DepositNotFound { .. }
            | Self::CadenceRecordNotFound(_) => ErrorKind::NotFound,
            Self::RefundLocked { .. } | Self::PostTooSoon { .. } | Self::CloseTooSoon { .. } => {
                ErrorKind::TooEarly
            }
            Self::Blacklisted(_) => ErrorKind::Forbidden,
            Self::Shape(_) => ErrorKind::ShapeMismatch,
            Self::DuplicateDeposit { .. } => ErrorKind::Conflict,
            Self::Codec(_) | Self::UnknownAction(_) => ErrorKind::Malformed,
            Self::Payment(_) => ErrorKind::External,
        }
    }

    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "missing_authority",
            Self::WhitelistEntryNotFound(_) => "whitelist_entry_not_found",
            Self::BlacklistEntryNotFound(_) => "blacklist_entry_not_found",
            Self::DepositNotFound { .. } => "deposit_not_found",
            Self::CadenceRecordNotFound(_) => "user_info_not_found",
            Self::RefundLocked { .. } => "refund_locked",
            Self::PostTooSoon { .. } => "post_too_soon",
            Self::CloseTooSoon { .. } => "close_too_soon",
            Self::Blacklisted(_) => "blacklisted",
            Self::Shape(violation) => violation.code(),
            Self::DuplicateDeposit { .. } => "deposit_exists",
            Self::Codec(_) => "malformed_action_data",
            Self::UnknownAction(_) => "action_not_allowed",
            Self::Payment(_) => "payment_failed",
        }
    }
}

impl From<ManagerError> for ActionFailure {
    fn from(err: ManagerError) -> Self {
        ActionFailure::new(err.kind(), err.code(), err.to_string())
    }
}

/// Invalid manager configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Deposit must be a positive amount.
    #[error("deposit must be positive, got {0}")]
    NonPositiveDeposit(Asset),

    /// Shape positions must start at zero and be consecutive.
    #[error("invalid transaction shape: submit={submit}, validate={validate}, payment={payment}")]
    InvalidShape {
        /// Submission index.
        submit: usize,
        /// Validation index.
        validate: usize,
        /// Payment index.
        payment: usize,
    },
}
