//! Positional checks on the sibling actions of a posting transaction.
//!
//! All indices are absolute. A check for "no action here" uses
//! `TransactionView::contains` and never decodes anything.

use crate::domain::{invariant_deposit_transfer, ManagerConfig, ManagerError, ShapeViolation};
use shared_types::{Name, TransactionView, TransferArgs};
use tracing::debug;

/// `validatepost` itself must run at `shape.validate_index`.
pub fn check_validator_position(
    index: usize,
    config: &ManagerConfig,
) -> Result<(), ShapeViolation> {
    let expected = config.shape.validate_index;
    if index != expected {
        return Err(ShapeViolation::WrongValidatorPosition {
            expected,
            found: index,
        });
    }
    Ok(())
}

/// The content submission must sit at `shape.submit_index`.
pub fn check_submission_precedes(
    tx: &dyn TransactionView,
    config: &ManagerConfig,
) -> Result<(), ShapeViolation> {
    let index = config.shape.submit_index;
    let found = tx.action(index);
    match found {
        Some(action) if action.is(&config.posts_account, &config.post_action) => {
            debug!(index, "content submission found");
            Ok(())
        }
        _ => Err(ShapeViolation::WrongPrecedingAction {
            index,
            expected: config.submit_action(),
            found: found.map(|a| a.id()),
        }),
    }
}

/// The deposit transfer must sit at `shape.payment_index` and pay exactly
/// the configured deposit from `user` to the manager.
pub fn expect_deposit_transfer(
    tx: &dyn TransactionView,
    user: &Name,
    config: &ManagerConfig,
) -> Result<TransferArgs, ManagerError> {
    let index = config.shape.payment_index;
    let action = tx
        .action(index)
        .ok_or(ShapeViolation::MissingPayment { index })?;
    if !action.is(&config.token_account, &config.transfer_action) {
        return Err(ShapeViolation::WrongPaymentAction {
            index,
            expected: config.payment_action(),
            found: action.id(),
        }
        .into());
    }

    let transfer: TransferArgs =
        action.decode().map_err(|err| ShapeViolation::UnreadablePayment {
            index,
            reason: err.to_string(),
        })?;
    invariant_deposit_transfer(&transfer, user, &config.account, &config.deposit)?;
    debug!(index, quantity = %transfer.quantity, "deposit transfer matches");
    Ok(transfer)
}

/// Nothing may follow the deposit transfer.
pub fn check_nothing_after_payment(
    tx: &dyn TransactionView,
    config: &ManagerConfig,
) -> Result<(), ShapeViolation> {
    let index = config.shape.after_payment();
    if tx.contains(index) {
        return Err(ShapeViolation::TooManyActions { index });
    }
    Ok(())
}

/// A whitelisted post carries nothing in the payment slot.
pub fn check_no_payment_slot(
    tx: &dyn TransactionView,
    config: &ManagerConfig,
) -> Result<(), ShapeViolation> {
    let index = config.shape.payment_index;
    if tx.contains(index) {
        return Err(ShapeViolation::TooManyActionsWithoutDeposit { index });
    }
    Ok(())
}
