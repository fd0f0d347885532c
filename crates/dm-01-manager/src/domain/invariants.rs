//! # Domain Invariants
//!
//! Business rules of the manager program as pure predicates.

use super::errors::ShapeViolation;
use shared_types::{Asset, Name, Timestamp, TransferArgs};
use std::time::Duration;

/// Invariant: a time-locked step is allowed once `delay` has elapsed since
/// `since`. The boundary itself is allowed.
pub fn invariant_delay_elapsed(since: Timestamp, now: Timestamp, delay: Duration) -> bool {
    now >= since.saturating_add(delay)
}

/// Invariant: a deposit transfer is paid by the poster, to the manager, for
/// exactly the configured deposit (amount and symbol).
pub fn invariant_deposit_transfer(
    transfer: &TransferArgs,
    user: &Name,
    manager: &Name,
    deposit: &Asset,
) -> Result<(), ShapeViolation> {
    if &transfer.from != user {
        return Err(ShapeViolation::WrongSender {
            expected: user.clone(),
            found: transfer.from.clone(),
        });
    }
    if &transfer.to != manager {
        return Err(ShapeViolation::WrongRecipient {
            expected: manager.clone(),
            found: transfer.to.clone(),
        });
    }
    if &transfer.quantity != deposit {
        return Err(ShapeViolation::WrongAmount {
            expected: deposit.clone(),
            found: transfer.quantity.clone(),
        });
    }
    Ok(())
}
