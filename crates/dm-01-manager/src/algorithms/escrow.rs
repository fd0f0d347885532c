//! Deposit escrow rules.

use crate::domain::{invariant_delay_elapsed, ManagerError};
use shared_types::Timestamp;
use std::time::Duration;

/// A deposit can be refunded once `refund_delay` has elapsed since it was
/// made.
pub fn check_refund_unlocked(
    deposited_at: Timestamp,
    now: Timestamp,
    refund_delay: Duration,
) -> Result<(), ManagerError> {
    if invariant_delay_elapsed(deposited_at, now, refund_delay) {
        Ok(())
    } else {
        Err(ManagerError::RefundLocked {
            deposited_at,
            unlocks_at: deposited_at.saturating_add(refund_delay),
        })
    }
}
