//! Posting cadence rules.

use crate::domain::{invariant_delay_elapsed, CadenceRecord, ManagerError};
use shared_types::{Name, Timestamp};
use std::time::Duration;

/// Record to store after an accepted post at `now`.
///
/// First posts create the record; later posts must respect `min_delay`
/// since the last one.
pub fn advance_cadence(
    existing: Option<CadenceRecord>,
    user: &Name,
    now: Timestamp,
    min_delay: Duration,
) -> Result<CadenceRecord, ManagerError> {
    match existing {
        None => Ok(CadenceRecord::new(user.clone(), now)),
        Some(record) => {
            if !invariant_delay_elapsed(record.last_action, now, min_delay) {
                return Err(ManagerError::PostTooSoon {
                    last_action: record.last_action,
                    next_allowed: record.next_allowed(min_delay),
                });
            }
            Ok(CadenceRecord {
                last_action: now,
                ..record
            })
        }
    }
}

/// A cadence record may only be closed once `min_delay` has elapsed since
/// the last post, so closing cannot be used to dodge the rate limit.
pub fn check_close_allowed(
    record: &CadenceRecord,
    now: Timestamp,
    min_delay: Duration,
) -> Result<(), ManagerError> {
    if invariant_delay_elapsed(record.last_action, now, min_delay) {
        Ok(())
    } else {
        Err(ManagerError::CloseTooSoon {
            last_action: record.last_action,
            next_allowed: record.next_allowed(min_delay),
        })
    }
}
