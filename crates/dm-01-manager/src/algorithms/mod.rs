//! # Algorithms Module
//!
//! Pure rules of the manager: transaction shape, cadence and escrow.

pub mod cadence;
pub mod escrow;
pub mod shape;

pub use cadence::{advance_cadence, check_close_allowed};
pub use escrow::check_refund_unlocked;
pub use shape::{
    check_no_payment_slot, check_nothing_after_payment, check_submission_precedes,
    check_validator_position, expect_deposit_transfer,
};
