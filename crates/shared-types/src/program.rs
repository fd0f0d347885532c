//! # Program Trait
//!
//! The contract every ledger program implements so the host can dispatch
//! actions to it.
//!
//! ```rust,ignore
//! impl Program for MyProgram {
//!     fn account(&self) -> &Name { &self.account }
//!     fn apply(&self, ctx: &ExecutionContext<'_>, action: &Action) -> Result<(), ActionFailure> {
//!         match action.name.as_str() {
//!             "hello" => self.hello(ctx, action.decode()?).map_err(Into::into),
//!             other => Err(ActionFailure::new(ErrorKind::Malformed, "action_not_allowed", other)),
//!         }
//!     }
//! }
//! ```

use crate::action::Action;
use crate::context::ExecutionContext;
use crate::entities::Name;
use crate::errors::ActionFailure;

/// A ledger program.
pub trait Program: Send + Sync {
    /// Account the program is deployed under.
    fn account(&self) -> &Name;

    /// Execute one action addressed to this program.
    ///
    /// Any error aborts the enclosing transaction; the host discards every
    /// write made by it.
    fn apply(&self, ctx: &ExecutionContext<'_>, action: &Action) -> Result<(), ActionFailure>;
}
