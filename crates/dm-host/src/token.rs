//! # Token Program
//!
//! Minimal single-symbol payment program: balances and `transfer`. It exists
//! so deposits and refunds move real balances inside the host. It is not a
//! general-purpose currency.

use shared_types::{
    Action, ActionFailure, Asset, AuthError, Checkpoint, CodecError, ErrorKind, ExecutionContext,
    MemoryTable, Name, Program, Symbol, Table, TransferArgs,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Token program errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Sender's authority missing.
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// Amount must be positive.
    #[error("quantity must be positive, got {0}")]
    NonPositive(Asset),

    /// Wrong token.
    #[error("symbol mismatch: expected {expected}, got {found}")]
    SymbolMismatch {
        /// Configured symbol.
        expected: Symbol,
        /// Symbol sent.
        found: Symbol,
    },

    /// Sender cannot cover the amount.
    #[error("{account} has {balance}, needs {needed}")]
    InsufficientBalance {
        /// Sender.
        account: Name,
        /// Current balance.
        balance: Asset,
        /// Requested amount.
        needed: Asset,
    },

    /// Sender and recipient are the same account.
    #[error("cannot transfer to self ({0})")]
    SelfTransfer(Name),

    /// Balance would overflow.
    #[error("balance of {0} would overflow")]
    Overflow(Name),

    /// Action payload did not decode.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Action not handled by the token program.
    #[error("action {0} not allowed")]
    UnknownAction(Name),
}

impl TokenError {
    /// Remediation category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::NonPositive(_) | Self::SymbolMismatch { .. } | Self::SelfTransfer(_) => {
                ErrorKind::FieldInvalid
            }
            Self::InsufficientBalance { .. } | Self::Overflow(_) => ErrorKind::Conflict,
            Self::Codec(_) | Self::UnknownAction(_) => ErrorKind::Malformed,
        }
    }

    /// Stable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "missing_authority",
            Self::NonPositive(_) => "non_positive_quantity",
            Self::SymbolMismatch { .. } => "symbol_mismatch",
            Self::InsufficientBalance { .. } => "insufficient_balance",
            Self::SelfTransfer(_) => "self_transfer",
            Self::Overflow(_) => "balance_overflow",
            Self::Codec(_) => "malformed_action_data",
            Self::UnknownAction(_) => "action_not_allowed",
        }
    }
}

impl From<TokenError> for ActionFailure {
    fn from(err: TokenError) -> Self {
        ActionFailure::new(err.kind(), err.code(), err.to_string())
    }
}

/// Single-symbol token program.
pub struct TokenProgram {
    account: Name,
    transfer_action: Name,
    symbol: Symbol,
    balances: MemoryTable<Name, i64>,
}

impl TokenProgram {
    /// Program deployed at `account` moving `symbol`.
    pub fn new(account: Name, transfer_action: Name, symbol: Symbol) -> Self {
        Self {
            account,
            transfer_action,
            symbol,
            balances: MemoryTable::new("accounts"),
        }
    }

    /// Token symbol.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Balance of `owner`.
    pub fn balance_of(&self, owner: &Name) -> Asset {
        Asset::new(
            self.balances.get(owner).unwrap_or_default(),
            self.symbol.clone(),
        )
    }

    /// Checkpoint handle for the host.
    pub fn checkpoint_handle(&self) -> Arc<dyn Checkpoint> {
        Arc::new(self.balances.clone())
    }

    /// Create `quantity` out of thin air for `to`. Host-level genesis helper.
    pub fn issue(&self, to: &Name, quantity: &Asset) -> Result<(), TokenError> {
        self.check_quantity(quantity)?;
        self.credit(to, quantity.amount)?;
        info!(to = %to, quantity = %quantity, "tokens issued");
        Ok(())
    }

    /// Move `quantity` between balances. Requires the sender's authority.
    pub fn transfer(
        &self,
        ctx: &ExecutionContext<'_>,
        transfer: &TransferArgs,
    ) -> Result<(), TokenError> {
        ctx.require_auth(&transfer.from)?;
        self.check_quantity(&transfer.quantity)?;
        if transfer.from == transfer.to {
            return Err(TokenError::SelfTransfer(transfer.from.clone()));
        }

        let balance = self.balances.get(&transfer.from).unwrap_or_default();
        if balance < transfer.quantity.amount {
            return Err(TokenError::InsufficientBalance {
                account: transfer.from.clone(),
                balance: Asset::new(balance, self.symbol.clone()),
                needed: transfer.quantity.clone(),
            });
        }
        self.credit(&transfer.to, transfer.quantity.amount)?;
        self.balances
            .insert(transfer.from.clone(), balance - transfer.quantity.amount);

        info!(
            from = %transfer.from,
            to = %transfer.to,
            quantity = %transfer.quantity,
            memo = %transfer.memo,
            "transfer"
        );
        Ok(())
    }

    fn check_quantity(&self, quantity: &Asset) -> Result<(), TokenError> {
        if quantity.symbol != self.symbol {
            return Err(TokenError::SymbolMismatch {
                expected: self.symbol.clone(),
                found: quantity.symbol.clone(),
            });
        }
        if !quantity.is_positive() {
            return Err(TokenError::NonPositive(quantity.clone()));
        }
        Ok(())
    }

    fn credit(&self, owner: &Name, amount: i64) -> Result<(), TokenError> {
        let current = self.balances.get(owner).unwrap_or_default();
        let updated = current
            .checked_add(amount)
            .ok_or_else(|| TokenError::Overflow(owner.clone()))?;
        self.balances.insert(owner.clone(), updated);
        Ok(())
    }
}

impl Program for TokenProgram {
    fn account(&self) -> &Name {
        &self.account
    }

    #[instrument(skip(self, ctx, action), fields(action = %action.name, index = ctx.index()))]
    fn apply(&self, ctx: &ExecutionContext<'_>, action: &Action) -> Result<(), ActionFailure> {
        let result = if action.name == self.transfer_action {
            action
                .decode::<TransferArgs>()
                .map_err(TokenError::from)
                .and_then(|transfer| self.transfer(ctx, &transfer))
        } else {
            Err(TokenError::UnknownAction(action.name.clone()))
        };
        result.map_err(|err| {
            warn!(kind = ?err.kind(), code = err.code(), error = %err, "token action rejected");
            ActionFailure::from(err)
        })
    }
}
