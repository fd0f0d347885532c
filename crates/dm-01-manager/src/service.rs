//! # Manager Service
//!
//! Wires the registry, escrow, cadence and shape rules to the manager's
//! tables and payment collaborator, and dispatches ledger actions to them.
//!
//! ## Failure Semantics
//!
//! Every operation either succeeds or returns an error. Writes made before
//! the error are discarded by the host together with the rest of the
//! transaction, so operations never undo their own partial writes.

use crate::algorithms::{
    advance_cadence, check_close_allowed, check_no_payment_slot, check_nothing_after_payment,
    check_refund_unlocked, check_submission_precedes, check_validator_position,
    expect_deposit_transfer,
};
use crate::domain::{
    BlacklistEntry, CadenceRecord, ConfigError, Deposit, DepositKey, ManagerConfig, ManagerError,
    PostPath, WhitelistEntry,
};
use crate::ports::inbound::{
    action_names, ManagerApi, RefundArgs, SeizeDepositArgs, UpsertBlacklistArgs,
    UpsertWhitelistArgs, UserArgs,
};
use crate::ports::outbound::{ManagerTables, PaymentGateway};
use shared_types::{
    Action, ActionFailure, Asset, ExecutionContext, Name, Program, Timestamp, TransferArgs,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The manager program.
pub struct ManagerService {
    config: ManagerConfig,
    tables: ManagerTables,
    payments: Arc<dyn PaymentGateway>,
}

impl ManagerService {
    /// Create the service after validating `config`.
    pub fn new(
        config: ManagerConfig,
        tables: ManagerTables,
        payments: Arc<dyn PaymentGateway>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            tables,
            payments,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    fn require_admin(&self, ctx: &ExecutionContext<'_>) -> Result<(), ManagerError> {
        ctx.require_auth(&self.config.admin)?;
        Ok(())
    }

    fn create_deposit(
        &self,
        user: &Name,
        created_at: Timestamp,
        quantity: Asset,
    ) -> Result<(), ManagerError> {
        let key = DepositKey::new(user.clone(), created_at);
        if self.tables.deposits.contains(&key) {
            return Err(ManagerError::DuplicateDeposit {
                user: user.clone(),
                time: created_at,
            });
        }
        info!(user = %user, time = %created_at, quantity = %quantity, "deposit created");
        self.tables.deposits.insert(
            key,
            Deposit {
                created_at,
                quantity,
            },
        );
        Ok(())
    }

    fn dispatch(&self, ctx: &ExecutionContext<'_>, action: &Action) -> Result<(), ManagerError> {
        match action.name.as_str() {
            action_names::UPSERT_WHITELIST => {
                let args: UpsertWhitelistArgs = action.decode()?;
                self.upsert_whitelist(ctx, args.user, args.display_name)
            }
            action_names::ERASE_WHITELIST => {
                let args: UserArgs = action.decode()?;
                self.erase_whitelist(ctx, &args.user)
            }
            action_names::UPSERT_BLACKLIST => {
                let args: UpsertBlacklistArgs = action.decode()?;
                self.upsert_blacklist(ctx, args.user, args.time)
            }
            action_names::ERASE_BLACKLIST => {
                let args: UserArgs = action.decode()?;
                self.erase_blacklist(ctx, &args.user)
            }
            action_names::SEIZE_DEPOSIT => {
                let args: SeizeDepositArgs = action.decode()?;
                self.seize_deposit(ctx, &args.user, args.time, &args.reason)
            }
            action_names::REFUND => {
                let args: RefundArgs = action.decode()?;
                self.refund(ctx, &args.user, args.deposit_time)
            }
            action_names::CLOSE_USER => {
                let args: UserArgs = action.decode()?;
                self.close_user(ctx, &args.user)
            }
            action_names::VALIDATE_POST => {
                let args: UserArgs = action.decode()?;
                self.validate_post(ctx, &args.user).map(|_| ())
            }
            _ => Err(ManagerError::UnknownAction(action.name.clone())),
        }
    }
}

impl ManagerApi for ManagerService {
    fn upsert_whitelist(
        &self,
        ctx: &ExecutionContext<'_>,
        user: Name,
        display_name: String,
    ) -> Result<(), ManagerError> {
        self.require_admin(ctx)?;
        info!(user = %user, display_name = %display_name, "whitelist upserted");
        self.tables.whitelist.insert(
            user.clone(),
            WhitelistEntry { user, display_name },
        );
        Ok(())
    }

    fn erase_whitelist(&self, ctx: &ExecutionContext<'_>, user: &Name) -> Result<(), ManagerError> {
        self.require_admin(ctx)?;
        self.tables
            .whitelist
            .remove(user)
            .ok_or_else(|| ManagerError::WhitelistEntryNotFound(user.clone()))?;
        info!(user = %user, "whitelist entry erased");
        Ok(())
    }

    fn upsert_blacklist(
        &self,
        ctx: &ExecutionContext<'_>,
        user: Name,
        time: Timestamp,
    ) -> Result<(), ManagerError> {
        self.require_admin(ctx)?;
        info!(user = %user, time = %time, "blacklist upserted");
        self.tables
            .blacklist
            .insert(user.clone(), BlacklistEntry { user, time });
        Ok(())
    }

    fn erase_blacklist(&self, ctx: &ExecutionContext<'_>, user: &Name) -> Result<(), ManagerError> {
        self.require_admin(ctx)?;
        self.tables
            .blacklist
            .remove(user)
            .ok_or_else(|| ManagerError::BlacklistEntryNotFound(user.clone()))?;
        info!(user = %user, "blacklist entry erased");
        Ok(())
    }

    fn seize_deposit(
        &self,
        ctx: &ExecutionContext<'_>,
        user: &Name,
        time: Timestamp,
        reason: &str,
    ) -> Result<(), ManagerError> {
        self.require_admin(ctx)?;
        let deposit = self
            .tables
            .deposits
            .remove(&DepositKey::new(user.clone(), time))
            .ok_or_else(|| ManagerError::DepositNotFound {
                user: user.clone(),
                time,
            })?;
        info!(
            user = %user,
            time = %time,
            quantity = %deposit.quantity,
            reason,
            "deposit seized"
        );
        Ok(())
    }

    fn refund(
        &self,
        ctx: &ExecutionContext<'_>,
        user: &Name,
        deposit_time: Timestamp,
    ) -> Result<(), ManagerError> {
        ctx.require_auth(user)?;
        check_refund_unlocked(deposit_time, ctx.now(), self.config.refund_delay)?;
        if self.tables.blacklist.contains(user) {
            return Err(ManagerError::Blacklisted(user.clone()));
        }

        let key = DepositKey::new(user.clone(), deposit_time);
        let deposit = self
            .tables
            .deposits
            .get(&key)
            .ok_or_else(|| ManagerError::DepositNotFound {
                user: user.clone(),
                time: deposit_time,
            })?;

        self.payments.transfer(TransferArgs {
            from: self.config.account.clone(),
            to: user.clone(),
            quantity: deposit.quantity.clone(),
            memo: String::new(),
        })?;
        self.tables.deposits.remove(&key);
        info!(user = %user, time = %deposit_time, quantity = %deposit.quantity, "deposit refunded");
        Ok(())
    }

    fn close_user(&self, ctx: &ExecutionContext<'_>, user: &Name) -> Result<(), ManagerError> {
        ctx.require_auth(user)?;
        let record = self
            .tables
            .cadence
            .get(user)
            .ok_or_else(|| ManagerError::CadenceRecordNotFound(user.clone()))?;
        check_close_allowed(&record, ctx.now(), self.config.post_min_delay)?;
        self.tables.cadence.remove(user);
        info!(user = %user, "user info closed");
        Ok(())
    }

    fn validate_post(
        &self,
        ctx: &ExecutionContext<'_>,
        user: &Name,
    ) -> Result<PostPath, ManagerError> {
        ctx.require_auth(user)?;
        let tx = ctx.transaction();
        check_submission_precedes(tx, &self.config)?;
        check_validator_position(ctx.index(), &self.config)?;

        if self.tables.blacklist.contains(user) {
            return Err(ManagerError::Blacklisted(user.clone()));
        }

        let now = ctx.now();
        let record = advance_cadence(
            self.tables.cadence.get(user),
            user,
            now,
            self.config.post_min_delay,
        )?;
        self.tables.cadence.insert(user.clone(), record);

        if self.tables.whitelist.contains(user) {
            check_no_payment_slot(tx, &self.config)?;
            debug!(user = %user, "whitelisted post accepted");
            return Ok(PostPath::Exempt);
        }

        let transfer = expect_deposit_transfer(tx, user, &self.config)?;
        self.create_deposit(user, now, transfer.quantity)?;
        check_nothing_after_payment(tx, &self.config)?;
        Ok(PostPath::Deposit)
    }

    fn whitelist_entry(&self, user: &Name) -> Option<WhitelistEntry> {
        self.tables.whitelist.get(user)
    }

    fn blacklist_entry(&self, user: &Name) -> Option<BlacklistEntry> {
        self.tables.blacklist.get(user)
    }

    fn deposits_of(&self, user: &Name) -> Vec<Deposit> {
        let (from, to) = DepositKey::owner_bounds(user);
        self.tables
            .deposits
            .range(&from, &to)
            .into_iter()
            .map(|(_, deposit)| deposit)
            .collect()
    }

    fn cadence_of(&self, user: &Name) -> Option<CadenceRecord> {
        self.tables.cadence.get(user)
    }
}

impl Program for ManagerService {
    fn account(&self) -> &Name {
        &self.config.account
    }

    #[instrument(skip(self, ctx, action), fields(action = %action.name, index = ctx.index()))]
    fn apply(&self, ctx: &ExecutionContext<'_>, action: &Action) -> Result<(), ActionFailure> {
        self.dispatch(ctx, action).map_err(|err| {
            warn!(kind = ?err.kind(), code = err.code(), error = %err, "manager action rejected");
            ActionFailure::from(err)
        })
    }
}
