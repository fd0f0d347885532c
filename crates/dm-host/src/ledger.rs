//! # Ledger
//!
//! Runs transactions against the registered programs.
//!
//! ## Atomicity
//!
//! Every registered table is checkpointed before the first action runs. If
//! any action (top-level or inline) fails, all checkpoints are restored and
//! the transaction leaves no trace.
//!
//! ## Ordering
//!
//! Transactions are serialized by an async mutex. Transaction time comes
//! from the clock, clamped so it never goes backwards.

use crate::config::HostConfig;
use crate::errors::{ConfigError, TransactionError};
use crate::inline::{InlineQueue, InlineTransferGateway};
use crate::token::TokenProgram;
use crate::transaction::{Transaction, TransactionReceipt};
use async_trait::async_trait;
use dm_01_manager::{InMemoryManagerTables, ManagerService};
use dm_02_posts::{InMemoryContentLog, PostsService};
use dm_telemetry::{HistogramTimer, ACTIONS_EXECUTED, TRANSACTIONS_ABORTED, TRANSACTIONS_APPLIED, TRANSACTION_DURATION};
use shared_types::{Action, Checkpoint, Clock, ExecutionContext, Name, Program, Restore, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Default limit on inline action nesting.
pub const MAX_INLINE_DEPTH: usize = 4;

/// Ledger API - inbound port of the host.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Apply `transaction` atomically.
    async fn push_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<TransactionReceipt, TransactionError>;

    /// Time of the last committed transaction.
    async fn last_commit_time(&self) -> Timestamp;
}

#[derive(Debug, Default)]
struct HostState {
    last_time: Timestamp,
    sequence: u64,
}

/// In-memory ledger.
pub struct Ledger {
    programs: HashMap<Name, Arc<dyn Program>>,
    checkpoints: Vec<Arc<dyn Checkpoint>>,
    clock: Arc<dyn Clock>,
    inline: Arc<InlineQueue>,
    max_inline_depth: usize,
    state: Mutex<HostState>,
}

impl Ledger {
    /// True if a program is deployed at `account`.
    pub fn has_program(&self, account: &Name) -> bool {
        self.programs.contains_key(account)
    }

    // `&Vec` rather than a slice: the context needs a sized view.
    #[allow(clippy::ptr_arg)]
    fn execute(
        &self,
        actions: &Vec<Action>,
        now: Timestamp,
    ) -> Result<usize, TransactionError> {
        let mut inline_actions = 0;
        for (index, action) in actions.iter().enumerate() {
            inline_actions += self.run_action(actions, index, action, now, 0)?;
        }
        Ok(inline_actions)
    }

    /// Run one action and, depth-first, the inline actions it queued.
    /// Returns the number of inline actions executed.
    #[allow(clippy::ptr_arg)]
    fn run_action(
        &self,
        actions: &Vec<Action>,
        index: usize,
        action: &Action,
        now: Timestamp,
        depth: usize,
    ) -> Result<usize, TransactionError> {
        let program = self
            .programs
            .get(&action.account)
            .ok_or_else(|| TransactionError::UnknownProgram {
                index,
                account: action.account.clone(),
            })?;

        let ctx = ExecutionContext::new(
            program.account().clone(),
            index,
            now,
            &action.authorization,
            actions,
        );
        program
            .apply(&ctx, action)
            .map_err(|failure| TransactionError::Aborted {
                index,
                account: action.account.clone(),
                action: action.name.clone(),
                failure,
            })?;
        ACTIONS_EXECUTED
            .with_label_values(&[action.account.as_str(), action.name.as_str()])
            .inc();

        let mut executed = 0;
        for inline in self.inline.drain() {
            if depth + 1 > self.max_inline_depth {
                return Err(TransactionError::InlineDepthExceeded {
                    index,
                    max_depth: self.max_inline_depth,
                });
            }
            if inline.authorization.iter().any(|auth| auth != program.account()) {
                return Err(TransactionError::InlineAuthorization {
                    index,
                    sender: program.account().clone(),
                });
            }
            debug!(index, depth = depth + 1, action = %inline.id(), "running inline action");
            executed += 1 + self.run_action(actions, index, &inline, now, depth + 1)?;
        }
        Ok(executed)
    }
}

#[async_trait]
impl LedgerApi for Ledger {
    #[instrument(skip(self, transaction), fields(actions = transaction.len()))]
    async fn push_transaction(
        &self,
        transaction: Transaction,
    ) -> Result<TransactionReceipt, TransactionError> {
        if transaction.is_empty() {
            TRANSACTIONS_ABORTED
                .with_label_values(&[TransactionError::Empty.kind().as_str()])
                .inc();
            return Err(TransactionError::Empty);
        }

        let mut state = self.state.lock().await;
        let _timer = HistogramTimer::new(&TRANSACTION_DURATION);
        let now = self.clock.now().max(state.last_time);

        let saved: Vec<Box<dyn Restore>> =
            self.checkpoints.iter().map(|c| c.checkpoint()).collect();
        self.inline.clear();

        match self.execute(&transaction.actions, now) {
            Ok(inline_actions) => {
                state.last_time = now;
                state.sequence += 1;
                TRANSACTIONS_APPLIED.inc();
                info!(
                    sequence = state.sequence,
                    time = %now,
                    inline_actions,
                    "transaction committed"
                );
                Ok(TransactionReceipt {
                    sequence: state.sequence,
                    executed_at: now,
                    actions: transaction.len(),
                    inline_actions,
                })
            }
            Err(err) => {
                for snapshot in saved {
                    snapshot.restore();
                }
                self.inline.clear();
                TRANSACTIONS_ABORTED
                    .with_label_values(&[err.kind().as_str()])
                    .inc();
                warn!(kind = ?err.kind(), code = err.code(), error = %err, "transaction rolled back");
                Err(err)
            }
        }
    }

    async fn last_commit_time(&self) -> Timestamp {
        self.state.lock().await.last_time
    }
}

/// Assembles a `Ledger`.
pub struct LedgerBuilder {
    programs: HashMap<Name, Arc<dyn Program>>,
    checkpoints: Vec<Arc<dyn Checkpoint>>,
    clock: Arc<dyn Clock>,
    inline: Arc<InlineQueue>,
    max_inline_depth: usize,
}

impl LedgerBuilder {
    /// Empty ledger driven by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            programs: HashMap::new(),
            checkpoints: Vec::new(),
            clock,
            inline: Arc::new(InlineQueue::new()),
            max_inline_depth: MAX_INLINE_DEPTH,
        }
    }

    /// Queue programs use to send inline actions.
    pub fn inline_queue(&self) -> Arc<InlineQueue> {
        Arc::clone(&self.inline)
    }

    /// Deploy `program` at its account. A later program at the same
    /// account replaces the earlier one.
    #[must_use]
    pub fn program(mut self, program: Arc<dyn Program>) -> Self {
        self.programs.insert(program.account().clone(), program);
        self
    }

    /// Include a table in transaction rollback.
    #[must_use]
    pub fn checkpoint(mut self, table: Arc<dyn Checkpoint>) -> Self {
        self.checkpoints.push(table);
        self
    }

    /// Include several tables in transaction rollback.
    #[must_use]
    pub fn checkpoints(mut self, tables: impl IntoIterator<Item = Arc<dyn Checkpoint>>) -> Self {
        self.checkpoints.extend(tables);
        self
    }

    /// Override the inline nesting limit.
    #[must_use]
    pub fn max_inline_depth(mut self, depth: usize) -> Self {
        self.max_inline_depth = depth;
        self
    }

    /// Finish.
    pub fn build(self) -> Ledger {
        Ledger {
            programs: self.programs,
            checkpoints: self.checkpoints,
            clock: self.clock,
            inline: self.inline,
            max_inline_depth: self.max_inline_depth,
            state: Mutex::new(HostState::default()),
        }
    }

    /// Wire the manager, posts and token programs as `config` describes.
    pub fn from_config(config: &HostConfig, clock: Arc<dyn Clock>) -> Result<Deployment, ConfigError> {
        let builder = Self::new(clock);
        let manager_config = config.manager_config();

        let token = Arc::new(TokenProgram::new(
            manager_config.token_account.clone(),
            manager_config.transfer_action.clone(),
            config.token_symbol(),
        ));

        let tables = InMemoryManagerTables::new();
        let gateway = InlineTransferGateway::new(
            builder.inline_queue(),
            manager_config.token_account.clone(),
            manager_config.transfer_action.clone(),
        );
        let manager = Arc::new(ManagerService::new(
            manager_config,
            tables.tables(),
            Arc::new(gateway),
        )?);

        let content = InMemoryContentLog::new();
        let posts = Arc::new(PostsService::new(
            config.posts_config(),
            Arc::new(content.clone()),
        ));

        let ledger = builder
            .program(manager.clone())
            .program(posts)
            .program(token.clone())
            .checkpoints(tables.checkpoints())
            .checkpoint(content.checkpoint_handle())
            .checkpoint(token.checkpoint_handle())
            .build();

        info!(
            manager = %config.manager.account,
            posts = %config.posts.account,
            token = %config.manager.token_account,
            "deployment wired"
        );
        Ok(Deployment {
            ledger,
            manager,
            content,
            token,
        })
    }
}

/// A wired deployment: the ledger plus handles for queries and genesis.
pub struct Deployment {
    /// The ledger.
    pub ledger: Ledger,
    /// Manager program, for read queries.
    pub manager: Arc<ManagerService>,
    /// Accepted content.
    pub content: InMemoryContentLog,
    /// Token program, for balances and issuance.
    pub token: Arc<TokenProgram>,
}
