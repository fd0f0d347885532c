//! Deployment fixture shared by the integration and exploit suites.

use dm_01_manager::{action_names as manager_actions, ManagerApi};
use dm_02_posts::{action_names as posts_actions, ContentRecord};
use dm_host::{
    Deployment, HostConfig, LedgerApi, LedgerBuilder, Transaction, TransactionError,
    TransactionReceipt,
};
use serde::Serialize;
use shared_types::{Asset, Clock, ManualClock, Name, Timestamp, TransferArgs};
use std::sync::Arc;
use std::time::Duration;

/// Start of every test timeline: 2023-11-14T22:13:20Z.
pub const GENESIS: Timestamp = Timestamp::from_secs(1_700_000_000);

/// Balance issued to every funded user.
pub const FUNDING: &str = "100.0000 TLOS";

/// Parse a name literal.
pub fn name(s: &str) -> Name {
    match Name::new(s) {
        Ok(name) => name,
        Err(err) => panic!("bad name literal {s:?}: {err}"),
    }
}

/// Parse an asset literal.
pub fn asset(s: &str) -> Asset {
    match s.parse() {
        Ok(asset) => asset,
        Err(err) => panic!("bad asset literal {s:?}: {err}"),
    }
}

/// A submission that passes every field check.
pub fn content(user: &Name) -> ContentRecord {
    ContentRecord {
        user: user.clone(),
        size: 734_003_200,
        title: "Debian 12.4 netinst amd64".to_string(),
        uri: "magnet:?xt=urn:btih:c9e15763f722f23e98a29decdfae341b98d53056&dn=debian".to_string(),
        content_type: "iso".to_string(),
        description: "Official network installer image.".to_string(),
    }
}

/// Deployment on a manual clock.
pub struct Harness {
    /// Wired programs and ledger.
    pub deployment: Deployment,
    /// Clock driving transaction time.
    pub clock: Arc<ManualClock>,
    /// Resolved configuration.
    pub config: HostConfig,
}

impl Harness {
    /// Default deployment.
    pub fn new() -> Self {
        Self::with_config(HostConfig::default())
    }

    /// Deployment from `config`.
    pub fn with_config(config: HostConfig) -> Self {
        let clock = Arc::new(ManualClock::new(GENESIS));
        let deployment = match LedgerBuilder::from_config(&config, clock.clone()) {
            Ok(deployment) => deployment,
            Err(err) => panic!("deployment failed: {err}"),
        };
        Self {
            deployment,
            clock,
            config,
        }
    }

    /// Manager account.
    pub fn manager(&self) -> Name {
        self.config.manager.account.clone()
    }

    /// Issue `FUNDING` to each user.
    pub fn fund(&self, users: &[&Name]) {
        for user in users {
            if let Err(err) = self.deployment.token.issue(user, &asset(FUNDING)) {
                panic!("funding {user} failed: {err}");
            }
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: Duration) {
        self.clock.advance(delta);
    }

    /// Current clock time.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Push a transaction through the ledger.
    pub async fn push(&self, tx: Transaction) -> Result<TransactionReceipt, TransactionError> {
        self.deployment.ledger.push_transaction(tx).await
    }

    /// Token balance of `owner`.
    pub fn balance(&self, owner: &Name) -> Asset {
        self.deployment.token.balance_of(owner)
    }

    /// Number of deposits escrowed for `user`.
    pub fn deposits(&self, user: &Name) -> usize {
        self.deployment.manager.deposits_of(user).len()
    }

    /// Accepted submissions by `user`.
    pub fn posts_by(&self, user: &Name) -> usize {
        self.deployment.content.by_user(user).len()
    }

    /// `post` action of `record`, authorized by its user.
    pub fn post(&self, tx: Transaction, record: &ContentRecord) -> Transaction {
        let user = record.user.clone();
        self.action(
            tx,
            self.config.posts.account.clone(),
            posts_actions::POST,
            vec![user],
            record,
        )
    }

    /// `validatepost` action for `user`.
    pub fn validate(&self, tx: Transaction, user: &Name) -> Transaction {
        self.action(
            tx,
            self.manager(),
            manager_actions::VALIDATE_POST,
            vec![user.clone()],
            &dm_01_manager::UserArgs { user: user.clone() },
        )
    }

    /// Token `transfer` action authorized by `transfer.from`.
    pub fn transfer(&self, tx: Transaction, transfer: &TransferArgs) -> Transaction {
        self.action(
            tx,
            self.config.manager.token_account.clone(),
            self.config.manager.transfer_action.as_str(),
            vec![transfer.from.clone()],
            transfer,
        )
    }

    /// The exact deposit transfer `user` owes.
    pub fn deposit_transfer(&self, user: &Name) -> TransferArgs {
        TransferArgs {
            from: user.clone(),
            to: self.manager(),
            quantity: self.config.manager.deposit.clone(),
            memo: "deposit".to_string(),
        }
    }

    /// `[post, validatepost, transfer]` for a depositing user.
    pub fn deposit_post(&self, user: &Name) -> Transaction {
        let tx = self.post(Transaction::default(), &content(user));
        let tx = self.validate(tx, user);
        self.transfer(tx, &self.deposit_transfer(user))
    }

    /// `[post, validatepost]` for a whitelisted user.
    pub fn exempt_post(&self, user: &Name) -> Transaction {
        let tx = self.post(Transaction::default(), &content(user));
        self.validate(tx, user)
    }

    /// Single manager action authorized by `signer`.
    pub fn manager_call<T: Serialize>(&self, action: &str, signer: &Name, args: &T) -> Transaction {
        self.action(
            Transaction::default(),
            self.manager(),
            action,
            vec![signer.clone()],
            args,
        )
    }

    /// Single manager action authorized by the administrator.
    pub fn admin_call<T: Serialize>(&self, action: &str, args: &T) -> Transaction {
        let admin = self.config.manager.admin.clone();
        self.manager_call(action, &admin, args)
    }

    /// Append an arbitrary action.
    pub fn action<T: Serialize>(
        &self,
        tx: Transaction,
        account: Name,
        action: &str,
        authorization: Vec<Name>,
        args: &T,
    ) -> Transaction {
        match tx.with_action(account, name(action), authorization, args) {
            Ok(tx) => tx,
            Err(err) => panic!("encoding {action} failed: {err}"),
        }
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
