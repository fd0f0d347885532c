//! # Host Configuration
//!
//! TOML configuration for a deployment of the manager, posts and token
//! programs. Every key is optional; missing keys keep the protocol
//! defaults.
//!
//! ```toml
//! [accounts]
//! manager = "dmcy.manager"
//! admin = "dmcy.admin"
//! posts = "dmcy.posts"
//! token = "dmcy.token"
//!
//! [deposit]
//! quantity = "5.0000 TLOS"
//!
//! [timing]
//! post_min_delay_secs = 600
//! refund_delay_secs = 172800
//!
//! [content]
//! title_min = 10
//! title_max = 200
//! uri_min = 50
//! uri_max = 2000
//! uri_prefix = "magnet:"
//! content_type_max = 50
//! description_max = 2000
//!
//! [shape]
//! submit_index = 0
//! validate_index = 1
//! payment_index = 2
//! ```

use crate::errors::ConfigError;
use dm_01_manager::{ManagerConfig, TransactionShape};
use dm_02_posts::{ContentLimits, PostsConfig};
use serde::Deserialize;
use shared_types::{Asset, Name, Symbol};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    accounts: AccountsSection,
    #[serde(default)]
    deposit: DepositSection,
    #[serde(default)]
    timing: TimingSection,
    #[serde(default)]
    content: ContentSection,
    #[serde(default)]
    shape: ShapeSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AccountsSection {
    manager: Option<Name>,
    admin: Option<Name>,
    posts: Option<Name>,
    token: Option<Name>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DepositSection {
    quantity: Option<Asset>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimingSection {
    post_min_delay_secs: Option<u64>,
    refund_delay_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContentSection {
    title_min: Option<usize>,
    title_max: Option<usize>,
    uri_min: Option<usize>,
    uri_max: Option<usize>,
    uri_prefix: Option<String>,
    content_type_max: Option<usize>,
    description_max: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ShapeSection {
    submit_index: Option<usize>,
    validate_index: Option<usize>,
    payment_index: Option<usize>,
}

/// Resolved configuration of one deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostConfig {
    /// Manager program configuration.
    pub manager: ManagerConfig,
    /// Posts program configuration.
    pub posts: PostsConfig,
}

impl HostConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::from_file(file)
    }

    fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let manager_defaults = defaults.manager;
        let posts_defaults = defaults.posts;

        let manager_account = file.accounts.manager.unwrap_or(manager_defaults.account);
        let admin = file
            .accounts
            .admin
            .unwrap_or_else(|| manager_account.clone());
        let posts_account = file.accounts.posts.unwrap_or(manager_defaults.posts_account);
        let token_account = file.accounts.token.unwrap_or(manager_defaults.token_account);

        let shape_defaults = manager_defaults.shape;
        let shape = TransactionShape {
            submit_index: file.shape.submit_index.unwrap_or(shape_defaults.submit_index),
            validate_index: file
                .shape
                .validate_index
                .unwrap_or(shape_defaults.validate_index),
            payment_index: file
                .shape
                .payment_index
                .unwrap_or(shape_defaults.payment_index),
        };

        let manager = ManagerConfig {
            account: manager_account.clone(),
            admin,
            posts_account: posts_account.clone(),
            post_action: manager_defaults.post_action,
            token_account,
            transfer_action: manager_defaults.transfer_action,
            deposit: file.deposit.quantity.unwrap_or(manager_defaults.deposit),
            post_min_delay: file
                .timing
                .post_min_delay_secs
                .map(Duration::from_secs)
                .unwrap_or(manager_defaults.post_min_delay),
            refund_delay: file
                .timing
                .refund_delay_secs
                .map(Duration::from_secs)
                .unwrap_or(manager_defaults.refund_delay),
            shape,
        };
        manager.validate()?;

        let limit_defaults = posts_defaults.limits;
        let content = file.content;
        let limits = ContentLimits {
            title_min: content.title_min.unwrap_or(limit_defaults.title_min),
            title_max: content.title_max.unwrap_or(limit_defaults.title_max),
            uri_min: content.uri_min.unwrap_or(limit_defaults.uri_min),
            uri_max: content.uri_max.unwrap_or(limit_defaults.uri_max),
            uri_prefix: content.uri_prefix.unwrap_or(limit_defaults.uri_prefix),
            content_type_max: content
                .content_type_max
                .unwrap_or(limit_defaults.content_type_max),
            description_max: content
                .description_max
                .unwrap_or(limit_defaults.description_max),
        };
        if limits.title_min >= limits.title_max || limits.uri_min >= limits.uri_max {
            return Err(ConfigError::Invalid(
                "content length bounds must satisfy min < max".to_string(),
            ));
        }

        let posts = PostsConfig {
            account: posts_account,
            post_action: posts_defaults.post_action,
            manager_account,
            validate_action: posts_defaults.validate_action,
            validate_index: shape.validate_index,
            limits,
        };

        Ok(Self { manager, posts })
    }

    /// Manager program configuration.
    pub fn manager_config(&self) -> ManagerConfig {
        self.manager.clone()
    }

    /// Posts program configuration.
    pub fn posts_config(&self) -> PostsConfig {
        self.posts.clone()
    }

    /// Symbol moved by the token program: the deposit's symbol.
    pub fn token_symbol(&self) -> Symbol {
        self.manager.deposit.symbol.clone()
    }
}
