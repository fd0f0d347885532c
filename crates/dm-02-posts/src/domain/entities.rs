//! # Domain Entities

use super::value_objects::ContentLimits;
use serde::{Deserialize, Serialize};
use shared_types::{ActionId, Name, Timestamp};

/// Argument of the `post` action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Submitting user.
    pub user: Name,
    /// Content size in bytes.
    pub size: u64,
    /// Title.
    pub title: String,
    /// Magnet link.
    pub uri: String,
    /// Content type label.
    pub content_type: String,
    /// Free text description.
    pub description: String,
}

/// A submission accepted by the posts program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredContent {
    /// The submission.
    pub record: ContentRecord,
    /// Transaction time of acceptance.
    pub accepted_at: Timestamp,
}

/// Posts program configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsConfig {
    /// Account the posts program runs as.
    pub account: Name,
    /// The only action the program accepts.
    pub post_action: Name,
    /// Manager program account.
    pub manager_account: Name,
    /// Manager validation action.
    pub validate_action: Name,
    /// Absolute position of the manager validation action.
    pub validate_index: usize,
    /// Field bounds.
    pub limits: ContentLimits,
}

impl PostsConfig {
    /// Identity of the validation action that must accompany every post.
    pub fn validate_action_id(&self) -> ActionId {
        ActionId {
            account: self.manager_account.clone(),
            name: self.validate_action.clone(),
        }
    }
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            account: Name::from_static("dmcy.posts"),
            post_action: Name::from_static("post"),
            manager_account: Name::from_static("dmcy.manager"),
            validate_action: Name::from_static("validatepost"),
            validate_index: 1,
            limits: ContentLimits::default(),
        }
    }
}
