//! # Domain Value Objects

use serde::{Deserialize, Serialize};

/// Bounds on the fields of a content submission.
///
/// Lengths are byte lengths. `*_min` and `*_max` bounds on title and uri
/// are exclusive; the other maxima are exclusive upper bounds too.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLimits {
    /// Title must be longer than this.
    pub title_min: usize,
    /// Title must be shorter than this.
    pub title_max: usize,
    /// Uri must be longer than this.
    pub uri_min: usize,
    /// Uri must be shorter than this.
    pub uri_max: usize,
    /// Required uri scheme prefix.
    pub uri_prefix: String,
    /// Content type must be shorter than this.
    pub content_type_max: usize,
    /// Description must be shorter than this.
    pub description_max: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            title_min: 10,
            title_max: 200,
            uri_min: 50,
            uri_max: 2000,
            uri_prefix: "magnet:".to_string(),
            content_type_max: 50,
            description_max: 2000,
        }
    }
}
