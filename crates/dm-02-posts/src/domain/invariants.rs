//! # Domain Invariants
//!
//! Field predicates of a content submission, checked in a fixed order so
//! the first violated bound is the one reported.

use super::entities::ContentRecord;
use super::errors::FieldViolation;
use super::value_objects::ContentLimits;

/// Invariant: `min < len < max`.
pub fn invariant_strictly_between(len: usize, min: usize, max: usize) -> bool {
    len > min && len < max
}

/// Check every field of `record` against `limits`.
pub fn check_fields(record: &ContentRecord, limits: &ContentLimits) -> Result<(), FieldViolation> {
    let title = record.title.len();
    if !invariant_strictly_between(title, limits.title_min, limits.title_max) {
        return Err(FieldViolation::TitleLength {
            len: title,
            min: limits.title_min,
            max: limits.title_max,
        });
    }

    let uri = record.uri.len();
    if !invariant_strictly_between(uri, limits.uri_min, limits.uri_max) {
        return Err(FieldViolation::UriLength {
            len: uri,
            min: limits.uri_min,
            max: limits.uri_max,
        });
    }
    if !record.uri.starts_with(&limits.uri_prefix) {
        return Err(FieldViolation::UriScheme {
            prefix: limits.uri_prefix.clone(),
        });
    }

    if record.size == 0 {
        return Err(FieldViolation::ZeroSize);
    }

    if record.content_type.len() >= limits.content_type_max {
        return Err(FieldViolation::ContentTypeLength {
            len: record.content_type.len(),
            max: limits.content_type_max,
        });
    }

    if record.description.len() >= limits.description_max {
        return Err(FieldViolation::DescriptionLength {
            len: record.description.len(),
            max: limits.description_max,
        });
    }
    Ok(())
}
