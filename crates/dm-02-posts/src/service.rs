//! # Posts Service
//!
//! Accepts content submissions that travel together with the manager's
//! validation in one transaction.

use crate::domain::{check_fields, ContentRecord, PostsConfig, PostsError};
use crate::ports::inbound::PostsApi;
use crate::ports::outbound::ContentSink;
use shared_types::{Action, ActionFailure, ExecutionContext, Name, Program};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// The posts program.
pub struct PostsService {
    config: PostsConfig,
    sink: Arc<dyn ContentSink>,
}

impl PostsService {
    /// Create the service.
    pub fn new(config: PostsConfig, sink: Arc<dyn ContentSink>) -> Self {
        Self { config, sink }
    }

    /// Active configuration.
    pub fn config(&self) -> &PostsConfig {
        &self.config
    }

    fn check_validation_follows(&self, ctx: &ExecutionContext<'_>) -> Result<(), PostsError> {
        let index = self.config.validate_index;
        let found = ctx.transaction().action(index);
        match found {
            Some(action)
                if action.is(&self.config.manager_account, &self.config.validate_action) =>
            {
                debug!(index, "manager validation found");
                Ok(())
            }
            _ => Err(PostsError::WrongFollowingAction {
                index,
                expected: self.config.validate_action_id(),
                found: found.map(|a| a.id()),
            }),
        }
    }

    fn dispatch(&self, ctx: &ExecutionContext<'_>, action: &Action) -> Result<(), PostsError> {
        if action.name != self.config.post_action {
            return Err(PostsError::UnknownAction(action.name.clone()));
        }
        let record: ContentRecord = action.decode()?;
        self.submit(ctx, record)
    }
}

impl PostsApi for PostsService {
    fn submit(&self, ctx: &ExecutionContext<'_>, record: ContentRecord) -> Result<(), PostsError> {
        ctx.require_auth(&record.user)?;
        self.check_validation_follows(ctx)?;
        check_fields(&record, &self.config.limits)?;
        self.sink.accept(record, ctx.now())?;
        Ok(())
    }
}

impl Program for PostsService {
    fn account(&self) -> &Name {
        &self.config.account
    }

    #[instrument(skip(self, ctx, action), fields(action = %action.name, index = ctx.index()))]
    fn apply(&self, ctx: &ExecutionContext<'_>, action: &Action) -> Result<(), ActionFailure> {
        self.dispatch(ctx, action).map_err(|err| {
            warn!(kind = ?err.kind(), code = err.code(), error = %err, "post rejected");
            ActionFailure::from(err)
        })
    }
}
