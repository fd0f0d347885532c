//! # Action Envelope
//!
//! The unit of work inside an atomic transaction.
//!
//! ## Properties
//!
//! - **Identity**: `account` (the program that executes it) and `name`.
//! - **Authority**: `authorization` lists the accounts whose permission the
//!   host has verified for this action. It is the sole source of caller
//!   identity; payloads are never trusted for it.
//! - **Lazy payload**: `data` stays encoded until a program asks for it, so
//!   identity checks on siblings never pay for a decode.

use crate::entities::Name;
use crate::errors::CodecError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `account::name` pair identifying what an action invokes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId {
    /// Target program account.
    pub account: Name,
    /// Action name within that program.
    pub name: Name,
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.account, self.name)
    }
}

/// A single action of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Program that executes the action.
    pub account: Name,
    /// Action name.
    pub name: Name,
    /// Verified authorities carried by the action.
    pub authorization: Vec<Name>,
    /// bincode-encoded arguments.
    pub data: Vec<u8>,
}

impl Action {
    /// Build an action, encoding `args` as its payload.
    pub fn new<T: Serialize>(
        account: Name,
        name: Name,
        authorization: Vec<Name>,
        args: &T,
    ) -> Result<Self, CodecError> {
        let data = bincode::serialize(args).map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(Self {
            account,
            name,
            authorization,
            data,
        })
    }

    /// Decode the payload as `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        bincode::deserialize(&self.data).map_err(|e| CodecError::Decode {
            action: self.id().to_string(),
            reason: e.to_string(),
        })
    }

    /// True if this action is `account::name`.
    pub fn is(&self, account: &Name, name: &Name) -> bool {
        &self.account == account && &self.name == name
    }

    /// Identity of the action.
    pub fn id(&self) -> ActionId {
        ActionId {
            account: self.account.clone(),
            name: self.name.clone(),
        }
    }
}
