//! Abstract ledger client consumed by the submission sequencer.
//!
//! The RPC transport, SCALE encoding, and key management live behind this
//! trait; the crate ships no concrete network client.

use crate::{address::AccountId32, calls::Call};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors surfaced by a [`LedgerClient`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The chain's metadata does not expose the requested call.
    #[error("unknown call {pallet}.{name}")]
    UnknownCall {
        /// Pallet the call was looked up in.
        pallet: String,
        /// Name of the missing call.
        name: String,
    },
    /// The signing account lacks the authority for a privileged dispatch.
    #[error("signer is not authorized for privileged dispatch")]
    Unauthorized,
    /// The ledger could not be reached or the connection was lost mid-call.
    #[error("network failure: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl ClientError {
    /// Wraps a transport-level error.
    pub fn network<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network(Box::new(err))
    }
}

/// A decoded module error, stable across metadata versions as a
/// `(section, name)` pair such as `("vesting", "AmountLow")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleError {
    /// Pallet that emitted the error.
    pub section: String,
    /// Error name within the pallet.
    pub name: String,
}

impl ModuleError {
    /// Creates a module error from its section and name.
    pub fn new(section: impl Into<String>, name: impl Into<String>) -> Self {
        Self { section: section.into(), name: name.into() }
    }
}

impl fmt::Display for ModuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.name)
    }
}

/// The ledger's post-execution report for a submitted extrinsic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum DispatchOutcome {
    /// The extrinsic was included and every call in it succeeded.
    Success,
    /// The extrinsic was included but dispatch failed; for an atomic batch
    /// the ledger has already reverted every inner call.
    #[serde(rename_all = "camelCase")]
    Failed {
        /// The decoded module error.
        error: ModuleError,
        /// For batches, the index of the inner call that interrupted
        /// execution.
        interrupted_at: Option<u32>,
    },
}

impl DispatchOutcome {
    /// Whether dispatch succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Capable of signing, submitting, and confirming extrinsics for a single
/// account, and of reporting that account's on-chain nonce.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Current on-chain nonce of `account`.
    async fn account_nonce(&self, account: &AccountId32) -> Result<u64, ClientError>;

    /// Signs `call` with the given nonce, submits it, and blocks until the
    /// ledger reports inclusion or rejection, returning the decoded outcome.
    async fn sign_and_submit(
        &self,
        call: &Call,
        nonce: u64,
    ) -> Result<DispatchOutcome, ClientError>;
}

#[async_trait]
impl<C: LedgerClient + ?Sized> LedgerClient for std::sync::Arc<C> {
    async fn account_nonce(&self, account: &AccountId32) -> Result<u64, ClientError> {
        (**self).account_nonce(account).await
    }

    async fn sign_and_submit(
        &self,
        call: &Call,
        nonce: u64,
    ) -> Result<DispatchOutcome, ClientError> {
        (**self).sign_and_submit(call, nonce).await
    }
}
