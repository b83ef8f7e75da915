//! Run-scoped nonce sequencing.
//!
//! The nonce counter is the only shared mutable state in a run. It is an
//! explicit value owned by the sequencer for the run's lifetime, never a
//! process-wide global, and needs no lock because submissions are strictly
//! sequential.

use crate::{
    address::AccountId32,
    client::{ClientError, LedgerClient},
};

/// The per-account nonce sequence for a single run.
///
/// Initialized from the account's on-chain nonce and advanced by exactly one
/// per signed extrinsic. Submitting out of this order risks nonce collision
/// or out-of-order inclusion, which the ledger rejects.
#[derive(Debug)]
pub struct NonceSequence {
    account: AccountId32,
    next: u64,
}

impl NonceSequence {
    /// Fetches the account's current on-chain nonce and starts the sequence
    /// there.
    pub async fn fetch<C: LedgerClient>(
        client: &C,
        account: AccountId32,
    ) -> Result<Self, ClientError> {
        let next = client.account_nonce(&account).await?;
        Ok(Self { account, next })
    }

    /// Starts a sequence at a known nonce.
    pub fn starting_at(account: AccountId32, next: u64) -> Self {
        Self { account, next }
    }

    /// The account this sequence belongs to.
    pub fn account(&self) -> &AccountId32 {
        &self.account
    }

    /// The nonce the next extrinsic will be signed with.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Returns the next nonce and advances the sequence.
    pub fn advance(&mut self) -> u64 {
        let nonce = self.next;
        self.next += 1;
        nonce
    }
}
