//! Strictly sequential, fail-fast submission of composed calls.
//!
//! Each composed call moves through
//! `Pending → Signed → Submitted → Included | Errored`, one call at a time
//! across the whole run. The next call is not signed until the previous one
//! is confirmed: nonce assignment is sequential and unconfirmed, so
//! overlapping submissions risk nonce collision or out-of-order inclusion,
//! which the ledger rejects.

use crate::{
    address::AccountId32,
    calls::Call,
    client::{ClientError, DispatchOutcome, LedgerClient, ModuleError},
    nonce::NonceSequence,
};
use std::{fmt, time::Duration};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Errors that halt a run at submission time.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The extrinsic was included but its dispatch failed. For an atomic
    /// batch the ledger has reverted all inner calls.
    #[error("dispatch failed: {error}")]
    Dispatch {
        /// The decoded module error.
        error: ModuleError,
        /// For batches, the inner call index that interrupted execution.
        interrupted_at: Option<u32>,
    },
    /// The client failed before an outcome could be observed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Lifecycle of a single composed call within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmissionState {
    /// Built, not yet signed.
    Pending,
    /// Signed with a run-sequential nonce.
    Signed { nonce: u64 },
    /// Handed to the ledger; awaiting inclusion or rejection.
    Submitted { nonce: u64 },
    /// Included with a successful dispatch. Terminal.
    Included { nonce: u64 },
    /// Dispatch or submission failed. Terminal; halts the run.
    Errored,
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Signed { nonce } => write!(f, "signed(nonce={nonce})"),
            Self::Submitted { nonce } => write!(f, "submitted(nonce={nonce})"),
            Self::Included { nonce } => write!(f, "included(nonce={nonce})"),
            Self::Errored => write!(f, "errored"),
        }
    }
}

/// Terminal outcome of one chunk within the run report.
#[derive(Debug)]
pub enum ChunkStatus {
    /// The chunk was included with a successful dispatch.
    Included {
        /// Nonce the extrinsic was signed with.
        nonce: u64,
    },
    /// The chunk failed; the run halted here.
    Errored(SubmitError),
    /// The chunk was never attempted because an earlier chunk failed.
    Skipped,
}

/// One entry of the sequential run log.
#[derive(Debug)]
pub struct ChunkOutcome {
    /// Position of the chunk in the composed sequence.
    pub chunk_index: usize,
    /// Terminal status of the chunk.
    pub status: ChunkStatus,
}

/// Ordered record of a whole run.
#[derive(Debug)]
pub struct RunReport {
    /// One outcome per composed call, in submission order.
    pub outcomes: Vec<ChunkOutcome>,
}

impl RunReport {
    /// Whether every chunk was included successfully.
    pub fn is_success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|outcome| matches!(outcome.status, ChunkStatus::Included { .. }))
    }

    /// The failing chunk index and error, if the run halted.
    pub fn failure(&self) -> Option<(usize, &SubmitError)> {
        self.outcomes.iter().find_map(|outcome| match &outcome.status {
            ChunkStatus::Errored(err) => Some((outcome.chunk_index, err)),
            _ => None,
        })
    }
}

/// Signs, submits, and confirms composed calls one at a time.
///
/// Owns the run's [`NonceSequence`] exclusively; no other component reads or
/// writes the nonce. Consumed by [`submit_all`](Self::submit_all), so a
/// sequencer (and with it every composed call handed to it) is used exactly
/// once.
#[derive(Debug)]
pub struct SubmissionSequencer<C> {
    client: C,
    nonces: NonceSequence,
    settle_delay: Duration,
}

impl<C: LedgerClient> SubmissionSequencer<C> {
    /// Creates a sequencer for `account`, fetching its on-chain nonce.
    pub async fn start(
        client: C,
        account: AccountId32,
        settle_delay: Duration,
    ) -> Result<Self, ClientError> {
        let nonces = NonceSequence::fetch(&client, account).await?;
        Ok(Self::with_nonces(client, nonces, settle_delay))
    }

    /// Creates a sequencer over an already-initialized nonce sequence.
    pub fn with_nonces(client: C, nonces: NonceSequence, settle_delay: Duration) -> Self {
        Self { client, nonces, settle_delay }
    }

    /// Submits every composed call in order, confirm-before-advance.
    ///
    /// Fail-fast: the first error halts the run, already-confirmed chunks
    /// stay committed, and every remaining chunk is reported as skipped.
    /// There is no retry and no skipping ahead.
    pub async fn submit_all(mut self, calls: Vec<Call>) -> RunReport {
        let total = calls.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut remaining = calls.into_iter().enumerate();

        info!(chunks = total, account = %self.nonces.account(), "starting submission run");

        for (chunk_index, call) in &mut remaining {
            match self.submit_one(chunk_index, total, call).await {
                Ok(nonce) => {
                    outcomes.push(ChunkOutcome {
                        chunk_index,
                        status: ChunkStatus::Included { nonce },
                    });
                    if chunk_index + 1 < total {
                        // Let the node's pending pool settle before reusing
                        // the account, or the next nonce may race it.
                        sleep(self.settle_delay).await;
                    }
                }
                Err(err) => {
                    error!(chunk = chunk_index, %err, "run halted");
                    outcomes.push(ChunkOutcome { chunk_index, status: ChunkStatus::Errored(err) });
                    break;
                }
            }
        }

        for (chunk_index, _) in remaining {
            warn!(chunk = chunk_index, "chunk not attempted");
            outcomes.push(ChunkOutcome { chunk_index, status: ChunkStatus::Skipped });
        }

        RunReport { outcomes }
    }

    /// Drives a single composed call to a terminal state.
    async fn submit_one(
        &mut self,
        chunk_index: usize,
        total: usize,
        call: Call,
    ) -> Result<u64, SubmitError> {
        let mut state = SubmissionState::Pending;
        debug!(chunk = chunk_index, %state, call = call.name(), "processing chunk");

        let nonce = self.nonces.advance();
        state = SubmissionState::Signed { nonce };
        debug!(chunk = chunk_index, %state, "signed");

        state = SubmissionState::Submitted { nonce };
        debug!(chunk = chunk_index, %state, "awaiting inclusion");
        let outcome = self.client.sign_and_submit(&call, nonce).await?;

        match outcome {
            DispatchOutcome::Success => {
                state = SubmissionState::Included { nonce };
                info!(
                    chunk = chunk_index,
                    of = total,
                    %state,
                    calls = call.leaf_count(),
                    "chunk included"
                );
                Ok(nonce)
            }
            DispatchOutcome::Failed { error, interrupted_at } => {
                state = SubmissionState::Errored;
                error!(chunk = chunk_index, %state, %error, interrupted_at, "dispatch failed");
                Err(SubmitError::Dispatch { error, interrupted_at })
            }
        }
    }
}
