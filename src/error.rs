//! Overarching error type.

use crate::{
    address::AddressError,
    amount::AmountError,
    chunk::ChunkError,
    client::ClientError,
    distribution::PlanError,
    recipients::LoadError,
    sequencer::SubmitError,
    vesting::ScheduleError,
};
use thiserror::Error;

/// Any error the disburser can produce, from plan building through
/// submission.
#[derive(Debug, Error)]
pub enum DisburseError {
    /// Amount conversion failed.
    #[error(transparent)]
    Amount(#[from] AmountError),
    /// Vesting schedule derivation failed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    /// Chunk splitting failed.
    #[error(transparent)]
    Chunk(#[from] ChunkError),
    /// An address did not decode.
    #[error(transparent)]
    Address(#[from] AddressError),
    /// Plan building failed for a specific entry.
    #[error(transparent)]
    Plan(#[from] PlanError),
    /// A recipient list could not be read or written.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The ledger client failed.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// A submission failed and halted the run.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}
