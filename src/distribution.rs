//! Plan building: recipient records to composed, submission-ready calls.
//!
//! All construction-time validation happens here, before any network
//! interaction, and every failure is attributed to the entry that caused it
//! rather than failing the whole batch anonymously.

use crate::{
    address::{AccountId32, AddressError},
    amount::{self, AmountError},
    calls::Call,
    chunk::{self, ChunkError},
    recipients::{Recipient, VestedRecipient},
    vesting::{self, ScheduleError},
};
use num_bigint::BigUint;
use serde::Serialize;
use tracing::info;

/// A single entry's construction-time failure.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// The recipient's address did not decode.
    #[error(transparent)]
    Address(#[from] AddressError),
    /// The recipient's amount did not convert.
    #[error(transparent)]
    Amount(#[from] AmountError),
    /// The recipient's vesting schedule was rejected.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Errors produced while building a distribution plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// An entry failed validation; the run aborts before submission.
    #[error("recipient {index} (`{address}`): {source}")]
    Entry {
        /// Zero-based position in the input list.
        index: usize,
        /// Address as it appeared in the input.
        address: String,
        /// What went wrong.
        #[source]
        source: EntryError,
    },
    /// The chunk size was invalid.
    #[error(transparent)]
    Chunk(#[from] ChunkError),
}

/// A fully composed, submission-ready distribution.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionPlan {
    /// Composed calls in submission order, one per chunk.
    pub composed: Vec<Call>,
    /// Number of recipients covered by the plan.
    pub recipients: usize,
    /// Sum of all transferred and locked amounts, minimal denomination.
    #[serde(with = "crate::serde::biguint_string")]
    pub total_minimal: BigUint,
    /// Chunk size the plan was split with.
    pub chunk_size: usize,
}

/// Builds one `balances.transfer` call per recipient, in input order.
pub fn build_transfer_calls(
    recipients: &[Recipient],
    decimals: u32,
) -> Result<Vec<Call>, PlanError> {
    recipients
        .iter()
        .enumerate()
        .map(|(index, recipient)| {
            entry(index, &recipient.address, || {
                let dest: AccountId32 = recipient.address.parse()?;
                let value = amount::to_minimal_denomination(&recipient.amount, decimals)?;
                Ok(Call::Transfer { dest, value })
            })
        })
        .collect()
}

/// Builds one vested transfer per recipient, in input order.
///
/// With `source` set, the privileged `forceVestedTransfer` variant is built
/// and the composed chunks will require sudo wrapping.
pub fn build_vested_transfer_calls(
    recipients: &[VestedRecipient],
    decimals: u32,
    block_time_secs: u64,
    source: Option<&AccountId32>,
) -> Result<Vec<Call>, PlanError> {
    recipients
        .iter()
        .enumerate()
        .map(|(index, recipient)| {
            entry(index, &recipient.address, || {
                let dest: AccountId32 = recipient.address.parse()?;
                let locked = amount::to_minimal_denomination(&recipient.amount, decimals)?;
                let schedule = vesting::compute_schedule(
                    recipient.starting_block,
                    locked,
                    recipient.vested_months,
                    block_time_secs,
                )?;
                Ok(match source {
                    Some(source) => {
                        Call::ForceVestedTransfer { source: *source, dest, schedule }
                    }
                    None => Call::VestedTransfer { dest, schedule },
                })
            })
        })
        .collect()
}

/// Splits `calls` into chunks and composes each as an atomic batch,
/// sudo-wrapped when requested or when any inner call requires it.
pub fn compose_plan(
    calls: Vec<Call>,
    chunk_size: usize,
    sudo: bool,
) -> Result<DistributionPlan, PlanError> {
    let recipients = calls.len();
    let total_minimal = calls.iter().map(call_total).sum();

    let composed: Vec<Call> = chunk::split_into_chunks(calls, chunk_size)?
        .into_iter()
        .map(|chunk| {
            let batch = Call::batch_all(chunk);
            if sudo || batch.requires_sudo() { Call::sudo(batch) } else { batch }
        })
        .collect();

    info!(
        recipients,
        chunks = composed.len(),
        total = %total_minimal,
        "distribution plan composed"
    );
    Ok(DistributionPlan { composed, recipients, total_minimal, chunk_size })
}

/// Sum of all amounts moved or locked by a call, through wrappers.
fn call_total(call: &Call) -> BigUint {
    match call {
        Call::Transfer { value, .. } => value.clone(),
        Call::VestedTransfer { schedule, .. }
        | Call::ForceVestedTransfer { schedule, .. } => schedule.locked.clone(),
        Call::ForceUpdateSchedules { schedules, .. } => {
            schedules.iter().map(|schedule| schedule.locked.clone()).sum()
        }
        Call::BatchAll { calls } => calls.iter().map(call_total).sum(),
        Call::Sudo { call } => call_total(call),
    }
}

fn entry<F>(index: usize, address: &str, build: F) -> Result<Call, PlanError>
where
    F: FnOnce() -> Result<Call, EntryError>,
{
    build().map_err(|source| PlanError::Entry {
        index,
        address: address.to_owned(),
        source,
    })
}
