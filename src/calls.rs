//! The closed set of ledger calls this tool can compose.
//!
//! The supported calls are a small, fixed set, so they are enumerated as a
//! tagged union instead of being looked up by `(pallet, name)` strings at
//! runtime. Composition is pure; nothing here touches the network.

use crate::{address::AccountId32, vesting::VestingSchedule};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// A ledger-recognized operation, immutable once built.
///
/// Serialized with a `method` tag; the tag cannot be named `call` since the
/// sudo wrapper carries its inner call under that key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Call {
    /// `balances.transfer`: move `value` minimal units to `dest`.
    #[serde(rename_all = "camelCase")]
    Transfer {
        /// Destination account.
        dest: AccountId32,
        /// Amount in minimal denomination.
        #[serde(with = "crate::serde::biguint_string")]
        value: BigUint,
    },
    /// `vesting.vestedTransfer`: transfer with a linear unlock schedule.
    #[serde(rename_all = "camelCase")]
    VestedTransfer {
        /// Destination account.
        dest: AccountId32,
        /// Unlock schedule for the transferred amount.
        schedule: VestingSchedule,
    },
    /// `vesting.forceVestedTransfer`: vested transfer from an arbitrary
    /// source account. Privileged.
    #[serde(rename_all = "camelCase")]
    ForceVestedTransfer {
        /// Account the funds are taken from.
        source: AccountId32,
        /// Destination account.
        dest: AccountId32,
        /// Unlock schedule for the transferred amount.
        schedule: VestingSchedule,
    },
    /// `vesting.forceUpdateSchedules`: replace an account's schedules.
    /// Privileged.
    #[serde(rename_all = "camelCase")]
    ForceUpdateSchedules {
        /// Account whose schedules are replaced.
        who: AccountId32,
        /// The new set of schedules.
        schedules: Vec<VestingSchedule>,
    },
    /// `utility.batchAll`: dispatch all inner calls atomically. If any inner
    /// call fails the whole batch is reverted and the ledger reports the
    /// interrupting index with its module error.
    BatchAll {
        /// Inner calls, dispatched in order.
        calls: Vec<Call>,
    },
    /// `sudo.sudo`: dispatch the inner call with elevated authority. Fails
    /// at dispatch time, not composition time, if the signer is not the
    /// sudo key.
    Sudo {
        /// The wrapped call.
        call: Box<Call>,
    },
}

impl Call {
    /// Wraps a chunk of calls into a single atomic batch.
    pub fn batch_all(calls: Vec<Call>) -> Self {
        Self::BatchAll { calls }
    }

    /// Wraps a call for privileged execution.
    pub fn sudo(call: Call) -> Self {
        Self::Sudo { call: Box::new(call) }
    }

    /// Pallet the call belongs to.
    pub fn pallet(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "balances",
            Self::VestedTransfer { .. }
            | Self::ForceVestedTransfer { .. }
            | Self::ForceUpdateSchedules { .. } => "vesting",
            Self::BatchAll { .. } => "utility",
            Self::Sudo { .. } => "sudo",
        }
    }

    /// Call name within its pallet.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::VestedTransfer { .. } => "vested_transfer",
            Self::ForceVestedTransfer { .. } => "force_vested_transfer",
            Self::ForceUpdateSchedules { .. } => "force_update_schedules",
            Self::BatchAll { .. } => "batch_all",
            Self::Sudo { .. } => "sudo",
        }
    }

    /// Whether dispatching this call requires the sudo key.
    ///
    /// For a batch this is true if any inner call requires it; the batch
    /// itself must then be wrapped, not the inner calls individually.
    pub fn requires_sudo(&self) -> bool {
        match self {
            Self::ForceVestedTransfer { .. } | Self::ForceUpdateSchedules { .. } => true,
            Self::BatchAll { calls } => calls.iter().any(Call::requires_sudo),
            Self::Transfer { .. } | Self::VestedTransfer { .. } | Self::Sudo { .. } => false,
        }
    }

    /// Number of leaf calls, counting through batch and sudo wrappers.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::BatchAll { calls } => calls.iter().map(Call::leaf_count).sum(),
            Self::Sudo { call } => call.leaf_count(),
            _ => 1,
        }
    }
}
