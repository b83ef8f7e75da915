//! Shared constants.

use std::time::Duration;

/// Maximum number of inner calls per atomic batch.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Expected block time of the target chain.
pub const DEFAULT_BLOCK_TIME_SECS: u64 = 12;

/// Length of a vesting month, fixed at 28 days.
///
/// This is a deliberate simplification inherited from already-deployed
/// schedules and must not be replaced with calendar months.
pub const SECONDS_PER_VESTING_MONTH: u64 = 28 * 24 * 60 * 60;

/// Delay between a confirmed extrinsic and the next submission, to avoid
/// nonce races against the node's pending transaction pool.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(6);
