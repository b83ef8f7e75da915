//! Linear vesting schedule derivation.

use crate::constants::SECONDS_PER_VESTING_MONTH;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Errors produced while deriving a vesting schedule.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The duration does not span at least one block.
    #[error("invalid vesting duration: {months} months at {block_time_secs}s blocks")]
    InvalidDuration {
        /// Requested duration in 28-day months.
        months: u32,
        /// Block time used for the derivation.
        block_time_secs: u64,
    },
    /// The per-block release rounds to zero, which the ledger rejects.
    #[error("per-block release rounds to zero for locked amount {locked}")]
    ZeroPerBlock {
        /// Total locked amount in minimal denomination.
        locked: BigUint,
    },
}

/// A linear unlock plan releasing `per_block` each block from `starting_block`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestingSchedule {
    /// Total locked amount in minimal denomination.
    #[serde(with = "crate::serde::biguint_string")]
    pub locked: BigUint,
    /// Amount released per block, in minimal denomination.
    #[serde(with = "crate::serde::biguint_string")]
    pub per_block: BigUint,
    /// Block height at which the unlock begins.
    pub starting_block: u32,
}

/// Derives a [`VestingSchedule`] from a total amount and a duration.
///
/// A vesting month is fixed at 28 days regardless of the calendar. The
/// per-block release is `locked / total_vested_blocks` rounded half-up, so
/// `per_block * total_vested_blocks` may differ from `locked` by up to
/// `total_vested_blocks / 2` minimal units. That residue is an accepted
/// property of already-deployed schedules and is not redistributed onto the
/// final block.
pub fn compute_schedule(
    starting_block: u32,
    locked: BigUint,
    duration_months: u32,
    block_time_secs: u64,
) -> Result<VestingSchedule, ScheduleError> {
    let total_blocks = total_vested_blocks(duration_months, block_time_secs);
    if duration_months == 0 || total_blocks == 0 {
        return Err(ScheduleError::InvalidDuration {
            months: duration_months,
            block_time_secs,
        });
    }

    let blocks = BigUint::from(total_blocks);
    let two = BigUint::from(2u8);
    // round_half_up(locked / blocks) without leaving integer arithmetic.
    let per_block = (&locked * &two + &blocks) / (&blocks * &two);

    if per_block.is_zero() && !locked.is_zero() {
        return Err(ScheduleError::ZeroPerBlock { locked });
    }

    Ok(VestingSchedule { locked, per_block, starting_block })
}

/// Number of blocks spanned by `duration_months` 28-day months.
///
/// The division by the block time happens once, after the multiplication, so
/// a block time that does not divide a month evenly loses at most one block
/// over the whole duration rather than one per month.
pub fn total_vested_blocks(duration_months: u32, block_time_secs: u64) -> u64 {
    if block_time_secs == 0 {
        return 0;
    }
    SECONDS_PER_VESTING_MONTH * u64::from(duration_months) / block_time_secs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_BLOCK_TIME_SECS;

    #[test]
    fn one_month_at_one_second_blocks() {
        // 28 days of 1s blocks is 2_419_200 blocks; 28_000_000 / 2_419_200
        // is ~11.57, which rounds up to 12.
        let schedule =
            compute_schedule(0, BigUint::from(28_000_000u32), 1, 1).unwrap();
        assert_eq!(total_vested_blocks(1, 1), 2_419_200);
        assert_eq!(schedule.per_block, BigUint::from(12u8));
        assert_eq!(schedule.locked, BigUint::from(28_000_000u32));
    }

    #[test]
    fn default_block_time_month() {
        assert_eq!(total_vested_blocks(1, DEFAULT_BLOCK_TIME_SECS), 201_600);
        assert_eq!(total_vested_blocks(12, DEFAULT_BLOCK_TIME_SECS), 2_419_200);
    }

    #[test]
    fn residue_is_bounded() {
        let locked = BigUint::from(1_000_000_000_000_000_000u64);
        for months in [1u32, 3, 7, 24] {
            let schedule =
                compute_schedule(100, locked.clone(), months, DEFAULT_BLOCK_TIME_SECS).unwrap();
            let blocks = BigUint::from(total_vested_blocks(months, DEFAULT_BLOCK_TIME_SECS));
            let released = &schedule.per_block * &blocks;

            let residue = if released > locked {
                &released - &locked
            } else {
                &locked - &released
            };
            let bound = &blocks / &BigUint::from(2u8) + BigUint::from(1u8);
            assert!(residue <= bound, "residue {residue} over {blocks} blocks");
            assert!(schedule.per_block >= BigUint::from(1u8));
        }
    }

    #[test]
    fn zero_locked_is_a_valid_empty_schedule() {
        let schedule = compute_schedule(5, BigUint::zero(), 1, 12).unwrap();
        assert_eq!(schedule.per_block, BigUint::zero());
    }

    #[test]
    fn rejects_zero_duration() {
        assert_eq!(
            compute_schedule(0, BigUint::from(1u8), 0, 12),
            Err(ScheduleError::InvalidDuration { months: 0, block_time_secs: 12 })
        );
    }

    #[test]
    fn rejects_durations_shorter_than_a_block() {
        // A "block time" longer than the whole duration spans zero blocks.
        let block_time = SECONDS_PER_VESTING_MONTH * 2;
        assert_eq!(
            compute_schedule(0, BigUint::from(1u8), 1, block_time),
            Err(ScheduleError::InvalidDuration { months: 1, block_time_secs: block_time })
        );
    }

    #[test]
    fn rejects_per_block_rounding_to_zero() {
        // 1 minimal unit over 201_600 blocks rounds to zero per block.
        assert_eq!(
            compute_schedule(0, BigUint::from(1u8), 1, DEFAULT_BLOCK_TIME_SECS),
            Err(ScheduleError::ZeroPerBlock { locked: BigUint::from(1u8) })
        );
    }
}
