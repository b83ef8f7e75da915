//! # Disburser
//!
//! Library for batched token transfers and vesting grants on Substrate-style
//! chains: decimal amount conversion, linear vesting schedule derivation,
//! chunking, atomic batch/sudo composition, and strictly sequential
//! nonce-ordered submission against an abstract ledger client.

pub mod address;
pub mod amount;
pub mod calls;
pub mod chunk;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod distribution;
pub mod error;
pub mod nonce;
pub mod recipients;
pub mod sequencer;
pub mod serde;
pub mod vesting;
