//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the process.
//!
//! # Tasks
//! - Eviction sweeper: drops TTL-expired entries from every registered cache

mod sweeper;

pub use sweeper::{sweep_all, EvictionSweeper, SweepReport, SweeperHandle, SweeperState};
