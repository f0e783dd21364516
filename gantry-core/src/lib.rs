//! Gantry Core
//!
//! Core types and the poll-until-ready primitive for the Gantry readiness
//! gate.
//!
//! This crate contains:
//! - Domain types: the poll specification, per-attempt outcome, and final
//!   result records
//! - Poller: the generic bounded-retry wait loop
//! - Settle: the explicit fixed post-readiness grace period

pub mod domain;
pub mod poller;
pub mod settle;

pub use domain::poll::{PollOutcome, PollResult, PollSpec};
pub use poller::poll_until_ready;
pub use settle::settle;
