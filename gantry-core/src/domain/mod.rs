//! Core domain types
//!
//! This module contains the records exchanged between the poller and its
//! call sites. They are plain data: construction happens at the call site,
//! the poller consumes a spec and produces a result, and nothing is shared
//! between poll runs.

pub mod poll;
