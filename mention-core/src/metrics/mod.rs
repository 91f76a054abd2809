//! Keyword mention metrics over a batch of transcripts.
//!
//! The engine is a pure function of its inputs:
//! - each transcript is tokenized once per call
//! - each keyword is scanned against every transcript independently
//! - per (keyword, transcript) results are reduced by sum and count only
//!
//! Threading:
//! - [`MetricsEngine`] is plain configuration and is `Send + Sync`. It does no
//!   concurrent work itself; callers may split batches across threads.
//!
//! Relative positions are `start_index / token_count * 100` for each match,
//! averaged over every match of a keyword in the batch.

mod accumulate;
mod compute;
mod summary;
mod types;

pub use types::MetricsEngine;
