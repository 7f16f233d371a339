//! Kemas Common - Shared types for the kemas normalization service
//!
//! Domain types for normalization results plus the wire contracts for
//! both sides of the daemon: the caller-facing HTTP API and the JamAI
//! Base generative-table API.

pub mod gen_table;
pub mod types;

pub use gen_table::*;
pub use types::*;
