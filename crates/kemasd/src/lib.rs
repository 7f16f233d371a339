//! kemasd - informal Malay text normalization proxy daemon.
//!
//! Accepts informal Malay text over HTTP, forwards it to the JamAI Base
//! generative-table service, and reshapes the heterogeneous upstream
//! payload into a stable result for the caller. The model inference
//! itself is entirely remote; the daemon's own logic is validation,
//! one outbound call, and tolerant response extraction.

pub mod config;
pub mod error;
pub mod extract;
pub mod jamai;
pub mod routes;
pub mod server;
