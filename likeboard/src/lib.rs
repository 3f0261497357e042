//! Likeboard: a user list with like and dislike records, driven by a
//! prop-stream pipeline.
//!
//! The crate follows a hexagonal layout. `domain` holds the pipeline stages
//! and the ports they depend on, `outbound` provides the data and history
//! adapters, and `inbound` exposes a line-oriented console.

pub mod config;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod outbound;

pub use config::AppSettings;
