//! Inbound adapters driving the user page.

pub mod cli;
