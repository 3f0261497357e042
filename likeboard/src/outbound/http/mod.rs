//! HTTP outbound adapter for the user data service.
//!
//! This module provides a thin reqwest implementation of the
//! `UserDirectory` port.

mod dto;
mod http_directory;

pub use http_directory::HttpUserDirectory;
