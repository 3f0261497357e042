//! Outbound adapters implementing the domain ports.

pub mod history;
pub mod http;
pub mod memory;
pub mod presenter;

pub use history::MemoryHistory;
pub use http::HttpUserDirectory;
pub use memory::InMemoryUserDirectory;
pub use presenter::TracingPresenter;
