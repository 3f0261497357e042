//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod history;
mod page_presenter;
mod user_directory;

#[cfg(test)]
pub use history::MockHistory;
pub use history::History;
#[cfg(test)]
pub use page_presenter::MockPagePresenter;
pub use page_presenter::PagePresenter;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory, UserDirectoryError};
