//! Driven port receiving every rendered page.

use crate::domain::RenderedPage;

/// Display surface for the presentational root.
#[cfg_attr(test, mockall::automock)]
pub trait PagePresenter: Send + Sync {
    /// Show `page`. Called once per pipeline emission, in order.
    fn present(&self, page: &RenderedPage);
}
