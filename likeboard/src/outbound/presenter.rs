//! Presenter that records each rendered page as a tracing event.

use tracing::info;

use crate::domain::ports::PagePresenter;
use crate::domain::{PageBody, RenderedPage};

/// Emits one `info` event per rendered page.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingPresenter;

impl PagePresenter for TracingPresenter {
    fn present(&self, page: &RenderedPage) {
        let users = match &page.view.body {
            PageBody::Users(entries) => entries.len(),
            PageBody::Loading | PageBody::Failed { .. } => 0,
        };
        let selected = page
            .context
            .user
            .as_ref()
            .map(|user| user.name().to_string());
        info!(
            status = page.status.label(),
            users,
            selected = selected.as_deref().unwrap_or("-"),
            banner = page.view.banner.is_some(),
            "page rendered"
        );
    }
}
