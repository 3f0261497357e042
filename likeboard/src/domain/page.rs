//! Presentational root.
//!
//! Purpose: turn selector output into a view model. Rendering is pure; the
//! pipeline hands the result to the [`PagePresenter`](super::ports::PagePresenter)
//! together with the status and the published context.

use std::fmt;

use super::context::SelectionContext;
use super::reaction::Reaction;
use super::selector::SelectedProps;
use super::status::LoadStatus;
use super::user::{User, UserName};

/// One row in the user list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    /// User shown in this row.
    pub user: UserName,
    /// Whether this row is the selected user.
    pub selected: bool,
    /// Number of like records.
    pub likes: usize,
    /// Number of dislike records.
    pub dislikes: usize,
}

/// Main area of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBody {
    /// Loader indicator while a fetch is in flight.
    Loading,
    /// Loader indicator after a failed fetch.
    Failed {
        /// Message shown in place of the list.
        message: String,
    },
    /// The user list.
    Users(Vec<ListEntry>),
}

/// Records of the selected user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsPanel {
    /// The selected user.
    pub user: UserName,
    /// Like records in list order.
    pub likes: Vec<Reaction>,
    /// Dislike records in list order.
    pub dislikes: Vec<Reaction>,
}

impl From<&User> for DetailsPanel {
    fn from(user: &User) -> Self {
        Self {
            user: user.name().clone(),
            likes: user.likes().to_vec(),
            dislikes: user.dislikes().to_vec(),
        }
    }
}

/// Render-ready view of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    /// Loader indicator or user list.
    pub body: PageBody,
    /// Records of the selected user.
    pub details: Option<DetailsPanel>,
    /// Mutation failure notice.
    pub banner: Option<String>,
}

/// A view together with the status and context it was rendered from.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// What is shown.
    pub view: PageView,
    /// Status the view was rendered for.
    pub status: LoadStatus,
    /// Context published with this render.
    pub context: SelectionContext,
}

/// Render selector output.
#[must_use]
pub fn render(selected: &SelectedProps, banner: Option<&str>) -> PageView {
    let body = match &selected.loaded.status {
        LoadStatus::Request => PageBody::Loading,
        LoadStatus::Error { message } => PageBody::Failed {
            message: message.clone(),
        },
        LoadStatus::Success => {
            let current = selected.selected_user.as_ref().map(User::name);
            let entries = selected
                .loaded
                .users_in_view()
                .iter()
                .map(|user| ListEntry {
                    user: user.name().clone(),
                    selected: current == Some(user.name()),
                    likes: user.likes().len(),
                    dislikes: user.dislikes().len(),
                })
                .collect();
            PageBody::Users(entries)
        }
    };

    PageView {
        body,
        details: selected.selected_user.as_ref().map(DetailsPanel::from),
        banner: banner.map(str::to_owned),
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(banner) = &self.banner {
            writeln!(f, "! {banner}")?;
        }
        match &self.body {
            PageBody::Loading => writeln!(f, "Loading users...")?,
            PageBody::Failed { message } => writeln!(f, "{message}")?,
            PageBody::Users(entries) if entries.is_empty() => writeln!(f, "No users")?,
            PageBody::Users(entries) => {
                for entry in entries {
                    let marker = if entry.selected { '>' } else { ' ' };
                    writeln!(
                        f,
                        "{marker} {} (+{} / -{})",
                        entry.user, entry.likes, entry.dislikes
                    )?;
                }
            }
        }
        if let Some(details) = &self.details {
            writeln!(f, "-- {} --", details.user)?;
            write_reactions(f, "likes", &details.likes)?;
            write_reactions(f, "dislikes", &details.dislikes)?;
        }
        Ok(())
    }
}

fn write_reactions(f: &mut fmt::Formatter<'_>, label: &str, reactions: &[Reaction]) -> fmt::Result {
    if reactions.is_empty() {
        return writeln!(f, "{label}: none");
    }
    writeln!(f, "{label}:")?;
    for reaction in reactions {
        writeln!(f, "  {reaction}")?;
    }
    Ok(())
}
