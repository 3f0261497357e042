//! User list loader stage.
//!
//! Purpose: make sure a user list is present before the page renders. When
//! the incoming list is empty the loader asks for exactly one fetch and
//! emits `Request`; when it is not, it emits `Success` straight away.
//!
//! Every `on_props` call supersedes the pending fetch. Results carry the
//! [`FetchTicket`] they were issued with and anything but the latest ticket
//! is discarded, so a slow response can never overwrite a newer one.

use tracing::{debug, info, warn};

use super::error::Error;
use super::props::{LoadedProps, Props};
use super::status::LoadStatus;
use super::user_list::UserList;

/// Identifies one fetch request issued by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// Sequence number of the request.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Result of feeding props into the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderStep {
    /// Emission to forward downstream immediately.
    pub emission: LoadedProps,
    /// Fetch the caller must start, if any.
    pub fetch: Option<FetchTicket>,
}

/// Result of a fetch completing for the pending ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    /// Final emission for this load attempt.
    pub emission: LoadedProps,
    /// List the caller must store, present only after a successful fetch.
    pub set_user_list: Option<UserList>,
}

/// Loader state machine.
#[derive(Debug, Default)]
pub struct UserListLoader {
    issued: u64,
    pending: Option<(FetchTicket, Props)>,
}

impl UserListLoader {
    /// Create an idle loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a fetch has been issued and not yet settled.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    /// Accept new props, superseding any pending fetch.
    pub fn on_props(&mut self, props: Props) -> LoaderStep {
        if let Some((superseded, _)) = self.pending.take() {
            debug!(ticket = superseded.get(), "superseding pending user list fetch");
        }

        if !props.user_list.is_empty() {
            return LoaderStep {
                emission: LoadedProps {
                    props,
                    status: LoadStatus::Success,
                    users: None,
                },
                fetch: None,
            };
        }

        self.issued = self.issued.wrapping_add(1);
        let ticket = FetchTicket(self.issued);
        info!(ticket = ticket.get(), "fetching user list");
        self.pending = Some((ticket, props.clone()));
        LoaderStep {
            emission: LoadedProps {
                props,
                status: LoadStatus::Request,
                users: None,
            },
            fetch: Some(ticket),
        }
    }

    /// Settle a fetch. Returns `None` when `ticket` is not the pending one.
    pub fn on_fetch_settled(
        &mut self,
        ticket: FetchTicket,
        result: Result<UserList, Error>,
    ) -> Option<FetchOutcome> {
        let props = match self.pending.take() {
            Some((pending, props)) if pending == ticket => props,
            other => {
                self.pending = other;
                debug!(ticket = ticket.get(), "discarding stale user list result");
                return None;
            }
        };

        match result {
            Ok(users) => {
                info!(ticket = ticket.get(), users = users.len(), "user list loaded");
                Some(FetchOutcome {
                    emission: LoadedProps {
                        props,
                        status: LoadStatus::Success,
                        users: Some(users.clone()),
                    },
                    set_user_list: Some(users),
                })
            }
            Err(err) => {
                warn!(ticket = ticket.get(), error = %err, "user list fetch failed");
                Some(FetchOutcome {
                    emission: LoadedProps {
                        props,
                        status: LoadStatus::service_down(),
                        users: None,
                    },
                    set_user_list: None,
                })
            }
        }
    }
}
