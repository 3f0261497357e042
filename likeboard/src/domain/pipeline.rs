//! The user page pipeline.
//!
//! Purpose: sequence the stages for one page. The router supplies the route,
//! the store supplies the list, the loader makes sure data is present, the
//! selector derives the selection, the context is published and the root is
//! rendered. URL corrections are pushed after each render.
//!
//! The pipeline is the single owner of every stage. Events arrive on an
//! unbounded channel; network calls run as spawned tasks whose only effect
//! is to post a completion event back. All state changes happen inside
//! [`UserPagePipeline::handle`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::context::publish_context;
use super::error::Error;
use super::handlers::{ListPatch, Mutation, UpdateFunctions, UserListStore, apply_mutation};
use super::loader::{FetchTicket, UserListLoader};
use super::page::{RenderedPage, render};
use super::ports::{History, PagePresenter, UserDirectory};
use super::props::Props;
use super::route::RouteMatch;
use super::selector::{SelectedProps, UserSelect, UserSelector};
use super::url_sync::UrlSync;
use super::user::User;
use super::user_list::UserList;

/// Inputs consumed by the pipeline.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// The history location changed; re-read it.
    RouteChanged,
    /// Drop the stored list and load it again.
    Refresh,
    /// A user list fetch completed.
    UsersFetched {
        /// Ticket the fetch was issued with.
        ticket: FetchTicket,
        /// Fetched list or the mapped failure.
        result: Result<UserList, Error>,
    },
    /// A manual selection was made.
    UserSelected {
        /// Name of the chosen user.
        user: String,
    },
    /// A mutation was requested.
    Mutate(Mutation),
    /// A mutation completed.
    MutationSettled {
        /// The mutation that was attempted.
        mutation: Mutation,
        /// Confirmed patch or the mapped failure.
        result: Result<ListPatch, Error>,
    },
}

/// Cloneable sending half of the pipeline's event channel.
#[derive(Debug, Clone)]
pub struct EventSender(mpsc::UnboundedSender<PipelineEvent>);

impl EventSender {
    /// Post an event. Events sent after the pipeline is dropped are discarded.
    pub fn send(&self, event: PipelineEvent) {
        if self.0.send(event).is_err() {
            debug!("pipeline closed; dropping event");
        }
    }
}

pub(crate) fn event_channel() -> (EventSender, mpsc::UnboundedReceiver<PipelineEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender(tx), rx)
}

/// Outbound collaborators of the pipeline.
#[derive(Clone)]
pub struct PipelinePorts {
    /// User data service.
    pub directory: Arc<dyn UserDirectory>,
    /// Browser-like location history.
    pub history: Arc<dyn History>,
    /// Receiver of rendered pages.
    pub presenter: Arc<dyn PagePresenter>,
}

/// Single-owner event loop driving the user page.
pub struct UserPagePipeline {
    ports: PipelinePorts,
    sender: EventSender,
    receiver: mpsc::UnboundedReceiver<PipelineEvent>,
    store: UserListStore,
    loader: UserListLoader,
    selector: UserSelector,
    url_sync: UrlSync,
    update_functions: UpdateFunctions,
    route: RouteMatch,
    in_flight: usize,
    banner: Option<String>,
    last_selected: Option<SelectedProps>,
    last_page: Option<RenderedPage>,
}

impl UserPagePipeline {
    /// Create a pipeline with an empty list; [`start`](Self::start) will
    /// fetch it.
    #[must_use]
    pub fn new(ports: PipelinePorts) -> Self {
        Self::with_user_list(ports, UserList::empty())
    }

    /// Create a pipeline whose store already holds `users`.
    #[must_use]
    pub fn with_user_list(ports: PipelinePorts, users: UserList) -> Self {
        let (sender, receiver) = event_channel();
        Self {
            ports,
            selector: UserSelector::new(UserSelect::new(sender.clone())),
            update_functions: UpdateFunctions::new(sender.clone()),
            sender,
            receiver,
            store: UserListStore::new(users),
            loader: UserListLoader::new(),
            url_sync: UrlSync::new(),
            route: RouteMatch::default(),
            in_flight: 0,
            banner: None,
            last_selected: None,
            last_page: None,
        }
    }

    /// Read the current location and emit the first props.
    ///
    /// Must run inside a tokio runtime, as a fetch may be spawned.
    pub fn start(&mut self) {
        self.route = RouteMatch::from_path(&self.ports.history.location());
        info!(path = self.route.path(), "starting user page");
        self.emit_props();
    }

    /// Process one event.
    ///
    /// Must run inside a tokio runtime, as network calls are spawned.
    pub fn handle(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::RouteChanged => {
                let location = self.ports.history.location();
                if location == self.route.path() {
                    return;
                }
                self.route = RouteMatch::from_path(&location);
                self.emit_props();
            }
            PipelineEvent::Refresh => {
                info!("reloading user list");
                self.store.set_user_list(UserList::empty());
                self.emit_props();
            }
            PipelineEvent::UsersFetched { ticket, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                let Some(outcome) = self.loader.on_fetch_settled(ticket, result) else {
                    return;
                };
                if let Some(users) = outcome.set_user_list {
                    self.store.set_user_list(users);
                }
                let selected = self.selector.on_props(outcome.emission);
                self.present(selected);
            }
            PipelineEvent::UserSelected { user } => {
                if let Some(selected) = self.selector.on_select(&user) {
                    info!(user = %user, "user selected");
                    self.present(selected);
                }
            }
            PipelineEvent::Mutate(mutation) => self.spawn_mutation(mutation),
            PipelineEvent::MutationSettled { mutation, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.on_mutation_settled(&mutation, result);
            }
        }
    }

    /// Process queued events until no task is in flight and the queue is
    /// empty.
    pub async fn settle(&mut self) {
        loop {
            while let Ok(event) = self.receiver.try_recv() {
                self.handle(event);
            }
            if self.in_flight == 0 {
                return;
            }
            match self.receiver.recv().await {
                Some(event) => self.handle(event),
                None => return,
            }
        }
    }

    /// Navigate to `path` through the history port.
    pub fn open(&self, path: &str) {
        info!(path, "navigating");
        self.ports.history.push(path);
        self.sender.send(PipelineEvent::RouteChanged);
    }

    /// Queue a reload of the user list.
    pub fn refresh(&self) {
        self.sender.send(PipelineEvent::Refresh);
    }

    /// Most recently rendered page.
    #[must_use]
    pub fn current_page(&self) -> Option<&RenderedPage> {
        self.last_page.as_ref()
    }

    /// Currently selected user.
    #[must_use]
    pub fn selected_user(&self) -> Option<&User> {
        self.last_selected
            .as_ref()
            .and_then(|selected| selected.selected_user.as_ref())
    }

    /// The list store.
    #[must_use]
    pub const fn store(&self) -> &UserListStore {
        &self.store
    }

    /// Currently matched route.
    #[must_use]
    pub const fn route(&self) -> &RouteMatch {
        &self.route
    }

    /// Manual selection handle.
    #[must_use]
    pub fn user_select(&self) -> UserSelect {
        self.selector.handle().clone()
    }

    /// Mutation handlers.
    #[must_use]
    pub fn update_functions(&self) -> UpdateFunctions {
        self.update_functions.clone()
    }

    /// A sender for posting raw events.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    fn emit_props(&mut self) {
        let props = Props {
            user_list: self.store.users().clone(),
            route: self.route.clone(),
        };
        let step = self.loader.on_props(props);
        if let Some(ticket) = step.fetch {
            self.spawn_fetch(ticket);
        }
        let selected = self.selector.on_props(step.emission);
        self.present(selected);
    }

    fn present(&mut self, selected: SelectedProps) {
        let context = publish_context(&selected, &self.update_functions);
        let view = render(&selected, self.banner.as_deref());
        let page = RenderedPage {
            view,
            status: selected.loaded.status.clone(),
            context,
        };
        debug!(status = page.status.label(), "presenting page");
        self.ports.presenter.present(&page);

        let navigation = self
            .url_sync
            .reconcile(selected.selected_user.as_ref(), &selected.loaded.props.route);
        self.last_selected = Some(selected);
        self.last_page = Some(page);
        if let Some(path) = navigation {
            self.open(&path);
        }
    }

    fn rerender(&mut self) {
        if let Some(selected) = self.last_selected.clone() {
            self.present(selected);
        }
    }

    fn on_mutation_settled(&mut self, mutation: &Mutation, result: Result<ListPatch, Error>) {
        match result {
            Ok(patch) => {
                self.banner = None;
                self.store.update(|users| patch.apply(users));
                self.emit_props();
            }
            Err(err) => {
                warn!(
                    user = %mutation.user(),
                    kind = %mutation.kind(),
                    error = %err,
                    "mutation failed; keeping local state"
                );
                self.banner = Some(mutation.failure_message(&err));
                self.rerender();
            }
        }
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        self.in_flight += 1;
        let directory = Arc::clone(&self.ports.directory);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = directory.fetch_users().await.map_err(Error::from);
            sender.send(PipelineEvent::UsersFetched { ticket, result });
        });
    }

    fn spawn_mutation(&mut self, mutation: Mutation) {
        self.in_flight += 1;
        let directory = Arc::clone(&self.ports.directory);
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let result = apply_mutation(directory.as_ref(), &mutation).await;
            sender.send(PipelineEvent::MutationSettled { mutation, result });
        });
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
