//! Domain layer: the user page pipeline, its stages and its ports.

pub mod context;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod page;
pub mod pipeline;
pub mod ports;
pub mod props;
pub mod reaction;
pub mod route;
pub mod selector;
pub mod status;
pub mod url_sync;
pub mod user;
pub mod user_list;

pub use context::{SelectionContext, publish_context};
pub use error::{Error, ErrorCode};
pub use handlers::{ListPatch, Mutation, UpdateFunctions, UserListStore, apply_mutation};
pub use loader::{FetchOutcome, FetchTicket, LoaderStep, UserListLoader};
pub use page::{DetailsPanel, ListEntry, PageBody, PageView, RenderedPage, render};
pub use pipeline::{EventSender, PipelineEvent, PipelinePorts, UserPagePipeline};
pub use props::{LoadedProps, Props};
pub use reaction::{Reaction, ReactionId, ReactionKind, ReactionPayload};
pub use route::{ROUTE_PATTERN, RouteMatch, RouteParams, user_path};
pub use selector::{SelectedProps, UserSelect, UserSelector};
pub use status::{LoadStatus, SERVICE_DOWN_MESSAGE};
pub use url_sync::UrlSync;
pub use user::{User, UserName, UserValidationError};
pub use user_list::{UserList, UserListError};
