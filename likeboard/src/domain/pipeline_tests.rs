//! Regression coverage for the user page pipeline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rstest::rstest;
use serde_json::json;

use super::*;
use crate::domain::ports::{FixtureUserDirectory, MockUserDirectory, UserDirectoryError};
use crate::domain::{
    LoadStatus, PageBody, Reaction, ReactionId, ReactionKind, ReactionPayload,
    SERVICE_DOWN_MESSAGE, UserName, user_path,
};
use crate::outbound::MemoryHistory;

#[derive(Default)]
struct RecordingPresenter {
    pages: Mutex<Vec<RenderedPage>>,
}

impl RecordingPresenter {
    fn statuses(&self) -> Vec<LoadStatus> {
        self.pages
            .lock()
            .expect("pages mutex")
            .iter()
            .map(|page| page.status.clone())
            .collect()
    }
}

impl PagePresenter for RecordingPresenter {
    fn present(&self, page: &RenderedPage) {
        self.pages.lock().expect("pages mutex").push(page.clone());
    }
}

struct Harness {
    pipeline: UserPagePipeline,
    history: Arc<MemoryHistory>,
    presenter: Arc<RecordingPresenter>,
}

fn harness(directory: impl UserDirectory + 'static, path: &str, users: UserList) -> Harness {
    let history = Arc::new(MemoryHistory::new(path));
    let presenter = Arc::new(RecordingPresenter::default());
    let ports = PipelinePorts {
        directory: Arc::new(directory),
        history: history.clone(),
        presenter: presenter.clone(),
    };
    Harness {
        pipeline: UserPagePipeline::with_user_list(ports, users),
        history,
        presenter,
    }
}

fn name(raw: &str) -> UserName {
    UserName::new(raw).expect("valid name")
}

fn reaction(id: u64, topic: &str) -> Reaction {
    Reaction::new(ReactionId::new(id), payload(topic))
}

fn payload(topic: &str) -> ReactionPayload {
    let mut payload = ReactionPayload::new();
    payload.insert("topic".to_owned(), json!(topic));
    payload
}

fn list(users: Vec<User>) -> UserList {
    UserList::new(users).expect("unique users")
}

fn names(users: &[&str]) -> UserList {
    list(users.iter().map(|raw| User::named(name(raw))).collect())
}

fn like_ids(pipeline: &UserPagePipeline, user: &str) -> Vec<u64> {
    pipeline
        .store()
        .users()
        .find(user)
        .map(|u| u.likes().iter().map(|r| r.id().get()).collect())
        .unwrap_or_default()
}

#[rstest]
#[tokio::test]
async fn empty_list_is_fetched_once_then_rendered() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_fetch_users()
        .times(1)
        .return_once(|| Ok(names(&["alice"])));
    let mut h = harness(directory, "/alice", UserList::empty());

    h.pipeline.start();
    h.pipeline.settle().await;

    assert_eq!(
        h.presenter.statuses(),
        vec![LoadStatus::Request, LoadStatus::Success]
    );
    assert_eq!(h.pipeline.store().revision(), 1, "list is stored once");
    assert_eq!(
        h.pipeline.selected_user().map(|u| u.name().as_str()),
        Some("alice")
    );
}

#[rstest]
#[tokio::test]
async fn stored_list_and_url_user_skip_fetching() {
    let mut directory = MockUserDirectory::new();
    directory.expect_fetch_users().times(0);
    let mut h = harness(directory, "/bob", names(&["alice", "bob"]));

    h.pipeline.start();
    h.pipeline.settle().await;

    assert_eq!(h.presenter.statuses(), vec![LoadStatus::Success]);
    assert_eq!(
        h.pipeline.selected_user().map(|u| u.name().as_str()),
        Some("bob")
    );
    assert_eq!(h.history.entries(), vec!["/bob"], "no navigation needed");
}

#[rstest]
#[tokio::test]
async fn failed_fetch_ends_in_service_down_status() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_fetch_users()
        .times(1)
        .return_once(|| Err(UserDirectoryError::transport("connection refused")));
    let mut h = harness(directory, "/", UserList::empty());

    h.pipeline.start();
    h.pipeline.settle().await;

    let page = h.pipeline.current_page().expect("page rendered");
    assert_eq!(page.status, LoadStatus::service_down());
    assert_eq!(
        page.view.body,
        PageBody::Failed {
            message: SERVICE_DOWN_MESSAGE.to_owned()
        }
    );
    assert!(page.context.user.is_none());
}

#[rstest]
#[tokio::test]
async fn first_user_is_selected_and_pushed_to_the_url() {
    let mut h = harness(FixtureUserDirectory, "/", UserList::empty());

    h.pipeline.start();
    h.pipeline.settle().await;

    assert_eq!(
        h.pipeline.selected_user().map(|u| u.name().as_str()),
        Some("ada")
    );
    assert_eq!(h.history.entries(), vec!["/", "/ada"]);
    assert_eq!(h.pipeline.route().user(), Some("ada"));
}

#[rstest]
#[tokio::test]
async fn manual_selection_navigates_once_and_sticks(
    #[values("grace", "...", "a.b")] target: &str,
) {
    let mut h = harness(FixtureUserDirectory, "/ada", names(&["ada", target]));
    h.pipeline.start();
    h.pipeline.settle().await;

    h.pipeline.user_select().select(target);
    h.pipeline.settle().await;

    let target_path = user_path(&name(target));
    let pushes = h
        .history
        .entries()
        .iter()
        .filter(|entry| **entry == target_path)
        .count();
    assert_eq!(pushes, 1);
    assert_eq!(h.history.entries().last(), Some(&target_path));
    assert_eq!(
        h.pipeline.selected_user().map(|u| u.name().as_str()),
        Some(target)
    );
}

#[rstest]
#[tokio::test]
async fn unknown_url_user_selects_nobody() {
    let mut h = harness(FixtureUserDirectory, "/ghost", names(&["ada"]));

    h.pipeline.start();
    h.pipeline.settle().await;

    assert!(h.pipeline.selected_user().is_none());
    assert_eq!(h.history.entries(), vec!["/ghost"]);
}

#[rstest]
#[tokio::test]
async fn confirmed_delete_removes_only_the_matching_record() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_delete_user_like()
        .withf(|user, id| user.as_str() == "carol" && *id == ReactionId::new(7))
        .times(1)
        .returning(|_, _| Ok(()));
    let carol = User::new(
        name("carol"),
        vec![reaction(7, "jazz"), reaction(8, "chess")],
        Vec::new(),
    );
    let dave = User::new(name("dave"), vec![reaction(7, "opera")], Vec::new());
    let mut h = harness(directory, "/carol", list(vec![carol, dave]));
    h.pipeline.start();
    h.pipeline.settle().await;

    h.pipeline
        .update_functions()
        .delete_like(&name("carol"), &reaction(7, "jazz"));
    h.pipeline.settle().await;

    assert_eq!(like_ids(&h.pipeline, "carol"), vec![8]);
    assert_eq!(like_ids(&h.pipeline, "dave"), vec![7]);
    let context_likes = h
        .pipeline
        .current_page()
        .and_then(|page| page.context.user.as_ref())
        .map(|u| u.likes().len());
    assert_eq!(context_likes, Some(1), "published context follows the store");
}

#[rstest]
#[tokio::test]
async fn confirmed_add_appends_the_server_record() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_add_user_dislike()
        .withf(|user, payload| user.as_str() == "ada" && payload.contains_key("topic"))
        .times(1)
        .returning(|_, payload| Ok(Reaction::new(ReactionId::new(42), payload.clone())));
    let mut h = harness(directory, "/ada", names(&["ada"]));
    h.pipeline.start();
    h.pipeline.settle().await;

    h.pipeline
        .update_functions()
        .add_dislike(&name("ada"), payload("rugby"));
    h.pipeline.settle().await;

    let dislikes = h
        .pipeline
        .store()
        .users()
        .find("ada")
        .map(|u| u.dislikes().to_vec())
        .unwrap_or_default();
    assert_eq!(dislikes, vec![reaction(42, "rugby")]);
}

#[rstest]
#[tokio::test]
async fn failed_mutation_keeps_state_and_shows_banner() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_add_user_like()
        .times(1)
        .returning(|_, _| Err(UserDirectoryError::status(503_u16, "maintenance")));
    let mut h = harness(directory, "/ada", names(&["ada"]));
    h.pipeline.start();
    h.pipeline.settle().await;
    let revision = h.pipeline.store().revision();

    h.pipeline
        .update_functions()
        .add_like(&name("ada"), payload("jazz"));
    h.pipeline.settle().await;

    assert_eq!(h.pipeline.store().revision(), revision);
    let banner = h
        .pipeline
        .current_page()
        .and_then(|page| page.view.banner.clone())
        .expect("banner shown");
    assert!(
        banner.starts_with("Could not add like for ada: "),
        "unexpected banner: {banner}"
    );
    assert!(banner.contains("maintenance"));
}

#[rstest]
#[tokio::test]
async fn refresh_keeps_only_the_latest_fetch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut directory = MockUserDirectory::new();
    directory.expect_fetch_users().returning(move || {
        match counter.fetch_add(1, Ordering::SeqCst) {
            0 => Ok(names(&["initial"])),
            1 => Ok(names(&["stale"])),
            _ => Ok(names(&["fresh"])),
        }
    });
    let mut h = harness(directory, "/", UserList::empty());
    h.pipeline.start();
    h.pipeline.settle().await;

    h.pipeline.handle(PipelineEvent::Refresh);
    h.pipeline.handle(PipelineEvent::Refresh);
    h.pipeline.settle().await;

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    let stored: Vec<&str> = h
        .pipeline
        .store()
        .users()
        .iter()
        .map(|u| u.name().as_str())
        .collect();
    assert_eq!(stored, vec!["fresh"]);
}

#[rstest]
#[tokio::test]
async fn mutation_kind_is_routed_to_matching_port_method() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_delete_user_dislike()
        .times(1)
        .returning(|_, _| Ok(()));
    directory.expect_delete_user_like().times(0);
    let ada = User::new(name("ada"), Vec::new(), vec![reaction(3, "sushi")]);
    let mut h = harness(directory, "/ada", list(vec![ada]));
    h.pipeline.start();
    h.pipeline.settle().await;

    h.pipeline.handle(PipelineEvent::Mutate(Mutation::Delete {
        user: name("ada"),
        kind: ReactionKind::Dislike,
        id: ReactionId::new(3),
    }));
    h.pipeline.settle().await;

    assert!(
        h.pipeline
            .store()
            .users()
            .find("ada")
            .is_some_and(|u| u.dislikes().is_empty())
    );
}
