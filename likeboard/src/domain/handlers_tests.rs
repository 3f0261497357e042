//! Tests for the list store, list patches and directory mutations.

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::error::ErrorCode;
use crate::domain::pipeline::event_channel;
use crate::domain::ports::{MockUserDirectory, UserDirectoryError};
use crate::domain::user::User;

fn name(raw: &str) -> UserName {
    UserName::new(raw).expect("valid name")
}

fn payload(topic: &str) -> ReactionPayload {
    let mut payload = ReactionPayload::new();
    payload.insert("topic".to_owned(), json!(topic));
    payload
}

fn reaction(id: u64, topic: &str) -> Reaction {
    Reaction::new(ReactionId::new(id), payload(topic))
}

#[fixture]
fn users() -> UserList {
    UserList::new(vec![
        User::new(name("alice"), vec![reaction(1, "jazz")], vec![]),
        User::new(
            name("carol"),
            vec![reaction(7, "chess"), reaction(8, "opera")],
            vec![reaction(9, "rugby")],
        ),
    ])
    .expect("unique users")
}

fn ids(users: &UserList, user: &str, kind: ReactionKind) -> Vec<u64> {
    users
        .find(user)
        .map(|u| u.reactions(kind).iter().map(|r| r.id().get()).collect())
        .unwrap_or_default()
}

#[rstest]
fn store_counts_every_replacement(users: UserList) {
    let mut store = UserListStore::default();
    assert_eq!(store.revision(), 0);

    store.set_user_list(users);
    store.update(|current| {
        ListPatch::Remove {
            user: name("alice"),
            kind: ReactionKind::Like,
            id: ReactionId::new(1),
        }
        .apply(current)
    });

    assert_eq!(store.revision(), 2);
    assert!(ids(store.users(), "alice", ReactionKind::Like).is_empty());
}

#[rstest]
fn remove_patch_only_touches_the_matching_record(users: UserList) {
    let patch = ListPatch::Remove {
        user: name("carol"),
        kind: ReactionKind::Like,
        id: ReactionId::new(7),
    };

    let patched = patch.apply(&users);

    assert_eq!(ids(&patched, "carol", ReactionKind::Like), vec![8]);
    assert_eq!(ids(&patched, "carol", ReactionKind::Dislike), vec![9]);
    assert_eq!(patched.find("alice"), users.find("alice"));
    assert_eq!(ids(&users, "carol", ReactionKind::Like), vec![7, 8]);
}

#[rstest]
fn append_patch_targets_the_requested_collection(users: UserList) {
    let patch = ListPatch::Append {
        user: name("alice"),
        kind: ReactionKind::Dislike,
        reaction: reaction(3, "karaoke"),
    };

    let patched = patch.apply(&users);

    assert_eq!(ids(&patched, "alice", ReactionKind::Like), vec![1]);
    assert_eq!(ids(&patched, "alice", ReactionKind::Dislike), vec![3]);
    assert_eq!(patched.find("carol"), users.find("carol"));
}

#[rstest]
fn patch_for_unknown_user_leaves_list_unchanged(users: UserList) {
    let patch = ListPatch::Remove {
        user: name("mallory"),
        kind: ReactionKind::Like,
        id: ReactionId::new(7),
    };
    assert_eq!(patch.apply(&users), users);
}

#[rstest]
#[tokio::test]
async fn add_like_uses_the_server_record() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_add_user_like()
        .withf(|user, payload| user.as_str() == "alice" && payload["topic"] == json!("sushi"))
        .times(1)
        .return_once(|_, _| Ok(reaction(42, "sushi")));
    let mutation = Mutation::Add {
        user: name("alice"),
        kind: ReactionKind::Like,
        payload: payload("sushi"),
    };

    let patch = apply_mutation(&directory, &mutation)
        .await
        .expect("mutation succeeds");

    assert_eq!(
        patch,
        ListPatch::Append {
            user: name("alice"),
            kind: ReactionKind::Like,
            reaction: reaction(42, "sushi"),
        }
    );
}

#[rstest]
#[tokio::test]
async fn delete_dislike_calls_the_dislike_endpoint() {
    let mut directory = MockUserDirectory::new();
    directory.expect_delete_user_like().times(0);
    directory
        .expect_delete_user_dislike()
        .withf(|user, id| user.as_str() == "carol" && id.get() == 9)
        .times(1)
        .return_once(|_, _| Ok(()));
    let mutation = Mutation::Delete {
        user: name("carol"),
        kind: ReactionKind::Dislike,
        id: ReactionId::new(9),
    };

    let patch = apply_mutation(&directory, &mutation)
        .await
        .expect("mutation succeeds");

    assert_eq!(
        patch,
        ListPatch::Remove {
            user: name("carol"),
            kind: ReactionKind::Dislike,
            id: ReactionId::new(9),
        }
    );
}

#[rstest]
#[case(UserDirectoryError::not_found("like 7"), ErrorCode::NotFound)]
#[case(UserDirectoryError::transport("connection refused"), ErrorCode::ServiceUnavailable)]
#[case(UserDirectoryError::status(422_u16, "bad payload"), ErrorCode::InvalidRequest)]
#[tokio::test]
async fn directory_failures_are_mapped(
    #[case] failure: UserDirectoryError,
    #[case] expected: ErrorCode,
) {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_delete_user_like()
        .times(1)
        .return_once(move |_, _| Err(failure));
    let mutation = Mutation::Delete {
        user: name("carol"),
        kind: ReactionKind::Like,
        id: ReactionId::new(7),
    };

    let err = apply_mutation(&directory, &mutation)
        .await
        .expect_err("mutation fails");

    assert_eq!(err.code(), expected);
    assert!(
        mutation
            .failure_message(&err)
            .starts_with("Could not delete like for carol: ")
    );
}

#[rstest]
fn update_functions_queue_mutations() {
    let (sender, mut receiver) = event_channel();
    let functions = UpdateFunctions::new(sender);

    functions.add_dislike(&name("alice"), payload("podcasts"));
    functions.delete_like(&name("carol"), &reaction(7, "chess"));

    let Ok(PipelineEvent::Mutate(first)) = receiver.try_recv() else {
        panic!("expected an add mutation");
    };
    assert_eq!(
        first,
        Mutation::Add {
            user: name("alice"),
            kind: ReactionKind::Dislike,
            payload: payload("podcasts"),
        }
    );
    let Ok(PipelineEvent::Mutate(second)) = receiver.try_recv() else {
        panic!("expected a delete mutation");
    };
    assert_eq!(second.verb(), "delete");
    assert_eq!(second.kind(), ReactionKind::Like);
    assert_eq!(second.user().as_str(), "carol");
}
