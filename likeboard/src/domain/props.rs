//! Properties flowing between pipeline stages.

use super::route::RouteMatch;
use super::status::LoadStatus;
use super::user_list::UserList;

/// Input to the loader: the stored list plus the matched route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props {
    /// Stored user list.
    pub user_list: UserList,
    /// Currently matched route.
    pub route: RouteMatch,
}

/// Loader output: the incoming props enriched with a load status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProps {
    /// Incoming props, unchanged.
    pub props: Props,
    /// Status of the load attempt.
    pub status: LoadStatus,
    /// The freshly fetched list, set only on the emission that completes a
    /// fetch.
    pub users: Option<UserList>,
}

impl LoadedProps {
    /// The list downstream stages should display: the fetched list when this
    /// emission carries one, otherwise the stored list.
    #[must_use]
    pub fn users_in_view(&self) -> &UserList {
        self.users.as_ref().unwrap_or(&self.props.user_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserName};

    #[test]
    fn fetched_users_take_precedence_over_stored_list() {
        let alice = User::named(UserName::new("alice").expect("valid name"));
        let fetched = UserList::new(vec![alice]).expect("unique users");
        let loaded = LoadedProps {
            props: Props::default(),
            status: LoadStatus::Success,
            users: Some(fetched.clone()),
        };

        assert_eq!(loaded.users_in_view(), &fetched);
    }

    #[test]
    fn stored_list_is_used_without_fetch_result() {
        let loaded = LoadedProps {
            props: Props::default(),
            status: LoadStatus::Request,
            users: None,
        };

        assert!(loaded.users_in_view().is_empty());
    }
}
