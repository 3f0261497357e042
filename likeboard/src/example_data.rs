//! Startup seeding of demo users from the example data registry.

use example_data::{
    ExampleReactionSeed, ExampleUserSeed, GenerationError, RegistryError, SeedRegistry,
    generate_example_users,
};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::config::AppSettings;
use crate::domain::{
    Reaction, ReactionId, ReactionPayload, User, UserList, UserListError, UserName,
    UserValidationError,
};

/// Errors returned while building the demo user list.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// Registry loading or lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// User generation failed.
    #[error("example data generation error: {0}")]
    Generation(#[from] GenerationError),
    /// A generated handle is not a valid user name.
    #[error("generated user {handle:?} is invalid: {source}")]
    InvalidUser {
        /// The rejected handle.
        handle: String,
        /// Validation failure.
        #[source]
        source: UserValidationError,
    },
    /// Generated users collide.
    #[error("generated user list is invalid: {0}")]
    List(#[from] UserListError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Build the demo user list described by `settings`.
///
/// # Examples
///
/// ```rust,no_run
/// use std::ffi::OsString;
///
/// use likeboard::AppSettings;
/// use likeboard::example_data::seed_user_list;
/// use ortho_config::OrthoConfig;
///
/// let settings = AppSettings::load_from_iter([OsString::from("likeboard")])
///     .expect("settings load");
/// let users = seed_user_list(&settings).expect("seeded");
/// assert!(!users.is_empty());
/// ```
pub fn seed_user_list(settings: &AppSettings) -> Result<UserList, SeedingError> {
    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(SeedingError::EmptySeedName);
    }

    let registry_path = settings.registry_path();
    let registry = SeedRegistry::from_file(&registry_path)?;
    let registered = registry.find_seed(seed_name)?;
    let definition = match settings.user_count {
        Some(count) => registered.with_user_count(count),
        None => registered.clone(),
    };

    let seeds = generate_example_users(&registry, &definition)?;
    let users = seeds
        .into_iter()
        .map(into_user)
        .collect::<Result<Vec<_>, _>>()?;
    let list = UserList::new(users)?;

    info!(
        seed_key = seed_name,
        user_count = list.len(),
        registry = %registry_path.display(),
        "example users generated"
    );
    Ok(list)
}

fn into_user(seed: ExampleUserSeed) -> Result<User, SeedingError> {
    let name = UserName::new(seed.user.clone()).map_err(|source| SeedingError::InvalidUser {
        handle: seed.user,
        source,
    })?;
    Ok(User::new(
        name,
        seed.likes.into_iter().map(into_reaction).collect(),
        seed.dislikes.into_iter().map(into_reaction).collect(),
    ))
}

fn into_reaction(seed: ExampleReactionSeed) -> Reaction {
    let mut payload = ReactionPayload::new();
    payload.insert("topic".to_owned(), Value::String(seed.topic));
    Reaction::new(ReactionId::new(seed.id), payload)
}

#[cfg(test)]
mod tests {
    //! Seeding from the bundled registry fixture.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use ortho_config::OrthoConfig;
    use rstest::rstest;

    fn settings(seed: Option<&str>, count: Option<usize>) -> AppSettings {
        let _guard = lock_env([
            ("LIKEBOARD_SEED_NAME", None::<String>),
            ("LIKEBOARD_USER_COUNT", None::<String>),
            ("LIKEBOARD_REGISTRY_PATH", None::<String>),
        ]);
        let mut settings =
            AppSettings::load_from_iter([OsString::from("likeboard")]).expect("config loads");
        settings.seed_name = seed.map(str::to_owned);
        settings.user_count = count;
        settings
    }

    #[rstest]
    fn bundled_registry_seeds_default_users() {
        let users = seed_user_list(&settings(None, None)).expect("seeded");

        assert!(!users.is_empty());
        for user in &users {
            assert!(!user.likes().is_empty(), "{} has likes", user.name());
            let topic = user.likes().first().map(|r| r.payload()["topic"].clone());
            assert!(topic.is_some_and(|t| t.is_string()));
        }
    }

    #[rstest]
    fn seeding_is_deterministic() {
        let first = seed_user_list(&settings(None, None)).expect("seeded");
        let second = seed_user_list(&settings(None, None)).expect("seeded");
        assert_eq!(first, second);
    }

    #[rstest]
    fn user_count_override_is_applied() {
        let users = seed_user_list(&settings(None, Some(2))).expect("seeded");
        assert_eq!(users.len(), 2);
    }

    #[rstest]
    fn blank_seed_name_is_rejected() {
        let result = seed_user_list(&settings(Some("  "), None));
        assert!(matches!(result, Err(SeedingError::EmptySeedName)));
    }

    #[rstest]
    fn unknown_seed_is_reported() {
        let result = seed_user_list(&settings(Some("no-such-seed"), None));
        assert!(matches!(
            result,
            Err(SeedingError::Registry(RegistryError::SeedNotFound { .. }))
        ));
    }
}
