//! Deterministic user generation from seed definitions.
//!
//! The same seed value always produces identical output.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::{ExampleReactionSeed, ExampleUserSeed};
use crate::validation::{USER_HANDLE_MAX, is_valid_user_handle, sanitize_user_handle};

/// Maximum number of attempts to generate a valid, unused handle.
const MAX_HANDLE_ATTEMPTS: usize = 100;

/// Minimum number of liked topics per user.
const MIN_LIKES: usize = 1;

/// Maximum number of liked topics per user.
const MAX_LIKES: usize = 3;

/// Minimum number of disliked topics per user.
const MIN_DISLIKES: usize = 0;

/// Maximum number of disliked topics per user.
const MAX_DISLIKES: usize = 2;

/// Generates example users from a seed definition.
///
/// Uses the seed's `seed` value to initialise a deterministic RNG. The
/// generated users have:
///
/// - Unique handles satisfying [`is_valid_user_handle`]
/// - One to three liked topics from the registry
/// - Up to two disliked topics, never overlapping the liked ones
/// - Record ids counting up from 1 within each collection
///
/// # Errors
///
/// Returns [`GenerationError::HandleGenerationFailed`] when no fresh, valid
/// handle can be produced within the retry budget.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_users};
///
/// let json = r#"{
///     "version": 1,
///     "topics": ["jazz", "hiking"],
///     "seeds": [{"name": "test", "seed": 42, "userCount": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let users = generate_example_users(&registry, seed_def).expect("generated");
///
/// assert_eq!(users.len(), 3);
/// let users2 = generate_example_users(&registry, seed_def).expect("generated");
/// assert_eq!(users, users2);
/// ```
pub fn generate_example_users(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<Vec<ExampleUserSeed>, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let mut taken = HashSet::with_capacity(seed_def.user_count());
    let mut users = Vec::with_capacity(seed_def.user_count());

    for _ in 0..seed_def.user_count() {
        let user = generate_single_user(&mut rng, registry, &mut taken)?;
        users.push(user);
    }

    Ok(users)
}

fn generate_single_user(
    rng: &mut ChaCha8Rng,
    registry: &SeedRegistry,
    taken: &mut HashSet<String>,
) -> Result<ExampleUserSeed, GenerationError> {
    let user = generate_handle(rng, taken)?;

    let mut topics = registry.topics().to_vec();
    topics.shuffle(rng);

    let like_count = pick_count(rng, MIN_LIKES, MAX_LIKES, topics.len());
    let disliked = topics.split_off(like_count);
    let dislike_count = pick_count(rng, MIN_DISLIKES, MAX_DISLIKES, disliked.len());

    Ok(ExampleUserSeed {
        user,
        likes: numbered(topics),
        dislikes: numbered(disliked.into_iter().take(dislike_count).collect()),
    })
}

/// Builds `first_last` handles, sanitised and truncated, retrying on invalid
/// or already-used candidates.
fn generate_handle(
    rng: &mut ChaCha8Rng,
    taken: &mut HashSet<String>,
) -> Result<String, GenerationError> {
    for _ in 0..MAX_HANDLE_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);

        let sanitized = sanitize_user_handle(&format!("{first}_{last}"));
        let truncated: String = sanitized.chars().take(USER_HANDLE_MAX).collect();

        if is_valid_user_handle(&truncated) && taken.insert(truncated.clone()) {
            return Ok(truncated);
        }
    }

    Err(GenerationError::HandleGenerationFailed {
        max_attempts: MAX_HANDLE_ATTEMPTS,
    })
}

/// Picks a count in `min..=max`, clamped to `available`.
fn pick_count(rng: &mut ChaCha8Rng, min: usize, max: usize, available: usize) -> usize {
    let clamped_min = min.min(available);
    let clamped_max = max.min(available);
    if clamped_min == clamped_max {
        clamped_min
    } else {
        rng.random_range(clamped_min..=clamped_max)
    }
}

fn numbered(topics: Vec<String>) -> Vec<ExampleReactionSeed> {
    topics
        .into_iter()
        .zip(1_u64..)
        .map(|(topic, id)| ExampleReactionSeed { id, topic })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    const TEST_REGISTRY_JSON: &str = r#"{
        "version": 1,
        "topics": ["jazz", "hiking", "chess", "sushi", "opera", "rugby"],
        "seeds": [
            {"name": "test-seed", "seed": 42, "userCount": 10},
            {"name": "small-seed", "seed": 123, "userCount": 2}
        ]
    }"#;

    #[fixture]
    fn test_registry() -> SeedRegistry {
        SeedRegistry::from_json(TEST_REGISTRY_JSON).expect("valid test registry")
    }

    fn users_for(registry: &SeedRegistry, seed_name: &str) -> Vec<ExampleUserSeed> {
        let seed_def = registry.find_seed(seed_name).expect("seed should be found");
        generate_example_users(registry, seed_def).expect("generation should succeed")
    }

    #[rstest]
    fn generates_correct_user_count(test_registry: SeedRegistry) {
        assert_eq!(users_for(&test_registry, "test-seed").len(), 10);
    }

    #[rstest]
    fn generation_is_deterministic(test_registry: SeedRegistry) {
        assert_eq!(
            users_for(&test_registry, "test-seed"),
            users_for(&test_registry, "test-seed")
        );
    }

    #[rstest]
    fn different_seeds_produce_different_users(test_registry: SeedRegistry) {
        let first = users_for(&test_registry, "test-seed");
        let second = users_for(&test_registry, "small-seed");

        assert_ne!(
            first.first().map(|u| u.user.clone()),
            second.first().map(|u| u.user.clone())
        );
    }

    #[rstest]
    fn handles_are_valid_and_unique(test_registry: SeedRegistry) {
        let users = users_for(&test_registry, "test-seed");
        let handles: HashSet<_> = users.iter().map(|u| u.user.as_str()).collect();

        assert_eq!(handles.len(), users.len());
        for user in &users {
            assert!(is_valid_user_handle(&user.user), "invalid handle {}", user.user);
        }
    }

    #[rstest]
    fn likes_and_dislikes_never_overlap(test_registry: SeedRegistry) {
        for user in users_for(&test_registry, "test-seed") {
            let liked: HashSet<_> = user.likes.iter().map(|r| r.topic.as_str()).collect();
            assert!(
                user.dislikes.iter().all(|r| !liked.contains(r.topic.as_str())),
                "overlapping topics for {}",
                user.user
            );
        }
    }

    #[rstest]
    fn reaction_counts_stay_within_bounds(test_registry: SeedRegistry) {
        for user in users_for(&test_registry, "test-seed") {
            assert!((MIN_LIKES..=MAX_LIKES).contains(&user.likes.len()));
            assert!(user.dislikes.len() <= MAX_DISLIKES);
        }
    }

    #[rstest]
    fn reaction_ids_count_up_from_one(test_registry: SeedRegistry) {
        for user in users_for(&test_registry, "test-seed") {
            let ids: Vec<u64> = user.likes.iter().map(|r| r.id).collect();
            let expected: Vec<u64> = (1..=user.likes.len() as u64).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn single_topic_registry_yields_likes_only() {
        let json = r#"{
            "version": 1,
            "topics": ["jazz"],
            "seeds": [{"name": "solo", "seed": 7, "userCount": 3}]
        }"#;
        let registry = SeedRegistry::from_json(json).expect("valid registry");

        for user in users_for(&registry, "solo") {
            assert_eq!(user.likes.len(), 1);
            assert!(user.dislikes.is_empty());
        }
    }

    #[test]
    fn pick_count_clamps_to_available() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let count = pick_count(&mut rng, 1, 3, 2);
            assert!((1..=2).contains(&count));
        }
        assert_eq!(pick_count(&mut rng, 1, 3, 0), 0);
    }
}
