//! Deterministic example users for the likeboard demo.
//!
//! This crate generates believable, reproducible users together with their
//! like and dislike records from a JSON seed registry. It does not depend on
//! the application's domain types; callers convert the generated seeds at
//! the point of use.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON files
//! - Deterministic user generation using named seeds
//! - User handle validation matching the URL segment rules
//! - Disjoint like and dislike topics drawn from the registry
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_users};
//!
//! let json = r#"{
//!     "version": 1,
//!     "topics": ["jazz", "hiking", "chess", "sushi"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "userCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let users = generate_example_users(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(users.len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_users;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{ExampleReactionSeed, ExampleUserSeed};
pub use validation::{USER_HANDLE_MAX, USER_HANDLE_MIN, is_valid_user_handle};
