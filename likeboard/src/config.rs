//! Application configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LIKEBOARD_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SEED_NAME: &str = "mossy-owl";
const DEFAULT_START_PATH: &str = "/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

fn default_registry_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("example-data")
        .join("seeds.json")
}

/// Runtime settings for the likeboard console.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LIKEBOARD")]
pub struct AppSettings {
    /// Base URL of the user data service. The in-memory directory seeded
    /// from example data is used when absent.
    pub service_url: Option<String>,
    /// Per-request timeout for the HTTP directory, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Initial location, e.g. `/alice`.
    pub start_path: Option<String>,
    /// Seed name to load from the example data registry.
    pub seed_name: Option<String>,
    /// Optional override for the number of generated users.
    pub user_count: Option<usize>,
    /// Optional registry path override.
    pub registry_path: Option<PathBuf>,
    /// Emit logs as JSON rather than human-readable text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl AppSettings {
    /// Return the configured request timeout, falling back to the default.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Return the configured start path, falling back to `/`.
    #[must_use]
    pub fn start_path(&self) -> &str {
        self.start_path.as_deref().unwrap_or(DEFAULT_START_PATH)
    }

    /// Return the configured seed name, falling back to the default.
    #[must_use]
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Return the configured registry path, falling back to the bundled
    /// fixture.
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.registry_path
            .clone()
            .unwrap_or_else(default_registry_path)
    }
}
