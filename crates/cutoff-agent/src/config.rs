//! Tracker configuration: region tier sizes, credential and runtime knobs.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (applied in `main`)
//! 2. Environment variables (`CUTOFF_*`)
//! 3. Built-in defaults, including the embedded `cutoffs.toml`
//!
//! The API credential is only ever read from `RIOT_API_KEY`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ladder::{Credential, CutoffFloors, QueueSizes, RegionConfig, TierSizes};
use thiserror::Error;

/// Region table compiled into the binary.
const BUILTIN_REGIONS: &str = include_str!("../cutoffs.toml");

/// Default ranked API host; requests go to `https://{region}.{host}`.
pub const DEFAULT_API_HOST: &str = "api.riotgames.com";
const DEFAULT_OUTPUT_DIR: &str = "cdn";
const DEFAULT_INTERVAL_SECS: u64 = 60;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_KEY: &str = "RIOT_API_KEY";
const ENV_API_HOST: &str = "CUTOFF_API_HOST";
const ENV_API_GATEWAY: &str = "CUTOFF_API_GATEWAY";
const ENV_OUTPUT_DIR: &str = "CUTOFF_OUTPUT_DIR";
const ENV_INTERVAL_SECS: &str = "CUTOFF_INTERVAL_SECS";
const ENV_TIMEOUT_SECS: &str = "CUTOFF_TIMEOUT_SECS";
const ENV_CONFIG: &str = "CUTOFF_CONFIG";

/// Startup configuration errors. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RIOT_API_KEY environment variable is required")]
    MissingCredential,

    #[error("failed to read region config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse region config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid region config: {0}")]
    Invalid(String),

    #[error("region config lists no regions")]
    Empty,
}

/// Runtime configuration of the tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Region id → tier sizes for both queues.
    pub regions: RegionConfig,
    /// Root of the published snapshot tree.
    pub output_dir: PathBuf,
    /// Delay between ticks.
    pub interval: Duration,
    /// Per-request deadline for league page fetches.
    pub request_timeout: Duration,
    /// Ranked API host suffix.
    pub api_host: String,
    /// Single base URL fronting every region; takes precedence over `api_host`.
    pub api_gateway: Option<String>,
    pub floors: CutoffFloors,
}

impl TrackerConfig {
    /// Build from environment variables with built-in defaults.
    ///
    /// Regions come from the file named by `CUTOFF_CONFIG` if set, else from
    /// the embedded table.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(None)
    }

    /// Like [`from_env`](Self::from_env), but a `regions_path` given here
    /// takes precedence over `CUTOFF_CONFIG`.
    pub fn from_env_with(regions_path: Option<&Path>) -> Result<Self, ConfigError> {
        let regions = match regions_file(regions_path, std::env::var(ENV_CONFIG).ok()) {
            Some(path) => load_regions(&path)?,
            None => builtin_regions()?,
        };

        Ok(Self {
            regions,
            output_dir: std::env::var(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            interval: Duration::from_secs(env_u64(ENV_INTERVAL_SECS, DEFAULT_INTERVAL_SECS)),
            request_timeout: Duration::from_secs(env_u64(ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS)),
            api_host: std::env::var(ENV_API_HOST)
                .ok()
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            api_gateway: std::env::var(ENV_API_GATEWAY).ok().filter(|g| !g.is_empty()),
            floors: CutoffFloors::default(),
        })
    }

    /// Check the knobs that TOML validation does not cover.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::Invalid("tick interval must be positive".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid("request timeout must be positive".into()));
        }
        validate_regions(&self.regions)
    }
}

/// Read the API credential from `RIOT_API_KEY`.
pub fn credential_from_env() -> Result<Credential, ConfigError> {
    credential_from(std::env::var(ENV_API_KEY).ok())
}

/// Accept a credential value, rejecting a missing or blank one.
pub fn credential_from(value: Option<String>) -> Result<Credential, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(Credential::new(key.trim())),
        _ => Err(ConfigError::MissingCredential),
    }
}

/// The region table embedded in the binary.
pub fn builtin_regions() -> Result<RegionConfig, ConfigError> {
    parse_regions(BUILTIN_REGIONS)
}

/// Load and validate a region table from a TOML file.
pub fn load_regions(path: &Path) -> Result<RegionConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_regions(&content)
}

/// Parse and validate a region table.
///
/// ```toml
/// [EUW1.solo_duo]
/// challenger = 300
/// grandmaster = 700
///
/// [EUW1.flex]
/// challenger = 200
/// grandmaster = 500
/// ```
pub fn parse_regions(content: &str) -> Result<RegionConfig, ConfigError> {
    let regions: RegionConfig = toml::from_str(content)?;
    validate_regions(&regions)?;
    Ok(regions)
}

/// Region table file to load, if any: an explicit path wins over the env value.
fn regions_file(explicit: Option<&Path>, env: Option<String>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => env.filter(|p| !p.is_empty()).map(PathBuf::from),
    }
}

fn validate_regions(regions: &RegionConfig) -> Result<(), ConfigError> {
    if regions.is_empty() {
        return Err(ConfigError::Empty);
    }
    for (region, sizes) in regions {
        if region.trim().is_empty() {
            return Err(ConfigError::Invalid("empty region id".into()));
        }
        check_sizes(region, "solo_duo", sizes.solo_duo)?;
        check_sizes(region, "flex", sizes.flex)?;
    }
    Ok(())
}

fn check_sizes(region: &str, queue: &str, sizes: TierSizes) -> Result<(), ConfigError> {
    if sizes.challenger == 0 || sizes.grandmaster == 0 {
        return Err(ConfigError::Invalid(format!(
            "{region}.{queue}: tier sizes must be positive (challenger = {}, grandmaster = {})",
            sizes.challenger, sizes.grandmaster
        )));
    }
    Ok(())
}

fn env_u64(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, value = %raw, default, "ignoring unparsable value");
            default
        }),
        Err(_) => default,
    }
}

/// Convenience for tests and callers assembling a table by hand.
pub fn region_table<'a>(
    entries: impl IntoIterator<Item = (&'a str, QueueSizes)>,
) -> RegionConfig {
    entries
        .into_iter()
        .map(|(region, sizes)| (region.to_string(), sizes))
        .collect()
}
