//! Server configuration.
//!
//! Everything is read from `ROUTE_SERVER_*` environment variables with
//! sensible defaults, so the binary runs with no configuration at all.

use std::net::SocketAddr;
use std::str::FromStr;

use tracing::warn;

use crate::engine::SnapOptions;

const BIND_VAR: &str = "ROUTE_SERVER_BIND";
const CACHE_SIZE_VAR: &str = "ROUTE_SERVER_CACHE_SIZE";
const SNAP_RADIUS_VAR: &str = "ROUTE_SERVER_SNAP_RADIUS";
const SNAP_REACHABILITY_VAR: &str = "ROUTE_SERVER_SNAP_REACHABILITY";

/// Runtime configuration of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Capacity of the projection cache, in anchored locations.
    pub cache_size: usize,
    /// Snap search radius in meters; 0 keeps the engine's default.
    pub snap_radius_m: u32,
    /// Minimum reachable-edge count for a snap candidate; 0 keeps the
    /// engine's default.
    pub snap_min_reachability: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cache_size: 100_000,
            snap_radius_m: 0,
            snap_min_reachability: 0,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Unset variables keep their defaults; unparseable values are logged
    /// and keep their defaults too, rather than refusing to start. A zero
    /// cache size counts as unparseable, since the projection cache cannot
    /// be empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let cache_size = match env_value(&lookup, CACHE_SIZE_VAR, defaults.cache_size) {
            0 => {
                warn!(key = CACHE_SIZE_VAR, "Ignoring zero cache size");
                defaults.cache_size
            }
            size => size,
        };
        Self {
            bind: env_value(&lookup, BIND_VAR, defaults.bind),
            cache_size,
            snap_radius_m: env_value(&lookup, SNAP_RADIUS_VAR, defaults.snap_radius_m),
            snap_min_reachability: env_value(
                &lookup,
                SNAP_REACHABILITY_VAR,
                defaults.snap_min_reachability,
            ),
        }
    }

    /// The snap options every projection call will use.
    pub fn snap_options(&self) -> SnapOptions {
        SnapOptions {
            radius_m: self.snap_radius_m,
            min_reachability: self.snap_min_reachability,
        }
    }
}

fn env_value<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, "Ignoring unparseable configuration value");
                default
            }
        },
    }
}
