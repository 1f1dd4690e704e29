//! Process configuration, read from the environment once at startup. The
//! binary loads `.env` through `dotenvy` before calling [Config::from_env].

use anyhow::{Context, Result};
use std::{env, net::SocketAddr, time::Duration};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8000";

pub const DEFAULT_UPSTREAM: &str = "https://service.pace-unv.cloud/api";

/// Collection segment appended to the upstream root. The relay forwards
/// beneath `{upstream}/notes`, and the manager lists from the same place.
pub const COLLECTION: &str = "notes";

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    /// Upstream API root, without the collection segment.
    pub upstream: String,
    /// `None` means outbound relay calls may hang forever.
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("NOTES_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .context("NOTES_ADDR is not a socket address")?;
        let upstream =
            lookup("NOTES_UPSTREAM").unwrap_or_else(|| DEFAULT_UPSTREAM.to_string());
        let upstream_timeout = match lookup("NOTES_UPSTREAM_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::from_secs(secs.parse().with_context(
                || format!("NOTES_UPSTREAM_TIMEOUT_SECS={secs} is not a number"),
            )?)),
            None => None,
        };

        Ok(Config {
            addr,
            upstream,
            upstream_timeout,
        })
    }

    /// Base URL the relay forwards sub-paths onto.
    pub fn relay_base(&self) -> String {
        format!("{}/{}", self.upstream, COLLECTION)
    }
}
