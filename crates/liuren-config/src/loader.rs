// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `/etc/liuren/liuren.toml` < `~/.config/liuren/liuren.toml`
//! < `./liuren.toml`, with `LIUREN_` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use tracing::debug;

use crate::model::LiurenConfig;

const SYSTEM_CONFIG: &str = "/etc/liuren/liuren.toml";
const LOCAL_CONFIG: &str = "liuren.toml";

/// Config files in merge order, lowest precedence first.
///
/// All paths are absolute so they match the source paths figment reports.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("liuren").join(LOCAL_CONFIG));
    }
    paths.push(absolute_path(Path::new(LOCAL_CONFIG)));
    paths
}

/// Resolves `path` against the working directory, leaving it as-is on failure.
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<LiurenConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<LiurenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LiurenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LiurenConfig, figment::Error> {
    debug!(path = %path.display(), "loading configuration");
    Figment::new()
        .merge(Serialized::defaults(LiurenConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    let paths = config_paths();
    debug!(?paths, "loading configuration");
    paths.into_iter().fold(
        Figment::new().merge(Serialized::defaults(LiurenConfig::default())),
        |figment, path| figment.merge(Toml::file(path)),
    )
    .merge(env_provider())
}

/// Environment provider with explicit section mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that
/// `LIUREN_DASHSCOPE_API_KEY` maps to `dashscope.api_key`, not
/// `dashscope.api.key`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("LIUREN_").map(|key| {
        key.as_str()
            .to_ascii_lowercase()
            .replacen("server_", "server.", 1)
            .replacen("dashscope_", "dashscope.", 1)
            .into()
    })
}
