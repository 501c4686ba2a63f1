// src/feed/config.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::feed::mix::FeedMix;
use crate::feed::providers::{http::DEFAULT_TIMEOUT_MS, HttpProvider, SampleProvider};
use crate::feed::registry::ProviderRegistry;
use crate::feed::types::ProviderId;

pub const ENV_FEED_CONFIG_PATH: &str = "FEED_CONFIG_PATH";
pub const DEFAULT_FEED_TOML_PATH: &str = "config/feed.toml";
pub const DEFAULT_FEED_JSON_PATH: &str = "config/feed.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedConfig {
    pub mix: Vec<String>,
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderCfg>,
    /// Directory relative fixture paths resolve against; set from the file's location.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProviderCfg {
    Sample,
    Fixture {
        path: PathBuf,
    },
    Http {
        url: String,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for FeedConfig {
    /// Built-in mix backed by generated sample providers.
    fn default() -> Self {
        let mix: Vec<String> = FeedMix::default()
            .entries()
            .iter()
            .map(|id| id.to_string())
            .collect();
        let providers = mix
            .iter()
            .map(|id| (id.clone(), ProviderCfg::Sample))
            .collect();
        Self {
            mix,
            providers,
            base_dir: None,
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.mix.is_empty() {
            bail!("feed config: `mix` must list at least one provider");
        }
        if let Some(blank) = self
            .mix
            .iter()
            .chain(self.providers.keys())
            .find(|s| s.trim().is_empty())
        {
            bail!("feed config: blank provider id {blank:?}");
        }
        let missing: Vec<&str> = self
            .mix
            .iter()
            .filter(|id| !self.providers.contains_key(*id))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            bail!(
                "feed config: mix references providers without a [providers] entry: {}",
                missing.join(", ")
            );
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Validate, then construct the mix and one client per configured provider.
    pub fn build(&self) -> Result<(FeedMix, ProviderRegistry)> {
        self.validate()?;
        let mix = FeedMix::new(self.mix.iter().map(|s| ProviderId::new(s.as_str())).collect())?;

        let mut registry = ProviderRegistry::new();
        for (id, cfg) in &self.providers {
            let pid = ProviderId::new(id.as_str());
            match cfg {
                ProviderCfg::Sample => {
                    registry.insert(pid.clone(), Arc::new(SampleProvider::generated(pid)))
                }
                ProviderCfg::Fixture { path } => registry.insert(
                    pid.clone(),
                    Arc::new(SampleProvider::from_fixture_path(pid, &self.resolve(path))?),
                ),
                ProviderCfg::Http { url, timeout_ms } => registry.insert(
                    pid.clone(),
                    Arc::new(HttpProvider::new(
                        pid,
                        url.as_str(),
                        Duration::from_millis(*timeout_ms),
                    )?),
                ),
            }
        }
        Ok((mix, registry))
    }
}

/// Load feed config from an explicit path. Supports TOML or JSON formats.
pub fn load_feed_config_from(path: &Path) -> Result<FeedConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let mut cfg = parse_feed_config(&content, ext.as_str())
        .with_context(|| format!("parsing feed config {}", path.display()))?;
    cfg.base_dir = path.parent().map(Path::to_path_buf);
    cfg.validate()?;
    Ok(cfg)
}

/// Load feed config using env var + fallbacks:
/// 1) $FEED_CONFIG_PATH
/// 2) config/feed.toml
/// 3) config/feed.json
/// 4) built-in default
pub fn load_feed_config_default() -> Result<FeedConfig> {
    if let Ok(p) = std::env::var(ENV_FEED_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_feed_config_from(&pb);
        } else {
            return Err(anyhow!("FEED_CONFIG_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from(DEFAULT_FEED_TOML_PATH);
    if toml_p.exists() {
        return load_feed_config_from(&toml_p);
    }
    let json_p = PathBuf::from(DEFAULT_FEED_JSON_PATH);
    if json_p.exists() {
        return load_feed_config_from(&json_p);
    }
    tracing::info!(target: "feed", "no feed config found, using built-in default mix");
    Ok(FeedConfig::default())
}

fn parse_feed_config(s: &str, hint_ext: &str) -> Result<FeedConfig> {
    match hint_ext {
        "toml" => Ok(toml::from_str(s)?),
        "json" => Ok(serde_json::from_str(s)?),
        // Unknown extension: JSON documents start with `{`.
        _ if s.trim_start().starts_with('{') => Ok(serde_json::from_str(s)?),
        _ => Ok(toml::from_str(s)?),
    }
}
