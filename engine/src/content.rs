use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::catalog::{Catalog, MonsterEntry};
use crate::search::SearchConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Json,
    Yaml,
}

impl ContentFormat {
    /// `.yaml`/`.yml` are YAML, anything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => ContentFormat::Yaml,
            _ => ContentFormat::Json,
        }
    }
}

/// A catalog file is a plain list of `{name, challenge_rating, creature_type}`.
pub fn parse_catalog(text: &str, format: ContentFormat) -> Result<Catalog> {
    let entries: Vec<MonsterEntry> = match format {
        ContentFormat::Json => serde_json::from_str(text).context("failed to parse catalog JSON")?,
        ContentFormat::Yaml => serde_yaml::from_str(text).context("failed to parse catalog YAML")?,
    };
    Ok(Catalog::from_entries(entries))
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog: {}", path.display()))?;
    parse_catalog(&text, ContentFormat::from_path(path))
        .with_context(|| format!("in catalog file {}", path.display()))
}

pub fn parse_search_config(text: &str, format: ContentFormat) -> Result<SearchConfig> {
    let cfg: SearchConfig = match format {
        ContentFormat::Json => serde_json::from_str(text).context("failed to parse search config JSON")?,
        ContentFormat::Yaml => serde_yaml::from_str(text).context("failed to parse search config YAML")?,
    };
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_search_config(path: &Path) -> Result<SearchConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read search config: {}", path.display()))?;
    parse_search_config(&text, ContentFormat::from_path(path))
        .with_context(|| format!("in search config file {}", path.display()))
}
