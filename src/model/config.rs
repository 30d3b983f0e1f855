use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULTS: &str = include_str!("../../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub directive: DirectiveConfig,
    pub scan: ScanConfig,
    pub log: LogConfig,
}

/// How plugin directives are recognised in build-file comments.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectiveConfig {
    pub prefix: String,
    pub keyword: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub filter: String,
    pub to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULTS).expect("embedded default config is valid")
    }
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config → explicit file.
    ///
    /// Layers are merged key by key, so a user file only needs the keys it
    /// changes.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut layers = vec![DEFAULTS.to_string()];

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                layers.push(read_layer(&user_path)?);
            }
        }

        if let Some(path) = explicit {
            layers.push(read_layer(path)?);
        }

        Self::from_layers(layers.as_slice())
    }

    /// Merge TOML documents in order, later keys winning.
    pub fn from_layers<S: AsRef<str>>(layers: &[S]) -> Result<Self> {
        let mut merged = toml::Table::new();
        for layer in layers {
            let table: toml::Table = toml::from_str(layer.as_ref())?;
            merge_tables(&mut merged, table);
        }

        let config = toml::Value::Table(merged).try_into()?;
        Ok(config)
    }

    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "protoplug")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn log_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "protoplug")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("protoplug"))
    }
}

fn read_layer(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
