use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_orderdesk_home, orderdesk_home};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub references: ReferenceSection,
    pub viewer: ViewerSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceSection {
    pub broker_master: PathBuf,
    pub scheme_master: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSection {
    /// Folder the viewer lists spreadsheets from.
    pub source_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub dir: PathBuf,
    /// Processed files default to `<prefix>_<YYYYMMDDHHMM>.xlsx`.
    pub prefix: String,
}

impl Default for ReferenceSection {
    fn default() -> Self {
        Self {
            broker_master: PathBuf::from("Broker_Master.csv"),
            scheme_master: PathBuf::from("Scheme_Master.csv"),
        }
    }
}

impl Default for ViewerSection {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("Source_Files"),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: orderdesk_ingest::export::DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

/// `--config` when given, else `~/.orderdesk/config.toml`.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(orderdesk_home()?.join("config.toml")),
    }
}

/// Missing file means defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => ensure_orderdesk_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&p, &Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.viewer.source_dir, PathBuf::from("Source_Files"));
        assert_eq!(cfg.output.prefix, "Buy");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[viewer]\nsource_dir = \"/data/trader_upload\"\n").unwrap();

        let cfg = load_config(&p).unwrap();
        assert_eq!(cfg.viewer.source_dir, PathBuf::from("/data/trader_upload"));
        assert_eq!(cfg.references, ReferenceSection::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.output.prefix = "Sell".to_string();
        save_config(&p, &cfg).unwrap();
        assert_eq!(load_config(&p).unwrap(), cfg);
    }
}
