use crate::skills;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub map: MapConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub data_csv: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Roughly the middle of the Indonesian archipelago.
        Self {
            center_lat: -2.945311,
            center_lng: 119.579316,
            zoom: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub export_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchingConfig {
    pub default_core: Vec<String>,
    pub default_soft: Vec<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_core: vec!["python".into(), "pentaho".into(), "sql".into()],
            default_soft: vec!["communication".into()],
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Default selections must come from the multiselect options.
    pub fn validate(&self) -> Result<()> {
        for skill in &self.matching.default_core {
            if !skills::CORE_MATCH_SKILLS.contains(&skill.as_str()) {
                bail!("matching.default_core: '{}' is not a core skill", skill);
            }
        }
        for skill in &self.matching.default_soft {
            if !skills::SOFT_MATCH_SKILLS.contains(&skill.as_str()) {
                bail!("matching.default_soft: '{}' is not a soft skill", skill);
            }
        }
        if !(-90.0..=90.0).contains(&self.map.center_lat)
            || !(-180.0..=180.0).contains(&self.map.center_lng)
        {
            bail!(
                "map center ({}, {}) is not a valid coordinate",
                self.map.center_lat,
                self.map.center_lng
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [input]
        data_csv = "input_2.csv"

        [server]
        port = 8501
    "#;

    #[test]
    fn minimal_config_fills_defaults() {
        let config = AppConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.input.data_csv, PathBuf::from("input_2.csv"));
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert_eq!(config.server.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.map.zoom, 5);
        assert_eq!(config.matching.default_core, vec!["python", "pentaho", "sql"]);
        assert_eq!(config.matching.default_soft, vec!["communication"]);
    }

    #[test]
    fn unknown_default_skill_is_rejected() {
        let content = format!(
            "{MINIMAL}\n[matching]\ndefault_core = [\"python\", \"cobol\"]\ndefault_soft = []\n"
        );
        let err = AppConfig::from_toml(&content).unwrap_err();
        assert!(err.to_string().contains("cobol"), "got: {err}");
    }

    #[test]
    fn soft_skill_in_core_defaults_is_rejected() {
        let content = format!(
            "{MINIMAL}\n[matching]\ndefault_core = [\"english\"]\ndefault_soft = []\n"
        );
        assert!(AppConfig::from_toml(&content).is_err());
    }

    #[test]
    fn missing_server_section_fails() {
        let content = "[input]\ndata_csv = \"jobs.csv\"\n";
        assert!(AppConfig::from_toml(content).is_err());
    }
}
