use anyhow::Context;
use graha::EngineConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "GRAHA_CONFIG";

/// Relative locations tried when no explicit path is given: the workspace root
/// and two levels up, for binaries run from `apps/<name>`.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/graha.toml", "../../configs/graha.toml"];

/// Config file to load: `$GRAHA_CONFIG` when set (even if it does not exist,
/// so a typo surfaces as an error), else the first default path present.
pub fn find_config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CONFIG_ENV_VAR) {
        if !p.is_empty() {
            return Some(PathBuf::from(p));
        }
    }
    DEFAULT_CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

pub fn read_config_toml_text() -> anyhow::Result<String> {
    let Some(path) = find_config_path() else {
        anyhow::bail!(
            "Could not find graha.toml (set {} or create one of {:?})",
            CONFIG_ENV_VAR,
            DEFAULT_CONFIG_PATHS
        );
    };
    fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse and validate a TOML document. Missing sections and keys keep their
/// defaults.
pub fn parse_engine_config(text: &str) -> anyhow::Result<EngineConfig> {
    let config: EngineConfig =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse graha.toml: {e}"))?;
    config.validate()?;
    Ok(config)
}

pub fn load_engine_config() -> anyhow::Result<EngineConfig> {
    parse_engine_config(&read_config_toml_text()?)
}

pub fn load_engine_config_from(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_engine_config(&text).with_context(|| format!("Invalid config in {}", path.display()))
}

/// Like [`load_engine_config`], but falls back to the built-in defaults when no
/// config file exists. A file that exists and fails to parse is still an error.
pub fn load_engine_config_or_default() -> anyhow::Result<EngineConfig> {
    match find_config_path() {
        Some(path) => {
            log::debug!("Loading engine config from {}", path.display());
            load_engine_config_from(&path)
        }
        None => {
            log::debug!("No graha.toml found, using built-in defaults");
            Ok(EngineConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graha::{AspectKind, Planet};
    use std::io::Write;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = parse_engine_config("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_sections_override() {
        let text = r#"
[orbs]
conjunction = 10.0
opposition = 8.0
trine = 7.0
square = 7.0
sextile = 5.0

[shadbala.required_rupas]
sun = 6.5
moon = 6.0
mars = 5.0
mercury = 7.0
jupiter = 6.5
venus = 5.5
saturn = 4.0

[transit]
max_horizon_days = 365

[rectification]
step_minutes = 1
time_budget_ms = 2000
"#;
        let config = parse_engine_config(text).unwrap();
        assert_eq!(config.orbs.max_orb(AspectKind::Conjunction), Some(10.0));
        assert_eq!(config.shadbala.required_rupas.required_rupas(Planet::Saturn), Some(4.0));
        assert_eq!(config.transit.max_horizon_days, 365);
        assert_eq!(config.transit.default_horizon_days, 30);
        assert_eq!(config.rectification.step_minutes, 1);
        assert_eq!(config.rectification.time_budget_ms, Some(2000));
        assert_eq!(config.rectification.max_concurrency, 8);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse_engine_config("[rectification]\nstep_minutes = 0\n").is_err());
        assert!(parse_engine_config("[transit]\ndefault_horizon_days = 0\n").is_err());
        assert!(parse_engine_config("[orbs]\nconjunction = 20.0\n").is_err());
        assert!(parse_engine_config("not toml = = =").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rectification]\nmax_window_minutes = 90").unwrap();
        let config = load_engine_config_from(file.path()).unwrap();
        assert_eq!(config.rectification.max_window_minutes, 90);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_engine_config_from(&dir.path().join("graha.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let text = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/graha.toml")).unwrap();
        assert_eq!(parse_engine_config(&text).unwrap(), EngineConfig::default());
    }
}
