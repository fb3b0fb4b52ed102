//! Layered Configuration Loading
//!
//! Loads a TOML base file, an optional `config/environments/<env>.toml`
//! override next to it, then `SIGNALS__` prefixed environment variables.
//! Any section absent from every layer keeps its built-in default.

use crate::metadata::CoinMetadata;
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config/signals.toml";
pub const ENV_PREFIX: &str = "SIGNALS";

/// Load any deserialisable settings type through the file/env layers
pub fn load_layered<T: DeserializeOwned>(
    base_path: Option<&Path>,
    environment: Option<&str>,
) -> Result<T> {
    let base = base_path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
    info!("Loading signal configuration: {:?}", base);

    let mut builder = Config::builder().add_source(
        File::from(base)
            .format(FileFormat::Toml)
            .required(true),
    );

    if let Some(env) = environment {
        let env_file = environment_file(base, env);
        if env_file.exists() {
            info!("Loading environment config: {:?}", env_file);
            builder = builder.add_source(File::from(env_file).format(FileFormat::Toml));
        } else {
            warn!("Environment config not found: {:?}", env_file);
        }
    }

    // SIGNALS__METADATA__... style overrides
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

fn environment_file(base: &Path, env: &str) -> PathBuf {
    base.parent()
        .unwrap_or(Path::new("."))
        .join("environments")
        .join(format!("{env}.toml"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct MetadataFile {
    #[serde(default)]
    metadata: Option<CoinMetadata>,
}

impl CoinMetadata {
    /// Read the `[metadata]` section, falling back to the built-in universe
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let file: MetadataFile = load_layered(base_path, environment)?;
        let metadata = match file.metadata {
            Some(metadata) => metadata,
            None => {
                debug!("No [metadata] section, using built-in coin universe");
                CoinMetadata::default()
            }
        };
        metadata
            .validate()
            .context("Invalid coin metadata configuration")?;
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::CoinSpec;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_metadata_section() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("signals.toml");

        let config_content = r#"
[[metadata.targets]]
symbol = "WIF"
timeframe = "1H"

[[metadata.anchors]]
symbol = "ETH"
timeframe = "4H"

[[metadata.anchors]]
symbol = "BTC"
timeframe = "1H"
"#;

        fs::write(&config_path, config_content).unwrap();

        let metadata = CoinMetadata::load(Some(&config_path), None).unwrap();

        assert_eq!(metadata.targets, vec![CoinSpec::new("WIF", "1H")]);
        assert_eq!(metadata.primary_anchor(), Some(&CoinSpec::new("ETH", "4H")));
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("signals.toml");
        fs::write(&config_path, "[strategy]\nfast_window = 3\n").unwrap();

        let metadata = CoinMetadata::load(Some(&config_path), None).unwrap();
        assert_eq!(metadata, CoinMetadata::default());
    }

    #[test]
    fn test_environment_override_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("signals.toml");
        fs::write(
            &config_path,
            "[[metadata.targets]]\nsymbol = \"BONK\"\ntimeframe = \"1H\"\n\n[[metadata.anchors]]\nsymbol = \"BTC\"\ntimeframe = \"1H\"\n",
        )
        .unwrap();

        fs::create_dir(dir.path().join("environments")).unwrap();
        fs::write(
            dir.path().join("environments").join("staging.toml"),
            "[[metadata.anchors]]\nsymbol = \"SOL\"\ntimeframe = \"4H\"\n",
        )
        .unwrap();

        let metadata = CoinMetadata::load(Some(&config_path), Some("staging")).unwrap();
        assert_eq!(metadata.primary_anchor(), Some(&CoinSpec::new("SOL", "4H")));
    }

    #[test]
    fn test_missing_base_file_fails() {
        let dir = tempdir().unwrap();
        let result = CoinMetadata::load(Some(&dir.path().join("absent.toml")), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_metadata_rejected() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("signals.toml");
        fs::write(
            &config_path,
            r#"
[[metadata.targets]]
symbol = "DOGE"
timeframe = "2H"

[[metadata.targets]]
symbol = "DOGE"
timeframe = "2H"

[[metadata.anchors]]
symbol = "BTC"
timeframe = "1H"
"#,
        )
        .unwrap();

        assert!(CoinMetadata::load(Some(&config_path), None).is_err());
    }
}
