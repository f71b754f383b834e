use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::errors::{EnrolmentError, Result};
use crate::submission::DEFAULT_ENDPOINT;
use crate::utils::app_data_dir;

const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Environment variable that overrides the stored endpoint.
pub const ENDPOINT_ENV: &str = "ENROLMENT_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL the finished enrolment is POSTed to.
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
        }
    }
}

impl Config {
    /// Endpoint after applying the environment override.
    pub fn resolved_endpoint(&self) -> String {
        match env::var(ENDPOINT_ENV) {
            Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => self.endpoint.clone(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        validate_endpoint(&config.endpoint)?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(endpoint)
        .map_err(|err| EnrolmentError::Config(format!("invalid endpoint `{endpoint}`: {err}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(EnrolmentError::Config(format!(
            "endpoint must use http or https, got `{other}`"
        ))),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().join("nested")).unwrap();
        let config = Config {
            endpoint: "http://localhost:8080/api/student-enrollment".into(),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn save_rejects_non_http_endpoints() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let err = manager
            .save(&Config {
                endpoint: "ftp://example.com/upload".into(),
            })
            .unwrap_err();
        assert!(matches!(err, EnrolmentError::Config(_)));
        assert!(manager
            .save(&Config {
                endpoint: "not a url".into(),
            })
            .is_err());
    }
}
