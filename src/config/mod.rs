#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http::DEFAULT_BASE_URL;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_one_of, validate_path, validate_positive_number, validate_url, Validate,
};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use toml_config::{TomlConfig, OUTPUT_FORMATS};

pub const DEFAULT_CONFIG_FILE: &str = "drugnet.toml";

/// Effective settings after layering CLI flags over the TOML file over
/// built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub headers: HashMap<String, String>,
    pub format: String,
    pub export_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: None,
            headers: HashMap::new(),
            format: "text".to_string(),
            export_path: ".".to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            base_url: config
                .base_url()
                .map(str::to_string)
                .unwrap_or(defaults.base_url),
            timeout_seconds: config.timeout_seconds(),
            headers: config.headers().cloned().unwrap_or_default(),
            format: config
                .format()
                .map(str::to_string)
                .unwrap_or(defaults.format),
            export_path: config
                .export_path()
                .map(str::to_string)
                .unwrap_or(defaults.export_path),
        }
    }

    /// 讀取設定檔：明確指定的路徑必須存在；沒指定時才找預設檔
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(path) => Some(path),
            None => Some(Path::new(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Ok(Self::from_toml(&config))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        timeout_seconds: Option<u64>,
        format: Option<String>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if timeout_seconds.is_some() {
            self.timeout_seconds = timeout_seconds;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn export_path(&self) -> &str {
        &self.export_path
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_positive_number("timeout", timeout, 1)?;
        }
        validate_one_of("format", &self.format, &OUTPUT_FORMATS)?;
        validate_path("export_path", &self.export_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url(), "http://127.0.0.1:8000");
        assert_eq!(settings.timeout(), None);
        assert_eq!(settings.format(), "text");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_file() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "http://file-host:8000"
timeout_seconds = 30

[output]
format = "json"
"#,
        )
        .unwrap();

        let settings = Settings::from_toml(&config).with_overrides(
            Some("http://flag-host:8000".to_string()),
            None,
            Some("text".to_string()),
        );

        assert_eq!(settings.base_url, "http://flag-host:8000");
        assert_eq!(settings.timeout(), Some(Duration::from_secs(30)));
        assert!(!settings.is_json());
        assert_eq!(settings.export_path, ".");
    }

    #[test]
    fn test_load_explicit_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\nformat = \"json\"\nexport_path = \"./exports\"\n")
            .unwrap();

        let settings = Settings::load(Some(temp_file.path())).unwrap();

        assert!(settings.is_json());
        assert_eq!(settings.export_path(), "./exports");
        assert_eq!(settings.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_settings_as_config_provider() {
        let settings = Settings {
            format: "json".to_string(),
            export_path: "./exports".to_string(),
            ..Default::default()
        };
        let provider: &dyn ConfigProvider = &settings;

        assert!(provider.is_json());
        assert_eq!(provider.export_path(), "./exports");
        assert!(!(&Settings::default() as &dyn ConfigProvider).is_json());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let err = Settings::load(Some(Path::new("/definitely/not/here/drugnet.toml")));
        assert!(matches!(err, Err(crate::utils::error::DrugNetError::Io(_))));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[api]\nbase_url = \"ftp://x\"\n").unwrap();

        assert!(Settings::load(Some(temp_file.path())).is_err());
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let settings = Settings::default().with_overrides(None, Some(0), Some("xml".to_string()));
        assert!(settings.validate().is_err());
    }
}
