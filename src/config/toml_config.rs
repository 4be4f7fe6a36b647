use crate::utils::error::{DrugNetError, Result};
use crate::utils::validation::{
    validate_one_of, validate_path, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub export_path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DrugNetError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DRUGNET_URL})；引用到未設定的變數時回報 MissingConfigError
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DrugNetError::ConfigError {
            message: format!("env var pattern: {}", e),
        })?;

        let mut missing: Option<String> = None;
        let result = re
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| {
                    missing.get_or_insert_with(|| var_name.to_string());
                    caps[0].to_string()
                })
            })
            .to_string();

        match missing {
            Some(var_name) => Err(DrugNetError::MissingConfigError {
                field: format!("environment variable {}", var_name),
            }),
            None => Ok(result),
        }
    }

    pub fn base_url(&self) -> Option<&str> {
        self.api.as_ref().and_then(|a| a.base_url.as_deref())
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.api.as_ref().and_then(|a| a.timeout_seconds)
    }

    pub fn headers(&self) -> Option<&HashMap<String, String>> {
        self.api.as_ref().and_then(|a| a.headers.as_ref())
    }

    pub fn format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.format.as_deref())
    }

    pub fn export_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.export_path.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = self.base_url() {
            validate_url("api.base_url", base_url)?;
        }
        if let Some(timeout) = self.timeout_seconds() {
            validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }
        if let Some(format) = self.format() {
            validate_one_of("output.format", format, &OUTPUT_FORMATS)?;
        }
        if let Some(export_path) = self.export_path() {
            validate_path("output.export_path", export_path)?;
        }
        Ok(())
    }
}
