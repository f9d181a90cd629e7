use crate::core::ConfigProvider;
use crate::utils::error::{CompareError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub inputs: InputsConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    pub reference_path: Option<String>,
    pub candidate_path: Option<String>,
    pub base_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| CompareError::ConfigError {
            message: format!("cannot read '{}': {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CompareError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn base_dir(&self) -> Option<&str> {
        self.inputs.base_dir.as_deref()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn reference_path(&self) -> &str {
        self.inputs
            .reference_path
            .as_deref()
            .unwrap_or(super::DEFAULT_REFERENCE_PATH)
    }

    fn candidate_path(&self) -> &str {
        self.inputs
            .candidate_path
            .as_deref()
            .unwrap_or(super::DEFAULT_CANDIDATE_PATH)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("inputs.reference_path", self.reference_path())?;
        validation::validate_path("inputs.candidate_path", self.candidate_path())?;
        if let Some(base_dir) = self.base_dir() {
            validation::validate_path("inputs.base_dir", base_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[inputs]
reference_path = "ref.bin"
candidate_path = "out/cand.bin"
base_dir = "/data"

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.reference_path(), "ref.bin");
        assert_eq!(config.candidate_path(), "out/cand.bin");
        assert_eq!(config.base_dir(), Some("/data"));
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_paths_fall_back_to_defaults() {
        let config = TomlConfig::from_toml_str("[inputs]\n").unwrap();

        assert_eq!(config.reference_path(), "chroma74.bin");
        assert_eq!(config.candidate_path(), "last_compressed_img.bin");
        assert!(config.base_dir().is_none());
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BINCMP_TEST_CANDIDATE", "fresh.bin");

        let toml_content = r#"
[inputs]
candidate_path = "${BINCMP_TEST_CANDIDATE}"
reference_path = "${BINCMP_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.candidate_path(), "fresh.bin");
        assert_eq!(config.reference_path(), "${BINCMP_TEST_UNSET_VARIABLE}");

        std::env::remove_var("BINCMP_TEST_CANDIDATE");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[inputs]\nreference_path = \"\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(CompareError::InvalidConfigValueError { field, .. }) if field == "inputs.reference_path"
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[inputs\n"),
            Err(CompareError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[inputs]\nreference_path = \"a.bin\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.reference_path(), "a.bin");
    }

    #[test]
    fn test_config_from_missing_file() {
        assert!(matches!(
            TomlConfig::from_file("/nonexistent/bincmp.toml"),
            Err(CompareError::ConfigError { .. })
        ));
    }
}
