use crate::utils::error::{GnssError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PATTERN: &str = "YYYY-MM-DD HH:mm:ss.ccc";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pattern: Option<String>,
    pub offset_hours: Option<i32>,
    pub offset_minutes: Option<i32>,
    pub json: Option<bool>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pattern: Some(DEFAULT_PATTERN.to_string()),
            offset_hours: None,
            offset_minutes: None,
            json: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub systems: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            systems: "*".to_string(),
        }
    }
}

impl Settings {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GnssError::IoError)?;
        tracing::debug!("Loaded settings from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| GnssError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${GNSS_PATTERN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| GnssError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn pattern(&self) -> &str {
        self.output.pattern.as_deref().unwrap_or(DEFAULT_PATTERN)
    }

    pub fn offset(&self) -> (i32, i32) {
        (
            self.output.offset_hours.unwrap_or(0),
            self.output.offset_minutes.unwrap_or(0),
        )
    }

    pub fn json(&self) -> bool {
        self.output.json.unwrap_or(false)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        let pattern = validation::validate_required_field("output.pattern", &self.output.pattern)?;
        validation::validate_non_empty_string("output.pattern", pattern)?;
        let (hours, minutes) = self.offset();
        validation::validate_offset(hours, minutes)?;
        validation::validate_system_codes("filter.systems", &self.filter.systems)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_settings() {
        let toml_content = r#"
[output]
pattern = "YYYY DDDD"
offset_hours = 3
json = true

[filter]
systems = "GR"
"#;

        let settings = Settings::from_toml_str(toml_content).unwrap();

        assert_eq!(settings.pattern(), "YYYY DDDD");
        assert_eq!(settings.offset(), (3, 0));
        assert!(settings.json());
        assert_eq!(settings.filter.systems, "GR");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.pattern(), DEFAULT_PATTERN);
        assert_eq!(settings.offset(), (0, 0));
        assert!(!settings.json());
        assert_eq!(settings.filter.systems, "*");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GNSS_KIT_TEST_SYSTEMS", "EC");

        let toml_content = r#"
[filter]
systems = "${GNSS_KIT_TEST_SYSTEMS}"
"#;

        let settings = Settings::from_toml_str(toml_content).unwrap();
        assert_eq!(settings.filter.systems, "EC");

        std::env::remove_var("GNSS_KIT_TEST_SYSTEMS");
    }

    #[test]
    fn test_settings_validation() {
        let settings = Settings::from_toml_str("[output]\noffset_hours = 20\n").unwrap();
        assert!(settings.validate().is_err());

        let settings = Settings::from_toml_str("[filter]\nsystems = \"GQ\"\n").unwrap();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Settings::from_toml_str("[output\n").unwrap_err();
        assert!(matches!(err, GnssError::ConfigError { .. }));
    }

    #[test]
    fn test_settings_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npattern = \"YY-M-D\"\n")
            .unwrap();

        let settings = Settings::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.pattern(), "YY-M-D");
    }
}
