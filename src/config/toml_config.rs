use crate::core::{ConfigProvider, FailurePolicy, Projection};
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub report: Option<ReportConfig>,
    pub error_handling: Option<ErrorHandlingConfig>,
    #[serde(default)]
    pub projections: Vec<ProjectionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub data_path: String,
    pub base_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub featured: Option<usize>,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_invalid: Option<FailurePolicy>,
}

/// One `[[projections]]` table. Exactly one of the two lists must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
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

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CatalogError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn base_dir(&self) -> &str {
        self.source.base_dir.as_deref().unwrap_or(".")
    }
}

impl ConfigProvider for TomlConfig {
    fn data_path(&self) -> &str {
        &self.source.data_path
    }

    fn output_path(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.output_path.as_deref())
    }

    fn failure_policy(&self) -> FailurePolicy {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_invalid)
            .unwrap_or_default()
    }

    fn featured_index(&self) -> usize {
        self.report.as_ref().and_then(|r| r.featured).unwrap_or(1)
    }

    fn projections(&self) -> Result<Vec<Projection>> {
        self.projections
            .iter()
            .map(|p| Projection::from_parts(p.include.clone(), p.exclude.clone()))
            .collect()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source.data_path", &self.source.data_path)?;
        validation::validate_file_extension(
            "source.data_path",
            &self.source.data_path,
            &["json"],
        )?;
        validation::validate_path("source.base_dir", self.base_dir())?;

        if let Some(output) = self.output_path() {
            validation::validate_path("report.output_path", output)?;
        }

        for (i, projection) in self.projections()?.iter().enumerate() {
            validation::validate_projection(&format!("projections[{}]", i), projection)?;
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
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
data_path = "books.json"
base_dir = "./fixtures"

[report]
featured = 0
output_path = "out"

[error_handling]
on_invalid = "skip"

[[projections]]
exclude = ["price"]

[[projections]]
include = ["price", "publisher"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_path(), "books.json");
        assert_eq!(config.base_dir(), "./fixtures");
        assert_eq!(config.featured_index(), 0);
        assert_eq!(config.output_path(), Some("out"));
        assert_eq!(config.failure_policy(), FailurePolicy::Skip);
        assert_eq!(
            config.projections().unwrap(),
            vec![
                Projection::exclude(["price"]),
                Projection::include(["price", "publisher"]),
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = TomlConfig::from_toml_str("[source]\ndata_path = \"data.json\"\n").unwrap();

        assert_eq!(config.base_dir(), ".");
        assert_eq!(config.featured_index(), 1);
        assert_eq!(config.failure_policy(), FailurePolicy::Abort);
        assert!(config.output_path().is_none());
        assert!(config.projections().unwrap().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BOOK_CATALOG_TEST_DATA", "from-env.json");

        let config =
            TomlConfig::from_toml_str("[source]\ndata_path = \"${BOOK_CATALOG_TEST_DATA}\"\n")
                .unwrap();
        assert_eq!(config.data_path(), "from-env.json");

        std::env::remove_var("BOOK_CATALOG_TEST_DATA");
    }

    #[test]
    fn test_projection_with_both_lists_is_rejected() {
        let toml_content = r#"
[source]
data_path = "data.json"

[[projections]]
include = ["title"]
exclude = ["price"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CatalogError::InvalidProjection { .. })
        ));
    }

    #[test]
    fn test_unknown_projection_field_is_rejected() {
        let toml_content = r#"
[source]
data_path = "data.json"

[[projections]]
include = ["pages"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CatalogError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[source]\ndata_path = \"catalog.json\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_path(), "catalog.json");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[source"),
            Err(CatalogError::ConfigError { .. })
        ));
    }
}
