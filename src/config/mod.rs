use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{validate_path, Validate};

/// 資料檔案位置設定。預設值對應原系統的檔名。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base directory for all data files; hosts build their storage
    /// backend from it.
    pub data_dir: String,
    pub students_file: String,
    pub instructors_file: String,
    pub courses_file: String,
    pub snapshot_file: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            students_file: "students.csv".to_string(),
            instructors_file: "instructors.csv".to_string(),
            courses_file: "courses.csv".to_string(),
            snapshot_file: "registry.json".to_string(),
        }
    }
}

impl RegistryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RegistryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_path("students_file", &self.students_file)?;
        validate_path("instructors_file", &self.instructors_file)?;
        validate_path("courses_file", &self.courses_file)?;
        validate_path("snapshot_file", &self.snapshot_file)?;
        Ok(())
    }
}
