use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::adapters::supabase::DEFAULT_TABLE;
use crate::core::prompt::DEFAULT_SYSTEM_INSTRUCTION;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SermonError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_NEWSLETTER_URL: &str = "https://docs.google.com/spreadsheets/d/1CDALlD2V_Rm_cSaabZCEVIa2LMpV48IsOXrdFQ8lR5E/export?format=csv";

/// Non-secret settings. Every section and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub newsletter: NewsletterConfig,
    pub completion: CompletionConfig,
    pub persistence: PersistenceConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    pub url: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_NEWSLETTER_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    pub model: String,
    pub endpoint: String,
    pub system_instruction: Option<String>,
    pub system_instruction_file: Option<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            system_instruction: None,
            system_instruction_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub table: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SermonError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SermonError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SUPABASE_URL})；未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// Inline instruction, then the instruction file, then the built-in persona.
    pub fn system_instruction(&self) -> Result<String> {
        if let Some(inline) = &self.completion.system_instruction {
            return Ok(inline.clone());
        }
        if let Some(path) = &self.completion.system_instruction_file {
            return std::fs::read_to_string(path).map_err(SermonError::IoError);
        }
        Ok(DEFAULT_SYSTEM_INSTRUCTION.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("newsletter.url", &self.newsletter.url)?;
        validation::validate_url("completion.endpoint", &self.completion.endpoint)?;
        validation::validate_non_empty_string("completion.model", &self.completion.model)?;
        validation::validate_non_empty_string("persistence.table", &self.persistence.table)?;

        if let Some(timeout) = self.http.timeout_seconds {
            validation::validate_range("http.timeout_seconds", timeout, 1, 600)?;
        }

        if let Some(path) = &self.completion.system_instruction_file {
            validation::validate_path("completion.system_instruction_file", path)?;
            if self.completion.system_instruction.is_some() {
                return Err(SermonError::ConfigValidationError {
                    field: "completion".to_string(),
                    message: "Set either system_instruction or system_instruction_file, not both"
                        .to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn newsletter_url(&self) -> &str {
        &self.newsletter.url
    }

    fn completion_model(&self) -> &str {
        &self.completion.model
    }

    fn completion_endpoint(&self) -> &str {
        &self.completion.endpoint
    }

    fn persistence_table(&self) -> &str {
        &self.persistence.table
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.http.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
