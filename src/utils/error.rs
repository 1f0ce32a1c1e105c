use thiserror::Error;

#[derive(Error, Debug)]
pub enum SermonError {
    #[error("Network response was not ok, status: {status}")]
    Network { status: u16 },

    #[error("Network request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to generate spiritual sermon. Details: {message}")]
    Generation { message: String },

    #[error("{message}")]
    Persistence { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Generation,
    Persistence,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SermonError {
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network { .. } | Self::Request(_) => ErrorCategory::Network,
            Self::Generation { .. } => ErrorCategory::Generation,
            Self::Persistence { .. } => ErrorCategory::Persistence,
            Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Generation | ErrorCategory::Persistence => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch the newsletter: {}", self),
            ErrorCategory::Generation => format!("The sermon could not be generated: {}", self),
            ErrorCategory::Persistence => format!("The sermon could not be saved: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Network { status } if *status >= 500 => {
                "The newsletter host is failing, try again later"
            }
            Self::Network { .. } => "Check that the newsletter export URL is public and correct",
            Self::Request(_) => "Check your network connection and try again",
            Self::Generation { .. } => "Check API_KEY and the completion model name, then try again",
            Self::Persistence { .. } => {
                "Check SUPABASE_URL, SUPABASE_ANON_KEY and the blog_posts table, then retry the save"
            }
            Self::MissingConfigError { .. } => {
                "Set the missing variable in the environment or in a .env file"
            }
            Self::InvalidConfigValueError { .. } | Self::ConfigValidationError { .. } => {
                "Fix the configuration file or command-line override"
            }
            Self::IoError(_) => "Check file paths and permissions",
            Self::SerializationError(_) => "The remote service returned an unexpected payload",
        }
    }
}

pub type Result<T> = std::result::Result<T, SermonError>;
