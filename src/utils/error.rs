use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("CSV file not found: {path}")]
    FileNotFound { path: String },

    #[error("CSV file is empty: {path}")]
    EmptyFile { path: String },

    #[error("Missing required headers: {}. Required headers are: company, email, phone", .missing.join(", "))]
    MissingHeaders { missing: Vec<String> },

    #[error("{provider} API returned {status}: {message}")]
    ApiError {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Business not found: {query}")]
    NotFound { query: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Input,
    Api,
    NotFound,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EnrichError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EnrichError::MissingConfigError { .. }
            | EnrichError::InvalidConfigValueError { .. }
            | EnrichError::ConfigError { .. } => ErrorCategory::Config,
            EnrichError::FileNotFound { .. }
            | EnrichError::EmptyFile { .. }
            | EnrichError::MissingHeaders { .. } => ErrorCategory::Input,
            EnrichError::ApiError { .. }
            | EnrichError::HttpError(_)
            | EnrichError::SerializationError(_) => ErrorCategory::Api,
            EnrichError::NotFound { .. } => ErrorCategory::NotFound,
            EnrichError::IoError(_) | EnrichError::CsvError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Api => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Config | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, EnrichError::NotFound { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EnrichError::MissingConfigError { field } => {
                format!("{} environment variable is required", field)
            }
            EnrichError::ApiError {
                provider, status, ..
            } => format!("{} lookup failed with HTTP status {}", provider, status),
            EnrichError::HttpError(_) => {
                "Could not reach the places provider. Check your network connection.".to_string()
            }
            EnrichError::SerializationError(_) => {
                "The places provider sent a response that could not be decoded".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EnrichError::MissingConfigError { .. } => {
                "Set GOOGLE_PLACES_API_KEY in your environment or in a .env file"
            }
            EnrichError::InvalidConfigValueError { .. } | EnrichError::ConfigError { .. } => {
                "Check the command-line flags and the --config file"
            }
            EnrichError::FileNotFound { .. } => "Check the path passed to --file",
            EnrichError::EmptyFile { .. } => "Add a header line and at least one data row",
            EnrichError::MissingHeaders { .. } => {
                "The first line must contain company, email and phone columns"
            }
            EnrichError::ApiError { status: 401 | 403, .. } => {
                "Verify the API key and that the Places API is enabled for it"
            }
            EnrichError::ApiError { status: 429, .. } => {
                "Rate limited: lower --batch-size or raise --batch-delay-ms"
            }
            EnrichError::ApiError { .. } | EnrichError::HttpError(_) => {
                "Retry later; the provider may be temporarily unavailable"
            }
            EnrichError::NotFound { .. } => "Try a more specific business name or location",
            EnrichError::IoError(_) | EnrichError::CsvError(_) => {
                "Check file permissions for the input directory"
            }
            EnrichError::SerializationError(_) => "The provider returned an unexpected response",
        }
    }
}

pub type Result<T> = std::result::Result<T, EnrichError>;
