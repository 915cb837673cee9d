use std::fmt;

#[derive(Debug, Clone)]
pub enum BakeCakeError {
    /// Input rejected before it reaches persistence or pricing
    Validation(String),
    /// Uniqueness or referential constraint violated
    Conflict(String),
    /// A mandatory reference resolved to nothing
    DataIntegrity(String),
    /// An order field required by the requested computation is unset
    MissingOrderData(String),
    NotFound(String),
    /// External shortener unreachable or timed out
    ServiceUnavailable(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Serialization(String),
    DateParse(String),
}

impl BakeCakeError {
    pub fn code(&self) -> &'static str {
        match self {
            BakeCakeError::Validation(_) => "E001",
            BakeCakeError::Conflict(_) => "E002",
            BakeCakeError::DataIntegrity(_) => "E003",
            BakeCakeError::MissingOrderData(_) => "E004",
            BakeCakeError::NotFound(_) => "E005",
            BakeCakeError::ServiceUnavailable(_) => "E006",
            BakeCakeError::DatabaseConfig(_) => "E007",
            BakeCakeError::DatabaseConnection(_) => "E008",
            BakeCakeError::DatabaseOperation(_) => "E009",
            BakeCakeError::Serialization(_) => "E010",
            BakeCakeError::DateParse(_) => "E011",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            BakeCakeError::Validation(_) => "Validation Error",
            BakeCakeError::Conflict(_) => "Conflict Error",
            BakeCakeError::DataIntegrity(_) => "Data Integrity Error",
            BakeCakeError::MissingOrderData(_) => "Missing Order Data",
            BakeCakeError::NotFound(_) => "Resource Not Found",
            BakeCakeError::ServiceUnavailable(_) => "Service Unavailable",
            BakeCakeError::DatabaseConfig(_) => "Database Configuration Error",
            BakeCakeError::DatabaseConnection(_) => "Database Connection Error",
            BakeCakeError::DatabaseOperation(_) => "Database Operation Error",
            BakeCakeError::Serialization(_) => "Serialization Error",
            BakeCakeError::DateParse(_) => "Date Parse Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            BakeCakeError::Validation(msg) => msg,
            BakeCakeError::Conflict(msg) => msg,
            BakeCakeError::DataIntegrity(msg) => msg,
            BakeCakeError::MissingOrderData(msg) => msg,
            BakeCakeError::NotFound(msg) => msg,
            BakeCakeError::ServiceUnavailable(msg) => msg,
            BakeCakeError::DatabaseConfig(msg) => msg,
            BakeCakeError::DatabaseConnection(msg) => msg,
            BakeCakeError::DatabaseOperation(msg) => msg,
            BakeCakeError::Serialization(msg) => msg,
            BakeCakeError::DateParse(msg) => msg,
        }
    }
}

impl fmt::Display for BakeCakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for BakeCakeError {}

// Convenience constructors
impl BakeCakeError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::Validation(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::Conflict(msg.into())
    }

    pub fn data_integrity<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::DataIntegrity(msg.into())
    }

    pub fn missing_order_data<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::MissingOrderData(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::NotFound(msg.into())
    }

    pub fn service_unavailable<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::ServiceUnavailable(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::DatabaseOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        BakeCakeError::DateParse(msg.into())
    }
}

impl From<sea_orm::DbErr> for BakeCakeError {
    fn from(err: sea_orm::DbErr) -> Self {
        BakeCakeError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for BakeCakeError {
    fn from(err: serde_json::Error) -> Self {
        BakeCakeError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for BakeCakeError {
    fn from(err: chrono::ParseError) -> Self {
        BakeCakeError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BakeCakeError>;
