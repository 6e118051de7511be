//! Application error types with proper error chaining.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Query execution failed: {0}")]
    Query(String),
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Duplicate record: {0}")]
    Duplicate(String),
    #[error("Pool exhausted: {0}")]
    PoolExhausted(String),
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Envelope missing required key: {0}")]
    MissingKey(String),
}

/// Errors from the ledger node.
///
/// `Connection`, `Timeout` and `Http` are transport-class failures and the
/// only variants eligible for retry. `EngineResult` and `Rpc` are terminal
/// rejections from the node itself; `NotFound` covers the node's
/// `actNotFound` / `entryNotFound` / `txnNotFound` sentinels, which some
/// lookups treat as a valid empty result.
#[derive(Error, Debug, Clone)]
pub enum LedgerError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Ledger RPC error '{code}': {message}")]
    Rpc { code: String, message: String },
    #[error("Transaction rejected ({code}): {message}")]
    EngineResult { code: String, message: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Malformed node response: {0}")]
    MalformedResponse(String),
}

impl LedgerError {
    /// Transport-class errors may succeed on retry; everything else is a
    /// deterministic rejection and must not be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LedgerError::Connection(_) | LedgerError::Timeout(_) | LedgerError::Http(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),
}

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),
    #[error("Invalid XRPL address: {0}")]
    InvalidAddress(String),
    #[error("Invalid XRPL seed")]
    InvalidSeed,
    #[error("Invalid transaction hash: {0}")]
    InvalidTransactionHash(String),
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),
    #[error("Validation failed: {0}")]
    Multiple(String),
}

#[derive(Error, Debug)]
pub enum ExternalServiceError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Timeout: {0}")]
    Timeout(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    ExternalService(#[from] ExternalServiceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(ValidationError::Multiple(err.to_string()))
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Row not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted("Pool timed out".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.code().is_some_and(|code| code == "23505") {
                    return DatabaseError::Duplicate(db_err.message().to_string());
                }
                DatabaseError::Query(db_err.message().to_string())
            }
            _ => DatabaseError::Query(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(DatabaseError::from(err))
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Database(DatabaseError::Migration(err.to_string()))
    }
}
