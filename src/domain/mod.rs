//! Domain layer containing core business types, traits, and error definitions.

pub mod engine_result;
pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

pub use error::{
    AppError, ConfigError, DatabaseError, ExternalServiceError, LedgerError, ValidationError,
};
pub use traits::{FaucetClient, LedgerGateway, LedgerStore};
pub use types::{
    AccountInfoResponse, AccountSnapshot, AffectedNode, ErrorDetail, ErrorResponse, FeeInfo,
    FundedAccount, HealthResponse, HealthStatus, LedgerEntryResponse, LedgerSummary, NodeDiffType,
    PageParams, PagedOutcome, RateLimitResponse, SubmitResponse, TransactionRecord,
    TransactionResponse, TrustLineResponse,
};
