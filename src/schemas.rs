use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Pagination metadata for list endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of matching records
    pub total: u64,
    /// Total number of pages at the requested limit
    pub pages: u64,
    /// Requested page (1-based)
    pub page: u64,
    /// Requested page size
    pub limit: u64,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::business::create_business,
        crate::handlers::business::get_business,
        crate::handlers::business::update_business,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::list_transactions,
        crate::handlers::transactions::update_transaction,
        crate::handlers::transactions::delete_transaction,
    ),
    components(
        schemas(
            ApiResponse<crate::handlers::business::BusinessResponse>,
            ApiResponse<crate::handlers::transactions::TransactionResponse>,
            ApiResponse<crate::handlers::transactions::TransactionListResponse>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            PaginationMeta,
            crate::handlers::business::CreateBusinessRequest,
            crate::handlers::business::UpdateBusinessRequest,
            crate::handlers::business::BusinessResponse,
            crate::handlers::transactions::CreateTransactionRequest,
            crate::handlers::transactions::UpdateTransactionRequest,
            crate::handlers::transactions::TransactionResponse,
            crate::handlers::transactions::TransactionListResponse,
            model::entities::transaction::TransactionKind,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "business", description = "Business profile and running totals"),
        (name = "transactions", description = "Financial transaction ledger"),
    ),
    info(
        title = "BizLedger API",
        description = "Business finance tracker - one business profile per user with an incremental ledger of investments, expenses, and sales",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
