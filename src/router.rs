use crate::handlers::{
    business::{create_business, get_business, update_business},
    health::health_check,
    transactions::{create_transaction, delete_transaction, list_transactions, update_transaction},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Business profile routes (one business per caller)
        .route("/api/v1/business", post(create_business))
        .route("/api/v1/business", get(get_business))
        .route("/api/v1/business", put(update_business))
        // Transaction ledger routes
        .route("/api/v1/transactions", post(create_transaction))
        .route("/api/v1/transactions", get(list_transactions))
        .route("/api/v1/transactions/:transaction_id", put(update_transaction))
        .route(
            "/api/v1/transactions/:transaction_id",
            delete(delete_transaction),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
