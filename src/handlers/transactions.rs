use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use axum_valid::Valid;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use model::entities::{business, transaction, transaction::TransactionKind};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ItemsAndPagesNumber,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse, PaginationMeta};

/// Request body for creating a new transaction
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    /// Owning business ID
    pub business_id: i32,
    /// "investment", "expense", or "sale"
    #[serde(rename = "type")]
    pub kind: String,
    /// Transaction amount, must be positive
    pub amount: Decimal,
    /// What the transaction was for
    pub description: String,
    /// Transaction date (defaults to now)
    pub date: Option<DateTime<Utc>>,
    /// Free-text category (defaults to "other")
    pub category: Option<String>,
}

/// Request body for updating a transaction.
///
/// Changing `type` is not supported, since the amount would have to move
/// between totals buckets. Callers delete and re-create instead.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    /// Must match the existing type when present
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// New amount, must be positive
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

/// Transaction response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: i32,
    pub business_id: i32,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<transaction::Model> for TransactionResponse {
    fn from(model: transaction::Model) -> Self {
        Self {
            id: model.id,
            business_id: model.business_id,
            kind: model.kind,
            amount: model.amount,
            description: model.description,
            date: model.date,
            category: model.category,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Paginated transaction list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,
    pub pagination: PaginationMeta,
}

/// Query parameters for listing transactions
#[derive(Debug, Deserialize, ToSchema, IntoParams, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    /// Owning business ID (required)
    pub business_id: Option<i32>,
    /// Page number (default: 1)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u64>,
    /// Page size (default: 10)
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u64>,
    /// Inclusive start of the date range (applied only with endDate)
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of the date range (applied only with startDate)
    pub end_date: Option<NaiveDate>,
    /// Filter by transaction type
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Filter by category
    pub category: Option<String>,
}

fn parse_kind(value: &str) -> Result<TransactionKind, ApiError> {
    TransactionKind::parse(value).map_err(ApiError::Validation)
}

/// Look up a business by id, scoped to its owner.
///
/// This is the sole authorization check for every ledger operation: a miss
/// means either "no such business" or "not yours", indistinguishably.
async fn find_owned_business<C: ConnectionTrait>(
    conn: &C,
    business_id: i32,
    owner_id: &str,
) -> Result<business::Model, ApiError> {
    business::Entity::find_by_id(business_id)
        .filter(business::Column::OwnerId.eq(owner_id))
        .one(conn)
        .await?
        .ok_or(ApiError::NotFound("business not found or unauthorized"))
}

/// Apply a signed delta to the total matching `kind`, clamped at zero.
///
/// Runs against the surrounding database transaction so the ledger write and
/// the totals write commit or roll back together.
async fn apply_total_delta<C: ConnectionTrait>(
    conn: &C,
    business_id: i32,
    kind: TransactionKind,
    delta: Decimal,
) -> Result<(), ApiError> {
    let business_model = business::Entity::find_by_id(business_id)
        .one(conn)
        .await?
        .ok_or(ApiError::NotFound("business not found or unauthorized"))?;

    let new_total = business_model.total_with_delta(kind, delta);
    let mut business_active: business::ActiveModel = business_model.into();
    match kind {
        TransactionKind::Investment => business_active.total_investment = Set(new_total),
        TransactionKind::Expense => business_active.total_expenses = Set(new_total),
        TransactionKind::Sale => business_active.total_sales = Set(new_total),
    }
    business_active.updated_at = Set(Utc::now());
    business_active.update(conn).await?;

    debug!(
        "Adjusted {} total of business {} by {} to {}",
        kind.as_str(),
        business_id,
        delta,
        new_total
    );
    Ok(())
}

/// Create a new transaction and increment the matching business total
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 200, description = "Transaction created successfully", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Invalid type, amount, or missing fields", body = ErrorResponse),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
        (status = 404, description = "Business not found or unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<Json<ApiResponse<TransactionResponse>>, ApiError> {
    let kind = parse_kind(&request.kind)?;
    if request.amount <= Decimal::ZERO {
        return Err(ApiError::Validation("amount must be a positive number".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(ApiError::Validation("description is required".to_string()));
    }

    debug!(
        "Creating {} transaction of {} for business {}",
        kind.as_str(),
        request.amount,
        request.business_id
    );

    // Ownership check before any write.
    let business_model = find_owned_business(&state.db, request.business_id, &user.user_id).await?;

    let now = Utc::now();
    let txn = state.db.begin().await?;

    let new_transaction = transaction::ActiveModel {
        business_id: Set(business_model.id),
        kind: Set(kind),
        amount: Set(request.amount),
        description: Set(request.description.clone()),
        date: Set(request.date.unwrap_or(now)),
        category: Set(request
            .category
            .clone()
            .filter(|category| !category.trim().is_empty())
            .unwrap_or_else(|| "other".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let transaction_model = new_transaction.insert(&txn).await?;

    apply_total_delta(&txn, business_model.id, kind, request.amount).await?;
    txn.commit().await?;

    info!(
        "Transaction created with ID: {} ({} {} for business {})",
        transaction_model.id,
        transaction_model.kind.as_str(),
        transaction_model.amount,
        transaction_model.business_id
    );

    let response = ApiResponse {
        data: TransactionResponse::from(transaction_model),
        message: "Transaction created successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// List transactions for a business, filtered and paginated
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tag = "transactions",
    params(TransactionQuery),
    responses(
        (status = 200, description = "Transactions retrieved successfully", body = ApiResponse<TransactionListResponse>),
        (status = 400, description = "Missing businessId or invalid filter", body = ErrorResponse),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
        (status = 404, description = "Business not found or unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    Valid(Query(query)): Valid<Query<TransactionQuery>>,
) -> Result<Json<ApiResponse<TransactionListResponse>>, ApiError> {
    let business_id = query
        .business_id
        .ok_or_else(|| ApiError::Validation("businessId is required".to_string()))?;

    // Ownership check before touching the ledger.
    find_owned_business(&state.db, business_id, &user.user_id).await?;

    let mut select =
        transaction::Entity::find().filter(transaction::Column::BusinessId.eq(business_id));

    if let (Some(start_date), Some(end_date)) = (query.start_date, query.end_date) {
        let from = start_date.and_time(NaiveTime::MIN).and_utc();
        // Exclusive upper bound at the start of the following day keeps the
        // end date itself inclusive.
        let to = end_date
            .checked_add_days(Days::new(1))
            .unwrap_or(end_date)
            .and_time(NaiveTime::MIN)
            .and_utc();
        select = select
            .filter(transaction::Column::Date.gte(from))
            .filter(transaction::Column::Date.lt(to));
    }
    if let Some(kind) = query.kind.as_deref() {
        select = select.filter(transaction::Column::Kind.eq(parse_kind(kind)?));
    }
    if let Some(category) = query.category.as_deref() {
        select = select.filter(transaction::Column::Category.eq(category));
    }

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let paginator = select
        .order_by_desc(transaction::Column::Date)
        .paginate(&state.db, limit);
    let ItemsAndPagesNumber {
        number_of_items: total,
        number_of_pages: pages,
    } = paginator.num_items_and_pages().await?;
    let transactions = paginator.fetch_page(page - 1).await?;

    debug!(
        "Retrieved {} of {} transactions for business {} (page {}/{})",
        transactions.len(),
        total,
        business_id,
        page,
        pages
    );

    let response = ApiResponse {
        data: TransactionListResponse {
            transactions: transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect(),
            pagination: PaginationMeta {
                total,
                pages,
                page,
                limit,
            },
        },
        message: "Transactions retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update a transaction and adjust the business total by the amount delta
#[utoipa::path(
    put,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated successfully", body = ApiResponse<TransactionResponse>),
        (status = 400, description = "Invalid amount or unsupported type change", body = ErrorResponse),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
        (status = 404, description = "Transaction not found or unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<Json<ApiResponse<TransactionResponse>>, ApiError> {
    debug!("Updating transaction with ID: {}", transaction_id);

    let existing = transaction::Entity::find_by_id(transaction_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("transaction not found"))?;

    // The owning business is the authorization boundary.
    find_owned_business(&state.db, existing.business_id, &user.user_id).await?;

    if let Some(kind) = request.kind.as_deref() {
        if parse_kind(kind)? != existing.kind {
            return Err(ApiError::Validation(
                "changing the transaction type is not supported".to_string(),
            ));
        }
    }
    if let Some(description) = request.description.as_deref() {
        if description.trim().is_empty() {
            return Err(ApiError::Validation("description cannot be empty".to_string()));
        }
    }
    let amount_diff = match request.amount {
        Some(new_amount) => {
            if new_amount <= Decimal::ZERO {
                return Err(ApiError::Validation(
                    "amount must be a positive number".to_string(),
                ));
            }
            new_amount - existing.amount
        }
        None => Decimal::ZERO,
    };

    let business_id = existing.business_id;
    let kind = existing.kind;

    let mut transaction_active: transaction::ActiveModel = existing.into();
    if let Some(amount) = request.amount {
        transaction_active.amount = Set(amount);
    }
    if let Some(description) = request.description {
        transaction_active.description = Set(description);
    }
    if let Some(date) = request.date {
        transaction_active.date = Set(date);
    }
    if let Some(category) = request.category {
        transaction_active.category = Set(category);
    }
    transaction_active.updated_at = Set(Utc::now());

    let txn = state.db.begin().await?;
    let updated_transaction = transaction_active.update(&txn).await?;
    if !amount_diff.is_zero() {
        apply_total_delta(&txn, business_id, kind, amount_diff).await?;
    }
    txn.commit().await?;

    info!(
        "Transaction with ID {} updated successfully ({} delta: {})",
        transaction_id,
        kind.as_str(),
        amount_diff
    );

    let response = ApiResponse {
        data: TransactionResponse::from(updated_transaction),
        message: "Transaction updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete a transaction and decrement the business total it fed
#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Transaction ID"),
    ),
    responses(
        (status = 200, description = "Transaction deleted successfully", body = ApiResponse<String>),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
        (status = 404, description = "Transaction not found or unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    debug!("Deleting transaction with ID: {}", transaction_id);

    let existing = transaction::Entity::find_by_id(transaction_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("transaction not found"))?;

    find_owned_business(&state.db, existing.business_id, &user.user_id).await?;

    let txn = state.db.begin().await?;
    let delete_result = transaction::Entity::delete_by_id(transaction_id)
        .exec(&txn)
        .await?;
    if delete_result.rows_affected == 0 {
        warn!(
            "Transaction with ID {} disappeared before deletion",
            transaction_id
        );
        txn.rollback().await?;
        return Err(ApiError::NotFound("transaction not found"));
    }
    apply_total_delta(&txn, existing.business_id, existing.kind, -existing.amount).await?;
    txn.commit().await?;

    info!("Transaction with ID {} deleted successfully", transaction_id);

    let response = ApiResponse {
        data: format!("Transaction {} deleted", transaction_id),
        message: "Transaction deleted successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
