use axum::{extract::State, http::StatusCode, response::Json};
use axum_valid::Valid;
use chrono::{DateTime, NaiveDate, Utc};
use model::entities::business;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating the caller's business profile
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessRequest {
    /// Business name
    #[validate(length(min = 2, max = 100, message = "business name must be 2-100 characters"))]
    pub name: String,
    /// Free-form description
    #[validate(length(max = 1000, message = "description cannot exceed 1000 characters"))]
    pub description: Option<String>,
    /// Industry label
    #[validate(length(max = 100, message = "industry cannot exceed 100 characters"))]
    pub industry: Option<String>,
    /// Founding date (defaults to today)
    pub founded_date: Option<NaiveDate>,
    /// Embedded logo as a data URI, or empty
    #[validate(custom(function = validate_logo))]
    pub logo: Option<String>,
}

/// Request body for updating the caller's business profile.
///
/// Profile fields only; the running totals are owned by the transaction
/// ledger and are never writable here. Absent optional fields reset to
/// their defaults, matching the full-profile form the API serves.
#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusinessRequest {
    /// Business name
    #[validate(length(min = 2, max = 100, message = "business name must be 2-100 characters"))]
    pub name: String,
    /// Free-form description
    #[validate(length(max = 1000, message = "description cannot exceed 1000 characters"))]
    pub description: Option<String>,
    /// Industry label
    #[validate(length(max = 100, message = "industry cannot exceed 100 characters"))]
    pub industry: Option<String>,
    /// Founding date
    pub founded_date: Option<NaiveDate>,
    /// Embedded logo as a data URI, or empty
    #[validate(custom(function = validate_logo))]
    pub logo: Option<String>,
}

fn validate_logo(logo: &str) -> Result<(), ValidationError> {
    if logo.is_empty() || logo.starts_with("data:image/") {
        Ok(())
    } else {
        let mut error = ValidationError::new("logo");
        error.message = Some("logo must be an embedded data:image/ string".into());
        Err(error)
    }
}

/// Business response model, including the derived metrics
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessResponse {
    pub id: i32,
    /// Opaque identifier of the owning user
    pub user_id: String,
    /// Display-only owner email, when known
    pub email: Option<String>,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub founded_date: NaiveDate,
    pub logo: String,
    pub total_investment: Decimal,
    pub total_expenses: Decimal,
    pub total_sales: Decimal,
    /// totalSales - totalExpenses, computed on read
    pub net_profit: Decimal,
    /// Return on investment percentage, computed on read
    pub roi: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<business::Model> for BusinessResponse {
    fn from(model: business::Model) -> Self {
        let net_profit = model.net_profit();
        let roi = model.roi();
        Self {
            id: model.id,
            user_id: model.owner_id,
            email: model.owner_email,
            name: model.name,
            description: model.description,
            industry: model.industry,
            founded_date: model.founded_date,
            logo: model.logo,
            total_investment: model.total_investment,
            total_expenses: model.total_expenses,
            total_sales: model.total_sales,
            net_profit,
            roi,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Look up the caller's business, if any.
async fn find_business_by_owner(
    state: &AppState,
    owner_id: &str,
) -> Result<Option<business::Model>, ApiError> {
    let business_model = business::Entity::find()
        .filter(business::Column::OwnerId.eq(owner_id))
        .one(&state.db)
        .await?;
    Ok(business_model)
}

/// Create the caller's business profile
#[utoipa::path(
    post,
    path = "/api/v1/business",
    tag = "business",
    request_body = CreateBusinessRequest,
    responses(
        (status = 201, description = "Business created successfully", body = ApiResponse<BusinessResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
        (status = 409, description = "Caller already owns a business", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_business(
    State(state): State<AppState>,
    user: AuthUser,
    Valid(Json(request)): Valid<Json<CreateBusinessRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<BusinessResponse>>), ApiError> {
    debug!("Creating business '{}' for user {}", request.name, user.user_id);

    // At most one business per owner.
    if find_business_by_owner(&state, &user.user_id).await?.is_some() {
        warn!("User {} already owns a business", user.user_id);
        return Err(ApiError::Conflict("a business already exists for this user"));
    }

    let now = Utc::now();
    let new_business = business::ActiveModel {
        owner_id: Set(user.user_id.clone()),
        owner_email: Set(user.email.clone()),
        name: Set(request.name.trim().to_string()),
        description: Set(request.description.unwrap_or_default()),
        industry: Set(request.industry.unwrap_or_default()),
        founded_date: Set(request.founded_date.unwrap_or_else(|| now.date_naive())),
        logo: Set(request.logo.unwrap_or_default()),
        total_investment: Set(Decimal::ZERO),
        total_expenses: Set(Decimal::ZERO),
        total_sales: Set(Decimal::ZERO),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let business_model = new_business.insert(&state.db).await?;
    info!(
        "Business created with ID: {} for user {}",
        business_model.id, business_model.owner_id
    );

    let response = ApiResponse {
        data: BusinessResponse::from(business_model),
        message: "Business created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get the caller's business profile
#[utoipa::path(
    get,
    path = "/api/v1/business",
    tag = "business",
    responses(
        (status = 200, description = "Business retrieved successfully", body = ApiResponse<BusinessResponse>),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
        (status = 404, description = "No business exists for the caller yet", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_business(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<BusinessResponse>>, ApiError> {
    debug!("Fetching business for user {}", user.user_id);

    let business_model = find_business_by_owner(&state, &user.user_id)
        .await?
        .ok_or(ApiError::NotFound("business not found"))?;

    let response = ApiResponse {
        data: BusinessResponse::from(business_model),
        message: "Business retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update the caller's business profile fields
#[utoipa::path(
    put,
    path = "/api/v1/business",
    tag = "business",
    request_body = UpdateBusinessRequest,
    responses(
        (status = 200, description = "Business updated successfully", body = ApiResponse<BusinessResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
        (status = 404, description = "No business exists for the caller", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_business(
    State(state): State<AppState>,
    user: AuthUser,
    Valid(Json(request)): Valid<Json<UpdateBusinessRequest>>,
) -> Result<Json<ApiResponse<BusinessResponse>>, ApiError> {
    debug!("Updating business for user {}", user.user_id);

    let existing = find_business_by_owner(&state, &user.user_id)
        .await?
        .ok_or(ApiError::NotFound("business not found"))?;
    let business_id = existing.id;

    let mut business_active: business::ActiveModel = existing.into();
    business_active.name = Set(request.name.trim().to_string());
    business_active.description = Set(request.description.unwrap_or_default());
    business_active.industry = Set(request.industry.unwrap_or_default());
    if let Some(founded_date) = request.founded_date {
        business_active.founded_date = Set(founded_date);
    }
    business_active.logo = Set(request.logo.unwrap_or_default());
    business_active.updated_at = Set(Utc::now());

    let updated_business = business_active.update(&state.db).await?;
    info!("Business with ID {} updated successfully", business_id);

    let response = ApiResponse {
        data: BusinessResponse::from(updated_business),
        message: "Business updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
