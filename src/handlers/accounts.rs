use crate::{
    common::{validate_amount, validate_opening_balance},
    errors::ServiceError,
    services::accounts::{AccountSnapshot, CreateAccountInput},
    ApiResult, AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "accountNumber": "1234567890",
    "pin": "1234"
}))]
pub struct AuthenticateRequest {
    /// Ten-character account number
    #[validate(length(equal = 10, message = "Account number must be 10 characters"))]
    pub account_number: String,
    /// 4 to 10 character PIN
    #[validate(length(min = 4, max = 10, message = "PIN must be 4-10 characters"))]
    pub pin: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "accountNumber": "1234567890",
    "pin": "1234",
    "amount": "250.75"
}))]
pub struct TransactionRequest {
    #[validate(length(equal = 10, message = "Account number must be 10 characters"))]
    pub account_number: String,
    #[validate(length(min = 4, max = 10, message = "PIN must be 4-10 characters"))]
    pub pin: String,
    /// Positive amount with at most two decimal places
    #[validate(custom = "validate_amount")]
    #[schema(value_type = String, example = "250.75")]
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "accountNumber": "1111111111",
    "pin": "9999",
    "balance": "0.00",
    "accountHolderName": "Test User"
}))]
pub struct CreateAccountRequest {
    #[validate(length(equal = 10, message = "Account number must be 10 characters"))]
    pub account_number: String,
    #[validate(length(min = 4, max = 10, message = "PIN must be 4-10 characters"))]
    pub pin: String,
    /// Opening balance, defaults to 0.00
    #[validate(custom = "validate_opening_balance")]
    #[schema(value_type = Option<String>, example = "0.00")]
    pub balance: Option<Decimal>,
    #[validate(length(max = 100, message = "Account holder name must be at most 100 characters"))]
    pub account_holder_name: Option<String>,
}

impl From<CreateAccountRequest> for CreateAccountInput {
    fn from(request: CreateAccountRequest) -> Self {
        Self {
            account_number: request.account_number,
            pin: request.pin,
            balance: request.balance,
            account_holder_name: request.account_holder_name,
        }
    }
}

/// Unwraps the JSON body and runs its field rules; both failures are 400s.
fn validated<T: Validate>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ServiceError> {
    let Json(payload) = payload?;
    payload.validate()?;
    Ok(payload)
}

/// Creates the router for account endpoints
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route("/authenticate", post(authenticate))
        .route("/deposit", post(deposit))
        .route("/withdraw", post(withdraw))
        .route("/:account_number/balance", get(get_balance))
}

#[utoipa::path(
    post,
    path = "/api/v1/accounts/authenticate",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "PIN accepted", body = AccountSnapshot),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "Invalid PIN", body = crate::errors::ErrorResponse),
        (status = 404, description = "Account not found", body = crate::errors::ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> ApiResult<AccountSnapshot> {
    let request = validated(payload)?;
    let account = state
        .accounts
        .authenticate(&request.account_number, &request.pin)
        .await?;
    Ok(Json(account))
}

#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_number}/balance",
    params(
        ("account_number" = String, Path, description = "Account number")
    ),
    responses(
        (status = 200, description = "Current balance", body = AccountSnapshot),
        (status = 404, description = "Account not found", body = crate::errors::ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> ApiResult<AccountSnapshot> {
    let account = state.accounts.get_balance(&account_number).await?;
    Ok(Json(account))
}

#[utoipa::path(
    post,
    path = "/api/v1/accounts/deposit",
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Deposit applied", body = AccountSnapshot),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "Invalid PIN", body = crate::errors::ErrorResponse),
        (status = 404, description = "Account not found", body = crate::errors::ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn deposit(
    State(state): State<AppState>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> ApiResult<AccountSnapshot> {
    let request = validated(payload)?;
    let account = state
        .accounts
        .deposit(&request.account_number, &request.pin, request.amount)
        .await?;
    Ok(Json(account))
}

#[utoipa::path(
    post,
    path = "/api/v1/accounts/withdraw",
    request_body = TransactionRequest,
    responses(
        (status = 200, description = "Withdrawal applied", body = AccountSnapshot),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 401, description = "Invalid PIN", body = crate::errors::ErrorResponse),
        (status = 404, description = "Account not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Insufficient funds", body = crate::errors::ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn withdraw(
    State(state): State<AppState>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> ApiResult<AccountSnapshot> {
    let request = validated(payload)?;
    let account = state
        .accounts
        .withdraw(&request.account_number, &request.pin, request.amount)
        .await?;
    Ok(Json(account))
}

#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    responses(
        (status = 200, description = "All accounts, any status", body = [AccountSnapshot])
    ),
    tag = "accounts"
)]
pub async fn list_accounts(State(state): State<AppState>) -> ApiResult<Vec<AccountSnapshot>> {
    let accounts = state.accounts.list_accounts().await?;
    Ok(Json(accounts))
}

#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountSnapshot),
        (status = 400, description = "Invalid request or duplicate account", body = crate::errors::ErrorResponse)
    ),
    tag = "accounts"
)]
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountSnapshot>), ServiceError> {
    let request = validated(payload)?;
    let account = state.accounts.create_account(request.into()).await?;
    Ok((StatusCode::CREATED, Json(account)))
}
