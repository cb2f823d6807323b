use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, SignupRequest, SignupResponse},
    error::{AppResult, ErrorBody},
    middleware::{context::RequestContext, validated::ValidatedJson},
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User and customer profile created", body = ApiResponse<SignupResponse>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Username already exists", body = ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<SignupResponse>>)> {
    let resp = auth_service::signup(&state.pool, &ctx, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login(&state.pool, &ctx, payload).await?;
    Ok(Json(resp))
}
