use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::orders::{CheckoutAllRequest, CheckoutCreated, CreateOrderRequest, OrderCreated, OrderList},
    error::{AppResult, ErrorBody},
    middleware::{context::RequestContext, validated::ValidatedJson},
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/all", post(checkout_all))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Every order, newest first", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_all_orders(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Pending order created", body = ApiResponse<OrderCreated>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Customer or product not found", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderCreated>>)> {
    let resp = order_service::create_order(&state, &ctx, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/orders/all",
    request_body = CheckoutAllRequest,
    responses(
        (status = 201, description = "One pending order per unit in the cart", body = ApiResponse<CheckoutCreated>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Customer or product not found", body = ErrorBody)
    ),
    tag = "Orders"
)]
pub async fn checkout_all(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CheckoutAllRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CheckoutCreated>>)> {
    let resp = order_service::checkout_all(&state, &ctx, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
