use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::products::{CategoryList, WarehouseList},
    error::AppResult,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/warehouses", get(list_warehouses))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<CategoryList>)
    ),
    tag = "Catalog"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = product_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/warehouses",
    responses(
        (status = 200, description = "All warehouses", body = ApiResponse<WarehouseList>)
    ),
    tag = "Catalog"
)]
pub async fn list_warehouses(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<WarehouseList>>> {
    let resp = product_service::list_warehouses(&state).await?;
    Ok(Json(resp))
}
