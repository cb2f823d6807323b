use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::invoices::{CreateInvoiceRequest, InvoiceCreated, InvoiceWithOrders},
    error::{AppResult, ErrorBody},
    middleware::{context::RequestContext, extract::ApiPath, validated::ValidatedJson},
    response::ApiResponse,
    services::invoice_service::{self, InvoiceRefs},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_invoice))
        .route("/{id}", get(get_invoice))
}

#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created and orders marked Paid", body = ApiResponse<InvoiceCreated>),
        (status = 400, description = "No invoiceable orders", body = ErrorBody)
    ),
    tag = "Invoices"
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateInvoiceRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<InvoiceCreated>>)> {
    let refs = InvoiceRefs {
        counter_id: payload.counter_id,
        consultant_id: payload.consultant_id,
    };
    let resp =
        invoice_service::create_invoice(&state, &ctx, payload.customer_id, &payload.order_ids, refs)
            .await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    params(("id" = i32, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice with its orders", body = ApiResponse<InvoiceWithOrders>),
        (status = 404, description = "Invoice not found", body = ErrorBody)
    ),
    tag = "Invoices"
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<InvoiceWithOrders>>> {
    let resp = invoice_service::get_invoice(&state, id).await?;
    Ok(Json(resp))
}
