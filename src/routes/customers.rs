use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::{
        customers::{CustomerList, UpdateCustomerRequest},
        invoices::{CustomerInvoiceRequest, InvoiceCreated, InvoiceList},
        orders::OrderList,
    },
    error::{AppResult, ErrorBody},
    middleware::{context::RequestContext, extract::ApiPath, validated::ValidatedJson},
    models::Customer,
    response::ApiResponse,
    services::{
        customer_service,
        invoice_service::{self, InvoiceRefs},
        order_service,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/by-user/{user_id}", get(customer_by_user))
        .route("/customers/{id}", put(update_customer))
        .route("/customers/{id}/orders", get(customer_orders))
        .route(
            "/customers/{id}/invoices",
            get(customer_invoices).post(create_customer_invoice),
        )
        .route("/profile/customer/{user_id}", get(customer_profile))
}

#[utoipa::path(
    get,
    path = "/api/customers",
    responses(
        (status = 200, description = "All customers", body = ApiResponse<CustomerList>)
    ),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CustomerList>>> {
    let resp = customer_service::list_customers(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customers/by-user/{user_id}",
    params(("user_id" = i32, Path, description = "Owning user ID")),
    responses(
        (status = 200, description = "Customer owned by the user", body = ApiResponse<Customer>),
        (status = 404, description = "No customer for this user", body = ErrorBody)
    ),
    tag = "Customers"
)]
pub async fn customer_by_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::get_by_user(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/profile/customer/{user_id}",
    params(("user_id" = i32, Path, description = "Owning user ID")),
    responses(
        (status = 200, description = "Customer profile of the user", body = ApiResponse<Customer>),
        (status = 404, description = "No customer for this user", body = ErrorBody)
    ),
    tag = "Customers"
)]
pub async fn customer_profile(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::get_by_user(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Updated customer", body = ApiResponse<Customer>),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "Customer not found", body = ErrorBody)
    ),
    tag = "Customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCustomerRequest>,
) -> AppResult<Json<ApiResponse<Customer>>> {
    let resp = customer_service::update_customer(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}/orders",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Order history, newest first", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn customer_orders(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_customer_orders(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}/invoices",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Invoices of the customer", body = ApiResponse<InvoiceList>)
    ),
    tag = "Invoices"
)]
pub async fn customer_invoices(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<InvoiceList>>> {
    let resp = invoice_service::list_customer_invoices(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/customers/{id}/invoices",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = CustomerInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created", body = ApiResponse<InvoiceCreated>),
        (status = 400, description = "No invoiceable orders", body = ErrorBody)
    ),
    tag = "Invoices"
)]
pub async fn create_customer_invoice(
    State(state): State<AppState>,
    ctx: RequestContext,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<CustomerInvoiceRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<InvoiceCreated>>)> {
    let resp = invoice_service::create_invoice(
        &state,
        &ctx,
        id,
        &payload.order_ids,
        InvoiceRefs::default(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
