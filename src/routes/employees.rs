use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    dto::{
        employees::{CashierDetail, EmployeeList, EmployeeProfile},
        invoices::ConsultantInvoiceList,
    },
    error::{AppResult, ErrorBody},
    middleware::extract::ApiPath,
    response::ApiResponse,
    services::{employee_service, invoice_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees))
        .route("/employee/by-user/{user_id}", get(employee_by_user))
        .route("/employee/{id}/profile", get(employee_profile))
        .route("/cashiers/{id}", get(cashier_detail))
        .route("/consultants/{id}/invoices", get(consultant_invoices))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = ApiResponse<EmployeeList>)
    ),
    tag = "Employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<EmployeeList>>> {
    let resp = employee_service::list_employees(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/employee/by-user/{user_id}",
    params(("user_id" = i32, Path, description = "Owning user ID")),
    responses(
        (status = 200, description = "Employee with resolved role", body = ApiResponse<EmployeeProfile>),
        (status = 404, description = "User is not an employee", body = ErrorBody)
    ),
    tag = "Employees"
)]
pub async fn employee_by_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<EmployeeProfile>>> {
    let resp = employee_service::profile_by_user(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/employee/{id}/profile",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee with resolved role", body = ApiResponse<EmployeeProfile>),
        (status = 404, description = "Employee not found", body = ErrorBody)
    ),
    tag = "Employees"
)]
pub async fn employee_profile(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<EmployeeProfile>>> {
    let resp = employee_service::profile_by_employee(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/cashiers/{id}",
    params(("id" = i32, Path, description = "Employee ID of the cashier")),
    responses(
        (status = 200, description = "Cashier with assigned counter", body = ApiResponse<CashierDetail>),
        (status = 404, description = "Not a cashier", body = ErrorBody)
    ),
    tag = "Employees"
)]
pub async fn cashier_detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<CashierDetail>>> {
    let resp = employee_service::cashier_detail(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/consultants/{id}/invoices",
    params(("id" = i32, Path, description = "Employee ID of the consultant")),
    responses(
        (status = 200, description = "Invoices handled by the consultant", body = ApiResponse<ConsultantInvoiceList>),
        (status = 404, description = "Not a consultant", body = ErrorBody)
    ),
    tag = "Employees"
)]
pub async fn consultant_invoices(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ApiResponse<ConsultantInvoiceList>>> {
    let resp = invoice_service::list_consultant_invoices(&state, id).await?;
    Ok(Json(resp))
}
