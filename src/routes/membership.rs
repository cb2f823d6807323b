use axum::{
    Json, Router,
    extract::State,
    routing::get,
};

use crate::{
    error::{AppResult, ErrorBody},
    middleware::extract::ApiPath,
    models::MemberAccount,
    response::ApiResponse,
    services::membership_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/memberaccount/user/{username}", get(member_account))
}

#[utoipa::path(
    get,
    path = "/api/memberaccount/user/{username}",
    params(("username" = String, Path, description = "Login name of the member")),
    responses(
        (status = 200, description = "Membership of the user's customer profile", body = ApiResponse<MemberAccount>),
        (status = 404, description = "No membership", body = ErrorBody)
    ),
    tag = "Membership"
)]
pub async fn member_account(
    State(state): State<AppState>,
    ApiPath(username): ApiPath<String>,
) -> AppResult<Json<ApiResponse<MemberAccount>>> {
    let resp = membership_service::get_by_username(&state, &username).await?;
    Ok(Json(resp))
}
