use crate::{
    error::{AppError, AppResult},
    models::MemberAccount,
    response::ApiResponse,
    state::AppState,
};

pub async fn get_by_username(
    state: &AppState,
    username: &str,
) -> AppResult<ApiResponse<MemberAccount>> {
    let account = sqlx::query_as::<_, MemberAccount>(
        r#"
        SELECT m.member_account_id AS id, m.account_type, m.points,
               m.start_date, m.due_date, m.customer_id
        FROM member_accounts m
        JOIN customers c ON c.customer_id = m.customer_id
        JOIN users u ON u.id = c.user_id
        WHERE u.username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(&state.pool)
    .await?;
    let account = match account {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Member account", account, None))
}
