use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::{
    audit,
    db::DbPool,
    dto::auth::{Identity, LoginRequest, LoginResponse, SignupRequest, SignupResponse},
    error::{AppError, AppResult},
    middleware::context::RequestContext,
    models::{User, UserRole},
    response::{ApiResponse, Meta},
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub async fn signup(
    pool: &DbPool,
    ctx: &RequestContext,
    payload: SignupRequest,
) -> AppResult<ApiResponse<SignupResponse>> {
    let SignupRequest {
        username,
        password,
        name,
        email,
        phone,
        address,
    } = payload;

    let exist: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE username = $1")
        .bind(username.as_str())
        .fetch_optional(pool)
        .await?;
    if exist.is_some() {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let password_hash = hash_password(&password)?;

    let mut tx = pool.begin().await?;
    let (user_id,): (i32,) =
        sqlx::query_as("INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id")
            .bind(username.as_str())
            .bind(password_hash)
            .fetch_one(&mut *tx)
            .await
            .map_err(conflict_on_unique_violation)?;

    let (customer_id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO customers (user_id, name, email, phone, address)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING customer_id
        "#,
    )
    .bind(user_id)
    .bind(name.unwrap_or_else(|| username.clone()))
    .bind(email)
    .bind(phone)
    .bind(address)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    tracing::info!(user_id, customer_id, "user signed up");
    audit::record(
        pool,
        ctx,
        Some(user_id),
        "user_signup",
        "users",
        serde_json::json!({ "user_id": user_id, "customer_id": customer_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created successfully",
        SignupResponse {
            id: user_id,
            username,
            customer_id,
        },
        Some(Meta::empty()),
    ))
}

/// A concurrent signup can slip past the existence check; the unique index still decides.
fn conflict_on_unique_violation(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("Username already exists".into())
        }
        _ => AppError::DbError(err),
    }
}

pub async fn login(
    pool: &DbPool,
    ctx: &RequestContext,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { username, password } = payload;
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username.as_str())
        .fetch_optional(pool)
        .await?;

    // Unknown user and wrong password are indistinguishable to the caller.
    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized),
    };
    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let role = resolve_user_role(pool, user.id).await?;

    audit::record(
        pool,
        ctx,
        Some(user.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            user: Identity {
                id: user.id,
                username: user.username,
                role,
            },
        },
        Some(Meta::empty()),
    ))
}

#[derive(sqlx::FromRow)]
struct RoleFlags {
    is_customer: bool,
    is_employee: bool,
    is_cashier: bool,
    is_consultant: bool,
}

pub async fn resolve_user_role(pool: &DbPool, user_id: i32) -> AppResult<UserRole> {
    let flags = sqlx::query_as::<_, RoleFlags>(
        r#"
        SELECT
            EXISTS (SELECT 1 FROM customers c WHERE c.user_id = $1) AS is_customer,
            EXISTS (SELECT 1 FROM employees e WHERE e.user_id = $1) AS is_employee,
            EXISTS (
                SELECT 1 FROM employees e
                JOIN cashiers ca ON ca.employee_id = e.employee_id
                WHERE e.user_id = $1
            ) AS is_cashier,
            EXISTS (
                SELECT 1 FROM employees e
                JOIN consultants co ON co.employee_id = e.employee_id
                WHERE e.user_id = $1
            ) AS is_consultant
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(UserRole::resolve(
        flags.is_customer,
        flags.is_employee,
        flags.is_cashier,
        flags.is_consultant,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_only_the_original_password() {
        let hash = hash_password("s3cret").unwrap();
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("S3cret", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        let err = verify_password("pw", "plaintext").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
