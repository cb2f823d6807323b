use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult, middleware::context::RequestContext};

pub async fn log_audit(
    pool: &DbPool,
    ctx: &RequestContext,
    user_id: Option<i32>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    let mut metadata = metadata.unwrap_or_else(|| serde_json::json!({}));
    if let Some(map) = metadata.as_object_mut() {
        map.insert("request_id".into(), Value::String(ctx.request_id.clone()));
    }

    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(action)
    .bind(resource)
    .bind(metadata)
    .execute(pool)
    .await?;

    Ok(())
}

/// Writes an audit row, downgrading failures to a warning.
pub async fn record(
    pool: &DbPool,
    ctx: &RequestContext,
    user_id: Option<i32>,
    action: &str,
    resource: &str,
    metadata: Value,
) {
    if let Err(err) = log_audit(pool, ctx, user_id, action, Some(resource), Some(metadata)).await {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}
