use serde::Serialize;
use utoipa::ToSchema;

/// Extra information about a payload; list endpoints report their row count.
#[derive(Debug, Serialize, ToSchema, Clone, Default, PartialEq)]
pub struct Meta {
    pub total: Option<i64>,
}

impl Meta {
    pub fn total(total: usize) -> Self {
        Self {
            total: Some(total as i64),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Success envelope: `{message, data, meta}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    /// A list payload with `meta.total` set to `total`.
    pub fn listed(message: impl Into<String>, data: T, total: usize) -> Self {
        Self::success(message, data, Some(Meta::total(total)))
    }
}
