use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::UserRole;

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    /// Display name of the customer profile; defaults to the username.
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(alias = "phonenumber")]
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Identity the client keeps after login. It carries no token or expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub id: i32,
    pub username: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: Identity,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    pub id: i32,
    pub username: String,
    pub customer_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_accepts_ui_field_names() {
        let request: SignupRequest = serde_json::from_str(
            r#"{"username":"bob","password":"pw","email":"bob@example.com","phonenumber":"555","address":"1 Elm"}"#,
        )
        .unwrap();
        assert_eq!(request.phone.as_deref(), Some("555"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn signup_rejects_blank_username_and_bad_email() {
        let request = SignupRequest {
            username: String::new(),
            password: "pw".into(),
            name: None,
            email: Some("not-an-email".into()),
            phone: None,
            address: None,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
    }
}
