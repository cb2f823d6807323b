use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Prices are integer cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: i64,
    pub sale_price: Option<i64>,
    pub remaining: i32,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sold: i32,
}

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct ProductDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
    pub warehouse_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub warehouse_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Warehouse {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    Pending,
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Paid",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Paid" => Ok(OrderStatus::Paid),
            other => Err(anyhow::anyhow!("unknown order status {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PaymentMethod {
    #[serde(alias = "cash", alias = "offline")]
    Cash,
    #[serde(rename = "Credit Card", alias = "credit card", alias = "credit_card")]
    CreditCard,
    #[serde(rename = "Debit Card", alias = "debit card", alias = "debit_card")]
    DebitCard,
    #[serde(alias = "online")]
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Online => "Online",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cash" => Ok(PaymentMethod::Cash),
            "Credit Card" => Ok(PaymentMethod::CreditCard),
            "Debit Card" => Ok(PaymentMethod::DebitCard),
            "Online" => Ok(PaymentMethod::Online),
            other => Err(anyhow::anyhow!("unknown payment method {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub order_date: NaiveDate,
    pub address: Option<String>,
    pub status: OrderStatus,
    pub customer_id: i32,
    pub product_id: i32,
    pub payment_method: PaymentMethod,
    pub invoice_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Invoice {
    pub id: i32,
    pub total_cost: i64,
    pub exporting_date: NaiveDate,
    pub quantity: i32,
    pub customer_id: i32,
    pub counter_id: Option<i32>,
    pub consultant_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct MemberAccount {
    pub id: i32,
    #[serde(rename = "type")]
    pub account_type: String,
    pub points: i32,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub customer_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub phone: Option<String>,
    pub salary: i64,
}

/// Employee sub-role, resolved once from the role tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "role")]
pub enum EmployeeRole {
    Cashier { counter_id: Option<i32> },
    Consultant,
    Unknown,
}

impl EmployeeRole {
    /// An employee should sit in exactly one role table; if both match, cashier wins.
    pub fn resolve(is_cashier: bool, counter_id: Option<i32>, is_consultant: bool) -> Self {
        if is_cashier {
            EmployeeRole::Cashier { counter_id }
        } else if is_consultant {
            EmployeeRole::Consultant
        } else {
            EmployeeRole::Unknown
        }
    }
}

/// Role a logged-in user is routed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    Customer,
    Cashier,
    Consultant,
    Employee,
    Unassigned,
}

impl UserRole {
    pub fn resolve(
        is_customer: bool,
        is_employee: bool,
        is_cashier: bool,
        is_consultant: bool,
    ) -> Self {
        match (is_employee, is_cashier, is_consultant) {
            (true, true, _) => UserRole::Cashier,
            (true, false, true) => UserRole::Consultant,
            (true, false, false) => UserRole::Employee,
            _ if is_customer => UserRole::Customer,
            _ => UserRole::Unassigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_accepts_ui_spellings() {
        let parsed: Vec<PaymentMethod> =
            serde_json::from_str(r#"["Cash","Credit Card","Debit Card","Online","online","offline"]"#)
                .unwrap();
        assert_eq!(
            parsed,
            vec![
                PaymentMethod::Cash,
                PaymentMethod::CreditCard,
                PaymentMethod::DebitCard,
                PaymentMethod::Online,
                PaymentMethod::Online,
                PaymentMethod::Cash,
            ]
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            r#""Credit Card""#
        );
        assert!(serde_json::from_str::<PaymentMethod>(r#""Bitcoin""#).is_err());
    }

    #[test]
    fn stored_strings_round_trip_through_from_str() {
        for method in [
            PaymentMethod::Cash,
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::Online,
        ] {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), method);
        }
        assert_eq!("Paid".parse::<OrderStatus>().unwrap(), OrderStatus::Paid);
        assert!("Shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn employee_role_prefers_cashier_table() {
        assert_eq!(
            EmployeeRole::resolve(true, Some(2), true),
            EmployeeRole::Cashier { counter_id: Some(2) }
        );
        assert_eq!(
            EmployeeRole::resolve(false, None, true),
            EmployeeRole::Consultant
        );
        assert_eq!(EmployeeRole::resolve(false, None, false), EmployeeRole::Unknown);
    }

    #[test]
    fn employee_role_serializes_as_tag() {
        let json = serde_json::to_value(EmployeeRole::Cashier { counter_id: Some(4) }).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "Cashier", "counter_id": 4 }));
        let json = serde_json::to_value(EmployeeRole::Consultant).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "Consultant" }));
    }

    #[test]
    fn user_role_resolution() {
        assert_eq!(UserRole::resolve(true, false, false, false), UserRole::Customer);
        assert_eq!(UserRole::resolve(false, true, true, false), UserRole::Cashier);
        assert_eq!(UserRole::resolve(true, true, false, true), UserRole::Consultant);
        assert_eq!(UserRole::resolve(false, true, false, false), UserRole::Employee);
        assert_eq!(UserRole::resolve(false, false, false, false), UserRole::Unassigned);
    }
}
