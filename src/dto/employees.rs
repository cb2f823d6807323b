use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Employee, EmployeeRole};

/// Dashboard view of an employee with its resolved role.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeProfile {
    pub employee_id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub phone: Option<String>,
    pub salary: i64,
    #[serde(flatten)]
    pub role: EmployeeRole,
}

#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct CashierDetail {
    pub employee_id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub salary: i64,
    pub counter_id: Option<i32>,
    pub counter_name: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct EmployeeList {
    #[schema(value_type = Vec<Employee>)]
    pub items: Vec<Employee>,
}
