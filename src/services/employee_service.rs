use sea_orm::{EntityTrait, QueryOrder};

use crate::{
    dto::employees::{CashierDetail, EmployeeList, EmployeeProfile},
    entity::employees::{Column, Entity as Employees, Model as EmployeeModel},
    error::{AppError, AppResult},
    models::{Employee, EmployeeRole},
    response::ApiResponse,
    state::AppState,
};

pub async fn list_employees(state: &AppState) -> AppResult<ApiResponse<EmployeeList>> {
    let items: Vec<Employee> = Employees::find()
        .order_by_asc(Column::EmployeeId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(employee_from_entity)
        .collect();
    let total = items.len();
    Ok(ApiResponse::listed("Employees", EmployeeList { items }, total))
}

/// Employee joined with both role tables so the role is decided in one round trip.
#[derive(Debug, sqlx::FromRow)]
struct EmployeeRoleRow {
    employee_id: i32,
    user_id: Option<i32>,
    name: String,
    phone: Option<String>,
    salary: i64,
    is_cashier: bool,
    counter_id: Option<i32>,
    is_consultant: bool,
}

impl From<EmployeeRoleRow> for EmployeeProfile {
    fn from(row: EmployeeRoleRow) -> Self {
        EmployeeProfile {
            employee_id: row.employee_id,
            user_id: row.user_id,
            name: row.name,
            phone: row.phone,
            salary: row.salary,
            role: EmployeeRole::resolve(row.is_cashier, row.counter_id, row.is_consultant),
        }
    }
}

const EMPLOYEE_ROLE_SELECT: &str = r#"
    SELECT e.employee_id, e.user_id, e.name, e.phone, e.salary,
           (ca.employee_id IS NOT NULL) AS is_cashier,
           ca.counter_id,
           (co.employee_id IS NOT NULL) AS is_consultant
    FROM employees e
    LEFT JOIN cashiers ca ON ca.employee_id = e.employee_id
    LEFT JOIN consultants co ON co.employee_id = e.employee_id
"#;

pub async fn profile_by_user(
    state: &AppState,
    user_id: i32,
) -> AppResult<ApiResponse<EmployeeProfile>> {
    let row = sqlx::query_as::<_, EmployeeRoleRow>(&format!(
        "{EMPLOYEE_ROLE_SELECT} WHERE e.user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(&state.pool)
    .await?;
    role_profile(row)
}

pub async fn profile_by_employee(
    state: &AppState,
    employee_id: i32,
) -> AppResult<ApiResponse<EmployeeProfile>> {
    let row = sqlx::query_as::<_, EmployeeRoleRow>(&format!(
        "{EMPLOYEE_ROLE_SELECT} WHERE e.employee_id = $1"
    ))
    .bind(employee_id)
    .fetch_optional(&state.pool)
    .await?;
    role_profile(row)
}

fn role_profile(row: Option<EmployeeRoleRow>) -> AppResult<ApiResponse<EmployeeProfile>> {
    let row = match row {
        Some(r) => r,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Employee",
        EmployeeProfile::from(row),
        None,
    ))
}

pub async fn cashier_detail(
    state: &AppState,
    employee_id: i32,
) -> AppResult<ApiResponse<CashierDetail>> {
    let cashier = sqlx::query_as::<_, CashierDetail>(
        r#"
        SELECT e.employee_id, e.name, e.phone, e.salary,
               ca.counter_id, co.name AS counter_name
        FROM cashiers ca
        JOIN employees e ON e.employee_id = ca.employee_id
        LEFT JOIN counters co ON co.counter_id = ca.counter_id
        WHERE ca.employee_id = $1
        "#,
    )
    .bind(employee_id)
    .fetch_optional(&state.pool)
    .await?;
    let cashier = match cashier {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Cashier", cashier, None))
}

fn employee_from_entity(model: EmployeeModel) -> Employee {
    Employee {
        id: model.employee_id,
        user_id: model.user_id,
        name: model.name,
        phone: model.phone,
        salary: model.salary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(is_cashier: bool, is_consultant: bool) -> EmployeeRoleRow {
        EmployeeRoleRow {
            employee_id: 3,
            user_id: Some(9),
            name: "Dana".into(),
            phone: None,
            salary: 350_000,
            is_cashier,
            counter_id: is_cashier.then_some(1),
            is_consultant,
        }
    }

    #[test]
    fn profile_carries_resolved_role() {
        let profile = EmployeeProfile::from(row(true, false));
        assert_eq!(profile.role, EmployeeRole::Cashier { counter_id: Some(1) });

        let profile = EmployeeProfile::from(row(false, true));
        assert_eq!(profile.role, EmployeeRole::Consultant);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["role"], "Consultant");
        assert_eq!(json["employee_id"], 3);
    }

    #[test]
    fn missing_employee_is_not_found() {
        assert!(matches!(role_profile(None), Err(AppError::NotFound)));
    }
}
