use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    dto::customers::{CustomerList, UpdateCustomerRequest},
    entity::customers::{ActiveModel, Column, Entity as Customers, Model as CustomerModel},
    error::{AppError, AppResult},
    models::Customer,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_customers(state: &AppState) -> AppResult<ApiResponse<CustomerList>> {
    let items: Vec<Customer> = Customers::find()
        .order_by_asc(Column::CustomerId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(customer_from_entity)
        .collect();
    let total = items.len();
    Ok(ApiResponse::listed("Customers", CustomerList { items }, total))
}

pub async fn get_by_user(state: &AppState, user_id: i32) -> AppResult<ApiResponse<Customer>> {
    let customer = Customers::find()
        .filter(Column::UserId.eq(user_id))
        .one(&state.orm)
        .await?;
    let customer = match customer {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Customer",
        customer_from_entity(customer),
        None,
    ))
}

pub async fn update_customer(
    state: &AppState,
    id: i32,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let existing = Customers::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: ActiveModel = existing.clone().into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(email) = payload.email {
        active.email = Set(Some(email));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = payload.address {
        active.address = Set(Some(address));
    }

    let customer = if active.is_changed() {
        let updated = active.update(&state.orm).await?;
        tracing::info!(customer_id = updated.customer_id, "customer profile updated");
        updated
    } else {
        existing
    };

    Ok(ApiResponse::success(
        "Updated",
        customer_from_entity(customer),
        Some(Meta::empty()),
    ))
}

fn customer_from_entity(model: CustomerModel) -> Customer {
    Customer {
        id: model.customer_id,
        user_id: model.user_id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        address: model.address,
    }
}
