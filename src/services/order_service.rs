use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::{
    audit,
    dto::orders::{
        CheckoutAllRequest, CheckoutCreated, CreateOrderRequest, OrderCreated, OrderList,
    },
    entity::{
        customers::{Entity as Customers, Model as CustomerModel},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProdCol, Entity as Products},
    },
    error::{AppError, AppResult},
    middleware::context::RequestContext,
    models::{Order, OrderStatus, PaymentMethod},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Places a single-product order shipped to the customer's stored address.
pub async fn create_order(
    state: &AppState,
    ctx: &RequestContext,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderCreated>> {
    let customer = find_customer(&state.orm, payload.customer_id).await?;
    if Products::find_by_id(payload.product_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    let order = insert_pending_order(
        &state.orm,
        &customer,
        payload.product_id,
        payload.payment_method,
    )
    .await?;

    tracing::info!(
        order_id = order.order_id,
        customer_id = customer.customer_id,
        "order created"
    );
    audit::record(
        &state.pool,
        ctx,
        customer.user_id,
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.order_id, "product_id": order.product_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order created",
        OrderCreated {
            order_id: order.order_id,
        },
        Some(Meta::empty()),
    ))
}

/// Checks out a whole cart; each unit becomes its own Pending order.
pub async fn checkout_all(
    state: &AppState,
    ctx: &RequestContext,
    payload: CheckoutAllRequest,
) -> AppResult<ApiResponse<CheckoutCreated>> {
    if payload.products.is_empty() {
        return Err(AppError::BadRequest("products must not be empty".into()));
    }

    let txn = state.orm.begin().await?;
    let customer = find_customer(&txn, payload.customer_id).await?;

    let wanted: HashSet<i32> = payload.products.iter().map(|line| line.product_id).collect();
    let found = Products::find()
        .filter(ProdCol::ProductId.is_in(wanted.iter().copied()))
        .all(&txn)
        .await?;
    if found.len() != wanted.len() {
        return Err(AppError::NotFound);
    }

    let mut order_ids = Vec::new();
    for line in &payload.products {
        for _ in 0..line.quantity {
            let order =
                insert_pending_order(&txn, &customer, line.product_id, payload.payment_method)
                    .await?;
            order_ids.push(order.order_id);
        }
    }
    txn.commit().await?;

    tracing::info!(
        customer_id = customer.customer_id,
        orders = order_ids.len(),
        "cart checked out"
    );
    audit::record(
        &state.pool,
        ctx,
        customer.user_id,
        "order_checkout_all",
        "orders",
        serde_json::json!({ "order_ids": order_ids }),
    )
    .await;

    Ok(ApiResponse::success(
        "Orders created",
        CheckoutCreated { order_ids },
        Some(Meta::empty()),
    ))
}

pub async fn list_customer_orders(
    state: &AppState,
    customer_id: i32,
) -> AppResult<ApiResponse<OrderList>> {
    let items = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer_id))
        .order_by_desc(OrderCol::OrderDate)
        .order_by_desc(OrderCol::OrderId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let total = items.len();
    Ok(ApiResponse::listed("Orders", OrderList { items }, total))
}

pub async fn list_all_orders(state: &AppState) -> AppResult<ApiResponse<OrderList>> {
    let items = Orders::find()
        .order_by_desc(OrderCol::OrderDate)
        .order_by_desc(OrderCol::OrderId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let total = items.len();
    Ok(ApiResponse::listed("Orders", OrderList { items }, total))
}

async fn find_customer<C: ConnectionTrait>(conn: &C, customer_id: i32) -> AppResult<CustomerModel> {
    match Customers::find_by_id(customer_id).one(conn).await? {
        Some(customer) => Ok(customer),
        None => Err(AppError::NotFound),
    }
}

async fn insert_pending_order<C: ConnectionTrait>(
    conn: &C,
    customer: &CustomerModel,
    product_id: i32,
    payment_method: PaymentMethod,
) -> AppResult<OrderModel> {
    let order = OrderActive {
        order_id: NotSet,
        order_date: Set(Utc::now().date_naive()),
        address: Set(customer.address.clone()),
        status: Set(OrderStatus::Pending.as_str().to_string()),
        customer_id: Set(customer.customer_id),
        product_id: Set(product_id),
        payment_method: Set(payment_method.as_str().to_string()),
        invoice_id: Set(None),
    }
    .insert(conn)
    .await?;
    Ok(order)
}

pub(crate) fn order_from_entity(model: OrderModel) -> AppResult<Order> {
    Ok(Order {
        id: model.order_id,
        order_date: model.order_date,
        address: model.address,
        status: model.status.parse()?,
        customer_id: model.customer_id,
        product_id: model.product_id,
        payment_method: model.payment_method.parse()?,
        invoice_id: model.invoice_id,
    })
}
