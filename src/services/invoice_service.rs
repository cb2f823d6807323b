use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
    sea_query::{Expr, LockType},
};

use crate::{
    audit,
    dto::invoices::{
        ConsultantInvoice, ConsultantInvoiceList, InvoiceCreated, InvoiceList, InvoiceWithOrders,
    },
    entity::{
        Consultants, Counters,
        invoices::{
            ActiveModel as InvoiceActive, Column as InvoiceCol, Entity as Invoices,
            Model as InvoiceModel,
        },
        orders::{self, Column as OrderCol, Entity as Orders},
        products::Column as ProdCol,
    },
    error::{AppError, AppResult},
    middleware::context::RequestContext,
    models::{Invoice, OrderStatus},
    response::{ApiResponse, Meta},
    services::order_service::order_from_entity,
    state::AppState,
};

/// Pending order of the invoicing customer together with its product price.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct SettleableOrder {
    pub order_id: i32,
    pub price: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub total_cost: i64,
    pub order_count: i32,
}

/// Sums the resolved orders; `None` when nothing resolved.
pub fn summarize(orders: &[SettleableOrder]) -> Option<InvoiceTotals> {
    if orders.is_empty() {
        return None;
    }
    Some(InvoiceTotals {
        total_cost: orders.iter().map(|o| o.price).sum(),
        order_count: orders.len() as i32,
    })
}

/// Optional references recorded on a new invoice.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceRefs {
    pub counter_id: Option<i32>,
    pub consultant_id: Option<i32>,
}

/// Settles the customer's pending orders among `order_ids` into one invoice.
///
/// Orders owned by another customer, already paid, or unknown are skipped. The
/// invoice insert and the order updates commit together or not at all.
pub async fn create_invoice(
    state: &AppState,
    ctx: &RequestContext,
    customer_id: i32,
    order_ids: &[i32],
    refs: InvoiceRefs,
) -> AppResult<ApiResponse<InvoiceCreated>> {
    let mut ids = order_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Err(AppError::BadRequest("orderIDs must not be empty".into()));
    }

    let txn = state.orm.begin().await?;

    if let Some(counter_id) = refs.counter_id
        && Counters::find_by_id(counter_id).one(&txn).await?.is_none()
    {
        return Err(AppError::BadRequest(format!("counter {counter_id} does not exist")));
    }
    if let Some(consultant_id) = refs.consultant_id
        && Consultants::find_by_id(consultant_id)
            .one(&txn)
            .await?
            .is_none()
    {
        return Err(AppError::BadRequest(format!(
            "consultant {consultant_id} does not exist"
        )));
    }

    // Row locks make a concurrent invoice over the same orders wait, then see them as Paid.
    let resolved = Orders::find()
        .select_only()
        .column(OrderCol::OrderId)
        .column_as(ProdCol::Price, "price")
        .join(JoinType::InnerJoin, orders::Relation::Products.def())
        .filter(OrderCol::CustomerId.eq(customer_id))
        .filter(OrderCol::OrderId.is_in(ids))
        .filter(OrderCol::Status.eq(OrderStatus::Pending.as_str()))
        .order_by_asc(OrderCol::OrderId)
        .lock(LockType::Update)
        .into_model::<SettleableOrder>()
        .all(&txn)
        .await?;

    let totals = match summarize(&resolved) {
        Some(totals) => totals,
        None => {
            return Err(AppError::BadRequest(
                "none of the given orders can be invoiced for this customer".into(),
            ));
        }
    };

    let invoice = InvoiceActive {
        invoice_id: NotSet,
        total_cost: Set(totals.total_cost),
        exporting_date: Set(Utc::now().date_naive()),
        quantity: Set(totals.order_count),
        customer_id: Set(customer_id),
        counter_id: Set(refs.counter_id),
        consultant_id: Set(refs.consultant_id),
    }
    .insert(&txn)
    .await?;

    let settled: Vec<i32> = resolved.iter().map(|o| o.order_id).collect();
    let result = Orders::update_many()
        .col_expr(OrderCol::Status, Expr::value(OrderStatus::Paid.as_str()))
        .col_expr(OrderCol::InvoiceId, Expr::value(invoice.invoice_id))
        .filter(OrderCol::OrderId.is_in(settled.iter().copied()))
        .exec(&txn)
        .await?;
    if result.rows_affected != settled.len() as u64 {
        return Err(AppError::Internal(anyhow::anyhow!(
            "expected to settle {} orders, updated {}",
            settled.len(),
            result.rows_affected
        )));
    }

    txn.commit().await?;

    tracing::info!(
        invoice_id = invoice.invoice_id,
        customer_id,
        orders = totals.order_count,
        total_cost = totals.total_cost,
        "invoice created"
    );
    audit::record(
        &state.pool,
        ctx,
        None,
        "invoice_create",
        "invoices",
        serde_json::json!({ "invoice_id": invoice.invoice_id, "order_ids": settled }),
    )
    .await;

    Ok(ApiResponse::success(
        "Invoice created",
        InvoiceCreated {
            invoice_id: invoice.invoice_id,
            total_cost: totals.total_cost,
            order_count: totals.order_count,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_customer_invoices(
    state: &AppState,
    customer_id: i32,
) -> AppResult<ApiResponse<InvoiceList>> {
    let items: Vec<Invoice> = Invoices::find()
        .filter(InvoiceCol::CustomerId.eq(customer_id))
        .order_by_desc(InvoiceCol::ExportingDate)
        .order_by_desc(InvoiceCol::InvoiceId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(invoice_from_entity)
        .collect();

    let total = items.len();
    Ok(ApiResponse::listed("Invoices", InvoiceList { items }, total))
}

pub async fn get_invoice(
    state: &AppState,
    invoice_id: i32,
) -> AppResult<ApiResponse<InvoiceWithOrders>> {
    let invoice = Invoices::find_by_id(invoice_id).one(&state.orm).await?;
    let invoice = match invoice {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    let orders = Orders::find()
        .filter(OrderCol::InvoiceId.eq(invoice.invoice_id))
        .order_by_asc(OrderCol::OrderId)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "OK",
        InvoiceWithOrders {
            invoice: invoice_from_entity(invoice),
            orders,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_consultant_invoices(
    state: &AppState,
    employee_id: i32,
) -> AppResult<ApiResponse<ConsultantInvoiceList>> {
    if Consultants::find_by_id(employee_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    let items = sqlx::query_as::<_, ConsultantInvoice>(
        r#"
        SELECT i.invoice_id, i.exporting_date, i.quantity, i.total_cost,
               i.customer_id, c.name AS customer_name
        FROM invoices i
        JOIN customers c ON c.customer_id = i.customer_id
        WHERE i.consultant_id = $1
        ORDER BY i.exporting_date DESC, i.invoice_id DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(&state.pool)
    .await?;

    let total = items.len();
    Ok(ApiResponse::listed("Invoices", ConsultantInvoiceList { items }, total))
}

fn invoice_from_entity(model: InvoiceModel) -> Invoice {
    Invoice {
        id: model.invoice_id,
        total_cost: model.total_cost,
        exporting_date: model.exporting_date,
        quantity: model.quantity,
        customer_id: model.customer_id,
        counter_id: model.counter_id,
        consultant_id: model.consultant_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_sums_prices_and_counts_orders() {
        let orders = vec![
            SettleableOrder {
                order_id: 1,
                price: 2_000,
            },
            SettleableOrder {
                order_id: 2,
                price: 5_000,
            },
            SettleableOrder {
                order_id: 5,
                price: 5_000,
            },
        ];
        assert_eq!(
            summarize(&orders),
            Some(InvoiceTotals {
                total_cost: 12_000,
                order_count: 3,
            })
        );
    }

    #[test]
    fn summarize_of_nothing_is_none() {
        assert_eq!(summarize(&[]), None);
    }
}
