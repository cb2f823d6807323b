use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Invoice, Order};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateInvoiceRequest {
    #[serde(rename = "customerID")]
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[serde(rename = "orderIDs")]
    #[validate(length(min = 1))]
    pub order_ids: Vec<i32>,
    #[serde(rename = "counterID", default)]
    pub counter_id: Option<i32>,
    #[serde(rename = "consultantID", default)]
    pub consultant_id: Option<i32>,
}

/// Body of `POST /api/customers/{id}/invoices`; the customer comes from the path.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CustomerInvoiceRequest {
    #[serde(rename = "orderIDs")]
    #[validate(length(min = 1))]
    pub order_ids: Vec<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceCreated {
    #[serde(rename = "invoiceID")]
    pub invoice_id: i32,
    #[serde(rename = "totalCost")]
    pub total_cost: i64,
    #[serde(rename = "orderCount")]
    pub order_count: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceWithOrders {
    pub invoice: Invoice,
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct InvoiceList {
    #[schema(value_type = Vec<Invoice>)]
    pub items: Vec<Invoice>,
}

/// Invoice row as shown on the consultant dashboard.
#[derive(Debug, Serialize, ToSchema, sqlx::FromRow)]
pub struct ConsultantInvoice {
    pub invoice_id: i32,
    pub exporting_date: NaiveDate,
    pub quantity: i32,
    pub total_cost: i64,
    pub customer_id: i32,
    pub customer_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ConsultantInvoiceList {
    #[schema(value_type = Vec<ConsultantInvoice>)]
    pub items: Vec<ConsultantInvoice>,
}
