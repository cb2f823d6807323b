use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Order, PaymentMethod};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    #[serde(rename = "customerID")]
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[serde(rename = "productID")]
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[serde(rename = "paymentmethod")]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderCreated {
    #[serde(rename = "orderID")]
    pub order_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CartLineRequest {
    #[serde(rename = "productID")]
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 10))]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CheckoutAllRequest {
    #[serde(rename = "customerID")]
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[validate(length(min = 1), nested)]
    pub products: Vec<CartLineRequest>,
    #[serde(rename = "paymentmethod")]
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutCreated {
    #[serde(rename = "orderIDs")]
    pub order_ids: Vec<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<Order>)]
    pub items: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_order_uses_wire_names() {
        let request: CreateOrderRequest = serde_json::from_str(
            r#"{"customerID":7,"productID":3,"paymentmethod":"Cash"}"#,
        )
        .unwrap();
        assert_eq!(request.customer_id, 7);
        assert_eq!(request.product_id, 3);
        assert_eq!(request.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn checkout_all_validates_every_line() {
        let request: CheckoutAllRequest = serde_json::from_str(
            r#"{"customerID":7,"products":[{"productID":1},{"productID":2,"quantity":11}],"paymentmethod":"Online"}"#,
        )
        .unwrap();
        assert_eq!(request.products[0].quantity, 1);
        assert!(request.validate().is_err());

        let empty: CheckoutAllRequest = serde_json::from_str(
            r#"{"customerID":7,"products":[],"paymentmethod":"Online"}"#,
        )
        .unwrap();
        assert!(empty.validate().is_err());
    }
}
