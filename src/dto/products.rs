use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Category, Product, Warehouse};

/// Text fields of the multipart product form.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    pub sale_price: Option<i64>,
    #[validate(range(min = 0))]
    pub remaining: i32,
    pub category_id: Option<i32>,
}

/// Image part of the product form.
#[derive(Debug)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct WarehouseList {
    #[schema(value_type = Vec<Warehouse>)]
    pub items: Vec<Warehouse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_stock_is_rejected() {
        let product = NewProduct {
            name: "Mug".into(),
            price: 1_200,
            remaining: -1,
            ..Default::default()
        };
        assert!(product.validate().unwrap_err().field_errors().contains_key("remaining"));
    }
}
