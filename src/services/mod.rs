pub mod auth_service;
pub mod customer_service;
pub mod employee_service;
pub mod invoice_service;
pub mod membership_service;
pub mod order_service;
pub mod product_service;
