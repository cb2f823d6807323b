pub mod auth;
pub mod customers;
pub mod employees;
pub mod invoices;
pub mod orders;
pub mod products;
