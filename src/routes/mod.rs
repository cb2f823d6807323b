use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod catalog;
pub mod customers;
pub mod doc;
pub mod employees;
pub mod health;
pub mod invoices;
pub mod membership;
pub mod orders;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/invoices", invoices::router())
        .nest("/auth", auth::router())
        .merge(catalog::router())
        .merge(customers::router())
        .merge(employees::router())
        .merge(membership::router())
}
