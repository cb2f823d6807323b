pub mod cashiers;
pub mod categories;
pub mod consultants;
pub mod counters;
pub mod customers;
pub mod employees;
pub mod invoices;
pub mod orders;
pub mod products;
pub mod warehouses;

pub use consultants::Entity as Consultants;
pub use counters::Entity as Counters;
