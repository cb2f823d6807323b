pub mod context;
pub mod extract;
pub mod validated;
