pub mod business;
pub mod health;
pub mod transactions;
