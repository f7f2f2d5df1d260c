pub mod chat;
pub mod dashboard;
pub mod image;
pub mod login;
pub mod transactions;
