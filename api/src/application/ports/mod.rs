pub mod account_repository;
pub mod session_store;
pub mod user_repository;
