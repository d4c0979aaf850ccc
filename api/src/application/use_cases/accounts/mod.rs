pub mod create_account;
pub mod delete_account;
pub mod get_account;
pub mod login;
pub mod update_account;
pub mod validate_field;
