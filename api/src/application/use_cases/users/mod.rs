pub mod get_user;
pub mod update_user;
